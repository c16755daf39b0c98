use log::{debug, error};
use serde::{Deserialize, de::DeserializeOwned};

use crate::clients::{
    entities::{ArtistRecord, TrackRecord},
    errors::{Error, Result},
};

const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
// Top tracks are market dependent, the lookup always asks for the US catalog
const TOP_TRACKS_COUNTRY: &str = "US";
const UNKNOWN: &str = "Unknown";
const UNKNOWN_ERROR: &str = "Unknown error";

impl From<&ArtistItem> for ArtistRecord {
    fn from(a: &ArtistItem) -> ArtistRecord {
        ArtistRecord {
            name: a.name().to_string(),
            followers: a.followers(),
            genres: a.genres().to_vec(),
            popularity: a.popularity(),
            image: a.image_url().map(str::to_string),
            id: a.id().unwrap_or(UNKNOWN).to_string(),
        }
    }
}

impl From<&TrackItem> for TrackRecord {
    fn from(t: &TrackItem) -> TrackRecord {
        TrackRecord {
            name: t.name().to_string(),
            album: t.album_name().to_string(),
            popularity: t.popularity(),
            track_number: t.track_number(),
            release_date: t.release_date().to_string(),
            image: t.image_url().to_string(),
        }
    }
}

/// Client id and secret of a registered Spotify application.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET`. Empty values count as missing.
    pub fn from_env() -> Option<Self> {
        Credentials::from_vars(env_var)
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let client_id = non_empty(get("SPOTIFY_CLIENT_ID"))?;
        let client_secret = non_empty(get("SPOTIFY_CLIENT_SECRET"))?;
        Some(Credentials::new(client_id, client_secret))
    }
}

/// Where the token exchange and the catalog requests are sent.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub auth_url: String,
    pub api_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(auth_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Endpoints {
            auth_url: auth_url.into(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Defaults to the public Spotify endpoints, `SPOTIFY_AUTH_URL` and
    /// `SPOTIFY_API_BASE_URL` override them (used to point at a local mock).
    pub fn from_env() -> Self {
        Endpoints::from_vars(env_var)
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Endpoints::default();
        Endpoints::new(
            non_empty(get("SPOTIFY_AUTH_URL")).unwrap_or(defaults.auth_url),
            non_empty(get("SPOTIFY_API_BASE_URL")).unwrap_or(defaults.api_base_url),
        )
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: Option<String>,
}

// Token endpoint failures follow the OAuth2 shape: {"error": "...", "error_description": "..."}
#[derive(Deserialize, Debug)]
struct AuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

// Web API failures: {"error": {"status": 401, "message": "..."}}
#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: Option<String>,
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Body of `GET /search?type=artist`.
#[derive(Deserialize, Debug, Default)]
pub struct SearchResponse {
    pub artists: Option<ArtistPage>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ArtistPage {
    pub items: Option<Vec<ArtistItem>>,
}

impl SearchResponse {
    /// The first (best ranked) match, the only one the lookups ever consider.
    pub fn first_artist(self) -> Option<ArtistItem> {
        self.artists?.items?.into_iter().next()
    }
}

/// Artist document as returned by the catalog. Every field may be missing,
/// the accessors apply the defaults.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ArtistItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub genres: Option<Vec<String>>,
    pub followers: Option<Followers>,
    pub popularity: Option<u32>,
    pub images: Option<Vec<Image>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Image {
    pub url: Option<String>,
}

impl ArtistItem {
    /// Defaults to `"Unknown"`.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    /// Defaults to 0.
    pub fn followers(&self) -> u64 {
        self.followers.as_ref().and_then(|f| f.total).unwrap_or(0)
    }

    /// Defaults to an empty list.
    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or_default()
    }

    /// Defaults to 0.
    pub fn popularity(&self) -> u32 {
        self.popularity.unwrap_or(0)
    }

    /// Url of the first image, if the artist has any.
    pub fn image_url(&self) -> Option<&str> {
        first_image_url(self.images.as_deref())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

fn first_image_url(images: Option<&[Image]>) -> Option<&str> {
    images?.first()?.url.as_deref()
}

/// Body of `GET /artists/{id}/top-tracks`.
#[derive(Deserialize, Debug, Default)]
pub struct TopTracksResponse {
    pub tracks: Option<Vec<TrackItem>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TrackItem {
    pub name: Option<String>,
    pub album: Option<AlbumItem>,
    pub popularity: Option<u32>,
    pub track_number: Option<u32>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AlbumItem {
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub images: Option<Vec<Image>>,
}

impl TrackItem {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn album_name(&self) -> &str {
        self.album
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn popularity(&self) -> u32 {
        self.popularity.unwrap_or(0)
    }

    pub fn track_number(&self) -> u32 {
        self.track_number.unwrap_or(0)
    }

    pub fn release_date(&self) -> &str {
        self.album
            .as_ref()
            .and_then(|a| a.release_date.as_deref())
            .unwrap_or(UNKNOWN)
    }

    /// Album cover url, `"Unknown"` when the album carries no image.
    pub fn image_url(&self) -> &str {
        self.album
            .as_ref()
            .and_then(|a| first_image_url(a.images.as_deref()))
            .unwrap_or(UNKNOWN)
    }
}

/// Spotify catalog client authenticated with the client-credentials flow.
///
/// The access token is fetched once in [`CatalogClient::authenticate`] and kept
/// for the lifetime of the client. It is never refreshed.
pub struct CatalogClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    access_token: String,
}

impl CatalogClient {
    /// Exchange the credentials for a bearer token.
    pub async fn authenticate(credentials: &Credentials, endpoints: Endpoints) -> Result<Self> {
        let http = reqwest::Client::new();
        debug!("Requesting access token from {}", endpoints.auth_url);
        let response = http
            .post(&endpoints.auth_url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let reason = serde_json::from_str::<AuthErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or_else(|| status.to_string());
            return Err(Error::AuthenticationError(reason));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::AuthenticationError("token endpoint returned no access_token".into())
            })?;
        debug!("Obtained Spotify access token");

        Ok(CatalogClient {
            http,
            endpoints,
            access_token,
        })
    }

    // Create a CatalogClient from environment variables or raise a configuration error
    pub async fn try_default() -> Result<Self> {
        CatalogClient::try_from_vars(env_var).await
    }

    pub async fn try_from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = Credentials::from_vars(&get).ok_or_else(|| {
            Error::ConfigurationError(
                "Missing Spotify credentials in environment variables. Set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET.".into(),
            )
        })?;
        CatalogClient::authenticate(&credentials, Endpoints::from_vars(get)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        debug!("GET {url} {query:?}");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = api_error_message(&body);
            error!("Error: {message}");
            return Err(Error::ApiError {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// First artist matching `name`, `None` when the search comes back empty.
    pub async fn search_artist(&self, name: &str) -> Result<Option<ArtistItem>> {
        let url = format!("{}/search", self.endpoints.api_base_url);
        let response: SearchResponse = self
            .get_json(&url, &[("q", name), ("type", "artist"), ("limit", "1")])
            .await?;

        let artist = response.first_artist();
        if artist.is_none() {
            debug!("No artist matched {name:?}");
        }
        Ok(artist)
    }

    pub async fn get_artist_id(&self, name: &str) -> Result<Option<String>> {
        Ok(self.search_artist(name).await?.and_then(|a| a.id))
    }

    /// Top tracks of the first artist matching `name`, `None` when no artist matched.
    pub async fn get_top_tracks(&self, name: &str) -> Result<Option<Vec<TrackItem>>> {
        let Some(artist_id) = self.get_artist_id(name).await? else {
            return Ok(None);
        };
        self.get_top_tracks_by_id(&artist_id).await.map(Some)
    }

    pub async fn get_top_tracks_by_id(&self, artist_id: &str) -> Result<Vec<TrackItem>> {
        let url = format!(
            "{}/artists/{artist_id}/top-tracks",
            self.endpoints.api_base_url
        );
        let response: TopTracksResponse = self
            .get_json(&url, &[("country", TOP_TRACKS_COUNTRY)])
            .await?;
        Ok(response.tracks.unwrap_or_default())
    }
}
