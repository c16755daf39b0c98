use log::{debug, info};

use crate::clients::{
    CatalogClient, LocalStorage,
    entities::{ArtistRecord, TrackRecord},
    errors::{Error, Result},
    local_storage::OutputFile,
    spotify::ArtistItem,
};

// Configuration for the Lookup struct
pub struct Config {
    pub client: CatalogClient,
    pub storage: LocalStorage,
}

pub struct ConfigBuilder {
    client: Option<CatalogClient>,
    storage: Option<LocalStorage>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            storage: None,
        }
    }

    #[must_use]
    pub fn client(mut self, client: CatalogClient) -> Self {
        self.client = Some(client);
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: LocalStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub async fn build(self) -> Result<Config> {
        let storage = match self.storage {
            Some(s) => s,
            None => LocalStorage::try_default()?,
        };
        let client = match self.client {
            Some(c) => c,
            None => CatalogClient::try_default().await?,
        };
        Ok(Config { client, storage })
    }
}

/// The four artist lookups. Each returns the text to show the user.
pub struct Lookup {
    config: Config,
}

impl Lookup {
    pub fn new(config: Config) -> Self {
        Lookup { config }
    }

    // API errors were already reported by the client, the lookups treat them as "not found"
    async fn find_artist(&self, artist_name: &str) -> Result<Option<ArtistItem>> {
        match self.config.client.search_artist(artist_name).await {
            Err(Error::ApiError { status, .. }) => {
                debug!("Search for {artist_name:?} failed with status {status}");
                Ok(None)
            }
            other => other,
        }
    }

    pub async fn followers(&self, artist_name: &str) -> Result<String> {
        let Some(artist) = self.find_artist(artist_name).await? else {
            return Ok(not_found(artist_name));
        };
        Ok(format!(
            "Spotify Artist '{}' has {} followers.",
            artist.name(),
            format_thousands(artist.followers())
        ))
    }

    pub async fn genres(&self, artist_name: &str) -> Result<String> {
        let Some(artist) = self.find_artist(artist_name).await? else {
            return Ok(not_found(artist_name));
        };
        if artist.genres().is_empty() {
            return Ok(format!("No genres found for {}.", artist.name()));
        }
        Ok(format!(
            "Genres for {}: {}",
            artist.name(),
            capitalized_genres(artist.genres())
        ))
    }

    /// Dump the artist profile to `artist_info.json`. Nothing is written when no artist matched.
    pub async fn info(&self, artist_name: &str) -> Result<String> {
        let Some(artist) = self.find_artist(artist_name).await? else {
            return Ok(format!("No information found for {artist_name}."));
        };
        let record = ArtistRecord::from(&artist);
        let path = self
            .config
            .storage
            .write_json(&OutputFile::ArtistInfo, &record)
            .await?;
        info!("Saved artist information for {}", record.name);

        let mut out = profile_summary(&record);
        out.push_str(&format!("\nArtist information saved to {}", path.display()));
        Ok(out)
    }

    /// List the top tracks and dump their cover urls to `top_track_imgs.json`.
    pub async fn top_tracks(&self, artist_name: &str) -> Result<String> {
        let tracks = match self.config.client.get_top_tracks(artist_name).await {
            Ok(tracks) => tracks.unwrap_or_default(),
            Err(Error::ApiError { status, .. }) => {
                debug!("Top tracks for {artist_name:?} failed with status {status}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let tracks: Vec<TrackRecord> = tracks.iter().map(TrackRecord::from).collect();

        let mut out = if tracks.is_empty() {
            format!("No top tracks found for artist '{artist_name}'.\n")
        } else {
            track_listing(&tracks)
        };

        // Urls stay aligned with the track positions, "Unknown" included
        let image_urls: Vec<&str> = tracks.iter().map(|t| t.image.as_str()).collect();
        if image_urls.is_empty() {
            out.push_str("No valid image URLs found. Skipping file update.");
        } else {
            let path = self.config.storage.path_of(&OutputFile::TopTrackImages);
            out.push_str(&format!("Overwriting {} with new data.\n", path.display()));
            self.config
                .storage
                .write_json(&OutputFile::TopTrackImages, &image_urls)
                .await?;
            info!("Saved {} top track images", image_urls.len());
        }
        Ok(out.trim_end().to_string())
    }
}

fn not_found(artist_name: &str) -> String {
    format!("No artist found for '{artist_name}'.")
}

fn profile_summary(record: &ArtistRecord) -> String {
    let genres = if record.genres.is_empty() {
        "-".to_string()
    } else {
        capitalized_genres(&record.genres)
    };
    format!(
        "{}\n\tFollowers: {}\n\tGenres: {}\n\tPopularity: {}",
        record.name,
        format_thousands(record.followers),
        genres,
        record.popularity
    )
}

fn track_listing(tracks: &[TrackRecord]) -> String {
    let mut out = String::new();
    for (i, track) in tracks.iter().enumerate() {
        out.push_str(&format!(
            "{}. {}\n\tAlbum: {}\n\tPopularity: {}\n\tTrack Number: {}\n\tRelease Date: {}\n\n",
            i + 1,
            track.name,
            track.album,
            track.popularity,
            track.track_number,
            track.release_date
        ));
    }
    out
}

fn capitalized_genres(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| capitalize(g))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Upper-case the first character and lower-case the rest: "j-POP" -> "J-pop".
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
