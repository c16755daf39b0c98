use serde::{Deserialize, Serialize};

/// Flattened view of the first artist returned by a catalog search.
///
/// Field order is the key order of `artist_info.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub name: String,
    pub followers: u64,
    pub genres: Vec<String>,
    pub popularity: u32,
    pub image: Option<String>,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub name: String,
    pub album: String,
    pub popularity: u32,
    pub track_number: u32,
    pub release_date: String,
    pub image: String, // first album cover, "Unknown" when the album has none
}
