use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;
use std::path::PathBuf;

use crate::clients::errors::Result;

/// Files produced by the lookups. Each run overwrites the previous content.
pub enum OutputFile {
    ArtistInfo,
    TopTrackImages,
}

impl OutputFile {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFile::ArtistInfo => "artist_info.json",
            OutputFile::TopTrackImages => "top_track_imgs.json",
        }
    }
}

/// Flat JSON dumps in a single output directory.
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LocalStorage { dir: dir.into() }
    }

    // Dumps land next to where the command is run
    pub fn try_default() -> Result<Self> {
        let dir = std::env::current_dir()?;
        debug!("Using {dir:?} as output directory");
        Ok(LocalStorage { dir })
    }

    pub fn path_of(&self, file: &OutputFile) -> PathBuf {
        self.dir.join(file.as_str())
    }

    /// Serialize `value` with a 4-space indent, replacing whatever the file held before.
    pub async fn write_json<T: Serialize>(&self, file: &OutputFile, value: &T) -> Result<PathBuf> {
        let path = self.path_of(file);
        let mut contents = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut contents, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;

        tokio::fs::write(&path, contents).await?;
        debug!("Wrote {path:?}");
        Ok(path)
    }

    pub async fn read_json<T: DeserializeOwned>(&self, file: &OutputFile) -> Result<T> {
        let contents = tokio::fs::read(self.path_of(file)).await?;
        Ok(serde_json::from_slice(&contents)?)
    }
}
