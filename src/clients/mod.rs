/// Artist and track records produced by the lookups
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// JSON dumps in the output directory
pub mod local_storage;
/// Spotify catalog client
pub mod spotify;

pub use local_storage::LocalStorage;
pub use spotify::CatalogClient;
