//! Artistlookup - Spotify artist metadata from the command line
//!
//! This library provides a client-credentials Spotify catalog client and the
//! lookups built on it: followers, genres, profile info and top tracks.

/// Client modules for the Spotify catalog and local JSON output
pub mod clients;
/// Artist lookups reshaping catalog responses for display
pub mod lookup;
