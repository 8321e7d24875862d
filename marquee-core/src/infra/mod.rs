//! Adapters for everything outside the process: persistent key-value
//! storage, the TMDB API and the published spreadsheet.

pub mod cache;
pub mod media;
pub mod sheets;
