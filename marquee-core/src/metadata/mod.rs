//! Turning sheet titles into TMDB matches, and matches into displayed records.

pub mod merge;
pub mod normalize;
pub mod resolver;
pub mod trailer;

pub use merge::merge;
pub use normalize::normalize_hit;
pub use resolver::{MAX_CANDIDATES, MetadataResolver};
pub use trailer::{TrailerResolver, pick_trailer};
