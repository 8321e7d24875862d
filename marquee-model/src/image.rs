use std::fmt::{Display, Formatter};

/// Root of the TMDB image CDN; a size segment and the file path follow.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Image size variants
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageSize {
    Poster(PosterSize),     // Grid poster
    Backdrop(BackdropSize), // Wide hero image
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSize::Poster(s) => write!(f, "Poster (size: {:#?})", s),
            ImageSize::Backdrop(s) => {
                write!(f, "Backdrop (size: {:#?})", s)
            }
        }
    }
}

impl ImageSize {
    /// Default poster size (500px)
    pub const fn poster() -> Self {
        Self::Poster(PosterSize::W500)
    }

    /// Default backdrop size (source resolution)
    pub const fn backdrop() -> Self {
        Self::Backdrop(BackdropSize::Original)
    }

    /// TMDB path segment for this size (e.g. "w500", "original")
    pub const fn segment(&self) -> &'static str {
        match self {
            ImageSize::Poster(s) => s.as_str(),
            ImageSize::Backdrop(s) => s.as_str(),
        }
    }

    /// Absolute CDN URL for a TMDB file path such as `/abc.jpg`.
    ///
    /// Returns `None` for blank paths so callers never render a URL that
    /// points at a bare size directory.
    pub fn url_for(&self, file_path: &str) -> Option<String> {
        let file_path = file_path.trim();
        if file_path.is_empty() {
            return None;
        }
        let mut url = String::with_capacity(
            TMDB_IMAGE_BASE.len() + 10 + file_path.len(),
        );
        url.push_str(TMDB_IMAGE_BASE);
        url.push('/');
        url.push_str(self.segment());
        if !file_path.starts_with('/') {
            url.push('/');
        }
        url.push_str(file_path);
        Some(url)
    }
}

/// Poster image sizes published by TMDB (2:3 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    W92,
    W154,
    W185,
    W342,
    #[default]
    W500,
    W780,
    Original,
}

impl PosterSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W154 => "w154",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::Original => "original",
        }
    }
}

/// Backdrop image sizes published by TMDB (16:9 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackdropSize {
    W300,
    W780,
    W1280,
    #[default]
    Original,
}

impl BackdropSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W300 => "w300",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}
