use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// The two kinds of titles a watchlist tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// Feature film
    Movie,
    /// Television series
    #[cfg_attr(feature = "serde", serde(alias = "tv"))]
    Series,
}

impl MediaKind {
    pub const ALL: [MediaKind; 2] = [MediaKind::Movie, MediaKind::Series];

    /// Path segment TMDB uses for this kind (`/search/{segment}`,
    /// `/{segment}/{id}/videos`). Also used inside cache keys.
    pub const fn tmdb_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Query parameter that narrows a TMDB search by year.
    pub const fn year_param(self) -> &'static str {
        match self {
            MediaKind::Movie => "year",
            MediaKind::Series => "first_air_date_year",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Series => write!(f, "Series"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "movies" | "film" => Ok(MediaKind::Movie),
            "series" | "tv" | "show" | "shows" => Ok(MediaKind::Series),
            _ => Err(ModelError::UnknownMediaKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("Movie".parse::<MediaKind>(), Ok(MediaKind::Movie));
        assert_eq!("tv".parse::<MediaKind>(), Ok(MediaKind::Series));
        assert_eq!(" series ".parse::<MediaKind>(), Ok(MediaKind::Series));
        assert!("podcast".parse::<MediaKind>().is_err());
    }

    #[test]
    fn series_uses_tv_endpoints() {
        assert_eq!(MediaKind::Series.tmdb_segment(), "tv");
        assert_eq!(MediaKind::Series.year_param(), "first_air_date_year");
        assert_eq!(MediaKind::Movie.year_param(), "year");
    }
}
