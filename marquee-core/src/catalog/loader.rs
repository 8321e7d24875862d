use marquee_model::MediaKind;
use tracing::info;

use super::Catalog;
use crate::error::Result;
use crate::infra::sheets::SheetClient;

pub const DEFAULT_MOVIES_SHEET: &str = "movies";
pub const DEFAULT_SERIES_SHEET: &str = "List";

/// Loads both sheets of a spreadsheet into an un-enriched [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    sheets: SheetClient,
    movies_sheet: String,
    series_sheet: String,
}

impl CatalogLoader {
    pub fn new(sheets: SheetClient) -> Self {
        Self {
            sheets,
            movies_sheet: DEFAULT_MOVIES_SHEET.to_string(),
            series_sheet: DEFAULT_SERIES_SHEET.to_string(),
        }
    }

    pub fn with_sheet_names(
        mut self,
        movies: impl Into<String>,
        series: impl Into<String>,
    ) -> Self {
        self.movies_sheet = movies.into();
        self.series_sheet = series.into();
        self
    }

    pub fn sheet_name(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Movie => &self.movies_sheet,
            MediaKind::Series => &self.series_sheet,
        }
    }

    /// Fetches both sheets concurrently. Either failing fails the load.
    pub async fn load(&self) -> Result<Catalog> {
        let (movies, series) = tokio::try_join!(
            self.sheets.fetch_records(&self.movies_sheet, MediaKind::Movie),
            self.sheets.fetch_records(&self.series_sheet, MediaKind::Series),
        )?;

        info!(
            movies = movies.len(),
            series = series.len(),
            "catalog loaded"
        );
        Ok(Catalog::new(movies, series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sheet_names() {
        let loader = CatalogLoader::new(SheetClient::new("abc"));
        assert_eq!(loader.sheet_name(MediaKind::Movie), "movies");
        assert_eq!(loader.sheet_name(MediaKind::Series), "List");

        let loader = loader.with_sheet_names("Films", "Shows");
        assert_eq!(loader.sheet_name(MediaKind::Series), "Shows");
    }
}
