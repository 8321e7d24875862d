//! Published Google Sheet as the source of [`BaseRecord`]s.

pub mod columns;
pub mod csv;

use marquee_model::{BaseRecord, MediaKind};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub use columns::record_from_row;

pub const GOOGLE_SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d/";

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Sheet fetch failed: {status}")]
    Status { sheet: String, status: u16 },

    #[error("Sheet fetch failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid sheet URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Downloads named sheets of one spreadsheet as CSV.
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    sheet_id: String,
    base_url: String,
}

impl SheetClient {
    pub fn new(sheet_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            sheet_id: sheet_id.into(),
            base_url: GOOGLE_SHEETS_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    /// `{base}/{id}/gviz/tq?tqx=out:csv&sheet={name}`
    pub fn csv_url(&self, sheet: &str) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.base_url)?
            .join(&format!("{}/gviz/tq", self.sheet_id))?;
        url.query_pairs_mut()
            .append_pair("tqx", "out:csv")
            .append_pair("sheet", sheet);
        Ok(url)
    }

    pub async fn fetch_csv(&self, sheet: &str) -> Result<String, SheetError> {
        let url = self.csv_url(sheet)?;
        debug!(%url, "fetching sheet");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status {
                sheet: sheet.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches a sheet and normalizes its rows; untitled rows are dropped.
    pub async fn fetch_records(
        &self,
        sheet: &str,
        kind: MediaKind,
    ) -> Result<Vec<BaseRecord>, SheetError> {
        let text = self.fetch_csv(sheet).await?;
        let records = records_from_csv(&text, kind);
        info!(sheet, %kind, count = records.len(), "sheet loaded");
        Ok(records)
    }
}

/// Parses a whole CSV export into records of one kind.
pub fn records_from_csv(text: &str, kind: MediaKind) -> Vec<BaseRecord> {
    csv::parse_rows(text)
        .iter()
        .filter_map(|row| record_from_row(row, kind))
        .collect()
}
