//! Delimited catalog file source.
//!
//! Reads the prize list from a comma-delimited text file. The files come
//! from spreadsheet exports in the wild, so the decoder sniffs a BOM first,
//! then tries strict UTF-8, then falls back to Shift-JIS.

use std::path::PathBuf;

use async_trait::async_trait;
use gashapon_domain::{CatalogEntry, EntryId, Rarity};

use crate::infrastructure::ports::{CatalogBatch, CatalogSource, CatalogSourceError};

/// Column count of a catalog row:
/// image-reference, display-name, rarity-tier, weight, identifier, title.
const CATALOG_COLUMNS: usize = 6;

/// Catalog source backed by a delimited file on disk.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, CatalogSourceError> {
        if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            if had_errors {
                return Err(CatalogSourceError::undecodable(self.path.display()));
            }
            return Ok(text.into_owned());
        }

        if let Ok(text) = std::str::from_utf8(bytes) {
            return Ok(text.to_string());
        }

        let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
        if had_errors {
            return Err(CatalogSourceError::undecodable(self.path.display()));
        }
        Ok(text.into_owned())
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<CatalogBatch, CatalogSourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogSourceError::io(self.path.display(), e))?;
        let text = self.decode(&bytes)?;

        let mut entries = Vec::new();
        let mut skipped = 0;
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_row(line) {
                Ok(entry) => entries.push(entry),
                Err(reason) => {
                    if index == 0 && looks_like_header(line) {
                        continue;
                    }
                    skipped += 1;
                    tracing::warn!(line = index + 1, %reason, "Skipping malformed catalog row");
                }
            }
        }

        Ok(CatalogBatch { entries, skipped })
    }
}

#[derive(Debug, thiserror::Error)]
enum RowError {
    #[error("expected {CATALOG_COLUMNS} columns, got {0}")]
    ColumnCount(usize),
    #[error("bad weight: {0}")]
    Weight(String),
    #[error("unknown rarity tier: {0}")]
    Rarity(String),
    #[error("invalid image url: {0}")]
    ImageUrl(String),
    #[error("empty identifier")]
    EmptyId,
}

fn parse_row(line: &str) -> Result<CatalogEntry, RowError> {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    if columns.len() != CATALOG_COLUMNS {
        return Err(RowError::ColumnCount(columns.len()));
    }

    let image_url = columns[0];
    let name = columns[1];
    let rarity: Rarity = columns[2]
        .parse()
        .map_err(|_| RowError::Rarity(columns[2].to_string()))?;
    let weight: f64 = columns[3]
        .parse()
        .map_err(|_| RowError::Weight(columns[3].to_string()))?;
    let id = columns[4];
    let title = columns[5];

    if !weight.is_finite() || weight <= 0.0 {
        return Err(RowError::Weight(columns[3].to_string()));
    }
    if id.is_empty() {
        return Err(RowError::EmptyId);
    }
    url::Url::parse(image_url).map_err(|_| RowError::ImageUrl(image_url.to_string()))?;

    Ok(CatalogEntry {
        id: EntryId::new(id),
        name: name.to_string(),
        title: title.to_string(),
        rarity,
        image_url: image_url.to_string(),
        weight,
    })
}

/// Spreadsheet exports keep the column names in the first row; a header
/// never has a numeric weight column.
fn looks_like_header(line: &str) -> bool {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    columns.len() == CATALOG_COLUMNS && columns[3].parse::<f64>().is_err()
}
