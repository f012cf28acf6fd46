//! Catalog building and lookup logic.
//!
//! Turns raw dataset records into a `Catalog`: normalizes every record,
//! keeps dataset order, and fills the title/id lookup tables.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{info, instrument, warn};

impl Catalog {
    /// Build a catalog from raw records, preserving their order.
    ///
    /// Fails on the first record without a usable id. An empty input gives
    /// an empty catalog; rejecting that is up to whoever builds indices on it.
    pub fn from_records(records: Vec<RawMovie>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for (record, raw) in records.iter().enumerate() {
            catalog.insert_entry(CatalogEntry::from_raw(raw, record)?);
        }
        Ok(catalog)
    }

    /// Load and normalize a catalog file.
    ///
    /// The format is picked from the extension (`.json`, `.jsonl`, `.ndjson`).
    #[instrument]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);

        let records = parser::parse_catalog(path)?;
        let catalog = Self::from_records(records)?;

        let (entries, genres) = catalog.counts();
        if entries == 0 {
            warn!("Catalog file {:?} contains no records", path);
        }
        info!("Loaded {} movies covering {} genres", entries, genres);

        Ok(catalog)
    }

    /// Case-insensitive title search.
    ///
    /// Exact title matches come first, then substring matches; each group
    /// keeps catalog order.
    pub fn search_title(&self, query: &str) -> Vec<RowIndex> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, RowIndex)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(row, entry)| {
                if entry.title_lower == needle {
                    Some((0, row))
                } else if entry.title_lower.contains(&needle) {
                    Some((1, row))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|&(rank, row)| (rank, row));
        matches.into_iter().map(|(_, row)| row).collect()
    }
}
