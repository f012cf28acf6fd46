//! # Catalog Crate
//!
//! This crate loads the fixed movie catalog the recommendation engine ranks
//! against, and owns the text normalization shared by catalog records and
//! incoming queries.
//!
//! ## Main Components
//!
//! - **types**: `RawMovie`, `CatalogEntry`, `Catalog`
//! - **normalize**: collapse `{name}` lists into normalized token strings
//! - **parser**: read `.json` / `.jsonl` dataset files
//! - **index**: build a `Catalog` from records, title search
//! - **error**: `DataError`
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/sample_catalog.json"))?;
//! let row = catalog.position_by_title("The Matrix").unwrap();
//! println!("{} has genres {:?}", catalog.get(row).unwrap().title, catalog.get(row).unwrap().genres);
//! ```

pub mod error;
pub mod types;
pub mod normalize;
pub mod parser;
pub mod index;

pub use error::{DataError, Result};
pub use normalize::{EntryShape, clean_text, named_values, normalize_named, normalize_token, token_set};
pub use types::{Catalog, CatalogEntry, MovieId, RawMovie, RowIndex};
