//! Diamond Export - RapNet Listing Reports
//!
//! Fetches diamond listings from the RapNet API for every requested
//! saved-search, size-range, color and clarity combination and writes them
//! into per-search, per-size-range Excel workbooks with one sheet per
//! color/clarity combination.

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod flatten;
pub mod pipeline;
pub mod rapnet;
pub mod results;
pub mod template;

pub use config::{Config, SizeRange};
pub use error::{ExportError, Result};
pub use rapnet::{RapNetApi, SavedSearch};
pub use results::{CombinationKey, ResultSet};
