//! Heuristic parsing of scraped trend text.
//!
//! # Submodules
//!
//! - [`patterns`]: Regexes shared by the other submodules
//! - [`classifier`]: Groups visible lines into [`GameBlock`](crate::models::GameBlock)s (game mode)
//! - [`trend`]: Splits single trend strings into team/stat/record/sample (trend mode)
//! - [`reword`]: Template-based natural-language rendering of a parsed trend

pub mod classifier;
pub mod patterns;
pub mod reword;
pub mod trend;
