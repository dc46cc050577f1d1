//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Builds the games/trends documents and writes them atomically
//!
//! # Output Structure
//!
//! ```text
//! <working dir>/
//! ├── nhl_trends.json        # replaced on every successful run
//! ├── debug_page.html        # http backend, zero results or error
//! └── debug_screenshot.png   # chrome backend, zero results or error
//! ```

pub mod json;
