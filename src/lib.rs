//! Weighted, mood-arranged setlists from a song catalog.
//!
//! Core modules:
//! - [`sampler`] - Weighted song selection under a time budget
//! - [`arranger`] - Mood clustering and boundary promotion
//! - [`render`] - Text, list and JSON output, file export
//! - [`generator`] - One-call pipeline owning the random source
//!
//! ### Supporting Modules
//!
//! - [`song`] / [`catalog`] - Song records and CSV catalog loading
//! - [`error`] - Fatal errors and per-song warnings
//! - [`config`] - Generation defaults file
//! - [`cli`] / [`completion`] - Command-line definitions and shell completion
//!
//! ## Quick Start Example
//!
//! ```
//! use setlist::catalog::Catalog;
//! use setlist::generator::{SetlistGenerator, SetlistRequest};
//! use setlist::render;
//! use setlist::song::Song;
//!
//! let catalog = Catalog::from(vec![
//!     Song::new("Opener", "OG", 4.0, 9.0),
//!     Song::new("Slow One", "Cover", 5.0, 3.0),
//!     Song::new("Anthem", "Cover", 4.5, 8.0),
//! ]);
//! let request = SetlistRequest {
//!     set_time: 15.0,
//!     transition_time: 1.5,
//!     includes: vec!["Opener".to_string()],
//!     ..SetlistRequest::default()
//! };
//!
//! let setlist = SetlistGenerator::with_seed(7).generate(&catalog, &request)?;
//! assert!(setlist.program.total_time() <= 13.5);
//! println!("{}", render::render_text(&setlist.program));
//! # Ok::<(), setlist::error::SetlistError>(())
//! ```
//!
//! ## Algorithm Details
//!
//! ### Selection
//! - Forced includes go first, in request order; missing, duplicate or
//!   over-budget titles are skipped with a [`error::Warning`]
//! - Every other song is weighted `mood ^ mood_weight`; the special artist
//!   (default `OG`) gets a flat `og_weight` instead
//! - One weighted draw at a time over the songs left; the first draw that
//!   overflows the budget ends selection
//!
//! ### Arrangement
//! - Mood-descending clusters of `cluster_size`
//! - Weak opener swapped for a high-mood cluster, middle shuffled
//! - Weak closer swapped for a high-mood cluster found scanning backward,
//!   then sorted ascending so the set ends on its peak
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Only structural problems are
//! errors: bad parameters and unusable catalog cells. Per-song anomalies are
//! warnings carried alongside a successful result.

pub mod arranger;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod generator;
pub mod render;
pub mod sampler;
pub mod song;
