use serde::{Deserialize, Serialize};

/// Placeholder key; never counts as a shared key between two songs.
pub const MISC_KEY: &str = "Misc";
/// Baseline tuning; songs in it get no tuning annotation.
pub const STANDARD_TUNING: &str = "E Standard";
/// Artist value marking the special, flat-weighted category.
pub const OG_ARTIST: &str = "OG";

pub const DEFAULT_TITLE: &str = "Unknown Song";
pub const DEFAULT_ARTIST: &str = "Unknown Artist";
pub const DEFAULT_TIME: f64 = 1.0;
/// Used both for a missing `Mood` column and for blank mood cells.
pub const DEFAULT_MOOD: f64 = 5.0;

/// One playable song in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Lookup key for includes. Not required to be unique.
    pub title: String,
    pub artist: String,
    pub key: String,
    pub tuning: String,
    /// Length in minutes.
    pub time: f64,
    /// Higher is more energetic. Usually 1 to 10.
    pub mood: f64,
    /// Filtering on this happens in [`crate::catalog`], never in the core.
    pub active: bool,
}

impl Default for Song {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            artist: DEFAULT_ARTIST.to_string(),
            key: MISC_KEY.to_string(),
            tuning: STANDARD_TUNING.to_string(),
            time: DEFAULT_TIME,
            mood: DEFAULT_MOOD,
            active: true,
        }
    }
}

impl Song {
    /// Shorthand for tests and benches: everything else defaulted.
    #[must_use]
    pub fn new(title: &str, artist: &str, time: f64, mood: f64) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            time,
            mood,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: &str, tuning: &str) -> Self {
        self.key = key.to_string();
        self.tuning = tuning.to_string();
        self
    }

    #[must_use]
    pub fn is_og(&self, og_artist: &str) -> bool {
        self.artist == og_artist
    }

    /// Whether going from `self` into `next` needs no retune or key change.
    ///
    /// The `Misc` key is a catch-all and never chains.
    #[must_use]
    pub fn flows_into(&self, next: &Song) -> bool {
        self.key != MISC_KEY && self.key == next.key && self.tuning == next.tuning
    }

    #[must_use]
    pub fn is_standard_tuning(&self) -> bool {
        self.tuning == STANDARD_TUNING
    }
}
