//! Setlist rendering and export.
//!
//! The text form is what goes on the stage floor: one title per line,
//! `-->` where the next song can follow without a key or tuning change, and
//! the tuning in parentheses for anything not in E Standard.
//!
//! ```text
//! Opener -->
//! Second Song
//! Heavy One (Drop D)
//! ```

use crate::arranger::Program;
use crate::error::{Result, SetlistError};
use crate::song::Song;
use log::info;
use path_absolutize::Absolutize;
use std::fs;
use std::path::Path;

/// Appended to a line that flows straight into the next one.
pub const CONTINUITY_MARKER: &str = " -->";

/// Annotated text, one song per line, no trailing newline.
#[must_use]
pub fn render_text(program: &Program) -> String {
    let songs: Vec<&Song> = program.songs().collect();
    songs
        .iter()
        .enumerate()
        .map(|(i, song)| render_line(song, songs.get(i + 1).copied()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_line(song: &Song, next: Option<&Song>) -> String {
    let mut line = song.title.clone();
    if next.is_some_and(|next| song.flows_into(next)) {
        line.push_str(CONTINUITY_MARKER);
    }
    if !song.is_standard_tuning() {
        line.push_str(&format!(" ({})", song.tuning));
    }
    line
}

/// Titles only, in play order.
#[must_use]
pub fn render_list(program: &Program) -> Vec<String> {
    program.songs().map(|song| song.title.clone()).collect()
}

/// Full song records in play order, as pretty-printed JSON.
///
/// # Errors
///
/// Only if serialization fails, which plain song records never do.
pub fn render_json(program: &Program) -> serde_json::Result<String> {
    let songs: Vec<&Song> = program.songs().collect();
    serde_json::to_string_pretty(&songs)
}

/// Writes `text` to `path` exactly as given.
///
/// # Errors
///
/// [`SetlistError::Io`] if the file cannot be written.
pub fn export_to_file(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text).map_err(|source| SetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let shown = path.absolutize().map_or_else(|_| path.to_path_buf(), |p| p.into_owned());
    info!("Exported setlist to {}", shown.display());
    Ok(())
}
