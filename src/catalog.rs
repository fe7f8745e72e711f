//! # Catalog Module
//!
//! Loads and saves the song catalog, a CSV file with the columns
//!
//! ```text
//! Song,Artist,Key,Tuning,Time,Mood,Active
//! ```
//!
//! in any order. Columns that are missing altogether, and cells that are
//! blank, are backfilled with the defaults from [`crate::song`]. A cell that is
//! present but cannot be converted (`Time = soon`) is a hard
//! [`SetlistError::InvalidCatalog`], never silently defaulted.
//!
//! The core algorithms only ever see a [`Catalog`] that has already been
//! narrowed to active songs with [`Catalog::active_only`]. Rewriting `Active`
//! flags ([`Catalog::set_active`]) is a maintenance operation and is not used
//! by generation.

use crate::error::{Result, SetlistError};
use crate::song::{
    Song, DEFAULT_ARTIST, DEFAULT_MOOD, DEFAULT_TIME, DEFAULT_TITLE, MISC_KEY, STANDARD_TUNING,
};
use log::{debug, info, trace};
use std::io;
use std::path::Path;

/// Column headers, in the order the catalog is written back out.
pub const COLUMNS: [&str; 7] = ["Song", "Artist", "Key", "Tuning", "Time", "Mood", "Active"];

/// Ordered, in-memory song catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl From<Vec<Song>> for Catalog {
    fn from(songs: Vec<Song>) -> Self {
        Self { songs }
    }
}

impl FromIterator<Song> for Catalog {
    fn from_iter<I: IntoIterator<Item = Song>>(iter: I) -> Self {
        Self { songs: iter.into_iter().collect() }
    }
}

impl Catalog {
    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// A copy holding only the songs flagged active, order kept.
    #[must_use]
    pub fn active_only(&self) -> Catalog {
        self.songs.iter().filter(|song| song.active).cloned().collect()
    }

    /// Titles of all active songs, in catalog order.
    #[must_use]
    pub fn active_titles(&self) -> Vec<&str> {
        self.songs
            .iter()
            .filter(|song| song.active)
            .map(|song| song.title.as_str())
            .collect()
    }

    /// Sets `Active` on every song whose title is in `titles`.
    ///
    /// Returns the requested titles that matched nothing.
    pub fn set_active<S: AsRef<str>>(&mut self, titles: &[S], active: bool) -> Vec<String> {
        let mut unmatched = Vec::new();
        for title in titles {
            let title = title.as_ref();
            let mut hits = 0;
            for song in self.songs.iter_mut().filter(|song| song.title == title) {
                song.active = active;
                hits += 1;
            }
            trace!("Set active={active} on {hits} songs titled `{title}'.");
            if hits == 0 {
                unmatched.push(title.to_string());
            }
        }
        unmatched
    }

    /// Reads a catalog file from disk.
    ///
    /// # Errors
    ///
    /// [`SetlistError::Csv`] if the file is not readable CSV,
    /// [`SetlistError::InvalidCatalog`] if a numeric or boolean cell is unusable.
    pub fn load(path: &Path) -> Result<Catalog> {
        let file = std::fs::File::open(path).map_err(|source| SetlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file, path)?;
        info!("Loaded {} songs from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parses CSV from any reader. `origin` only labels errors.
    pub fn from_reader<R: io::Read>(reader: R, origin: &Path) -> Result<Catalog> {
        let csv_error = |source| SetlistError::Csv { path: origin.to_path_buf(), source };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let layout = ColumnLayout::locate(reader.headers().map_err(csv_error)?);
        debug!("Catalog column layout: {layout:?}");

        let mut songs = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, csv::Position::line);
            songs.push(layout.song_from(&record, line)?);
        }

        Ok(Catalog { songs })
    }

    /// Writes every column, backfilled values included.
    ///
    /// # Errors
    ///
    /// Returns [`SetlistError::Io`] or [`SetlistError::Csv`] on write failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|source| SetlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.to_writer(file, path)?;
        info!("Wrote {} songs to {}", self.len(), path.display());
        Ok(())
    }

    pub fn to_writer<W: io::Write>(&self, writer: W, origin: &Path) -> Result<()> {
        let csv_error = |source| SetlistError::Csv { path: origin.to_path_buf(), source };

        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(COLUMNS).map_err(csv_error)?;
        for song in &self.songs {
            writer
                .write_record([
                    song.title.as_str(),
                    song.artist.as_str(),
                    song.key.as_str(),
                    song.tuning.as_str(),
                    song.time.to_string().as_str(),
                    song.mood.to_string().as_str(),
                    if song.active { "True" } else { "False" },
                ])
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|source| SetlistError::Io {
            path: origin.to_path_buf(),
            source,
        })
    }
}

/// Position of each known column in the header row, if present.
#[derive(Debug, Default)]
struct ColumnLayout {
    title: Option<usize>,
    artist: Option<usize>,
    key: Option<usize>,
    tuning: Option<usize>,
    time: Option<usize>,
    mood: Option<usize>,
    active: Option<usize>,
}

impl ColumnLayout {
    fn locate(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|header| header == name);
        Self {
            title: find("Song"),
            artist: find("Artist"),
            key: find("Key"),
            tuning: find("Tuning"),
            time: find("Time"),
            mood: find("Mood"),
            active: find("Active"),
        }
    }

    fn song_from(&self, record: &csv::StringRecord, line: u64) -> Result<Song> {
        // Blank cells count as absent.
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
        };
        let text = |index: Option<usize>, default: &str| {
            cell(index).map_or_else(|| default.to_string(), str::to_string)
        };

        Ok(Song {
            title: text(self.title, DEFAULT_TITLE),
            artist: text(self.artist, DEFAULT_ARTIST),
            key: text(self.key, MISC_KEY),
            tuning: text(self.tuning, STANDARD_TUNING),
            time: parse_number(cell(self.time), "Time", line, DEFAULT_TIME)?,
            mood: parse_number(cell(self.mood), "Mood", line, DEFAULT_MOOD)?,
            active: parse_flag(cell(self.active), line)?,
        })
    }
}

fn parse_number(value: Option<&str>, column: &'static str, line: u64, default: f64) -> Result<f64> {
    let Some(value) = value else {
        return Ok(default);
    };
    let invalid = || SetlistError::InvalidCatalog { line, column, value: value.to_string() };

    match value.parse::<f64>() {
        // Spreadsheet exports write NaN for empty cells.
        Ok(number) if number.is_nan() => Ok(default),
        Ok(number) if !number.is_finite() => Err(invalid()),
        Ok(number) if column == "Time" && number < 0.0 => Err(invalid()),
        Ok(number) => Ok(number),
        Err(_) => Err(invalid()),
    }
}

fn parse_flag(value: Option<&str>, line: u64) -> Result<bool> {
    let Some(value) = value else {
        return Ok(true);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => Err(SetlistError::InvalidCatalog {
            line,
            column: "Active",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Catalog> {
        Catalog::from_reader(text.as_bytes(), Path::new("inline.csv"))
    }

    #[test]
    fn test_full_catalog_parses() {
        let catalog = parse(
            "Song,Artist,Key,Tuning,Time,Mood,Active\n\
             Opener,OG,A,E Standard,4.5,9,True\n\
             Ballad,Cover,C,Drop D,6,3,False\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let opener = &catalog.songs()[0];
        assert_eq!(opener.title, "Opener");
        assert_eq!(opener.artist, "OG");
        assert_eq!(opener.time, 4.5);
        assert_eq!(opener.mood, 9.0);
        assert!(opener.active);
        assert_eq!(catalog.songs()[1].tuning, "Drop D");
        assert!(!catalog.songs()[1].active);
    }

    #[test]
    fn test_missing_columns_are_backfilled() {
        let catalog = parse("Mood,Song\n7,Only Title\n").unwrap();
        let song = &catalog.songs()[0];
        assert_eq!(song.title, "Only Title");
        assert_eq!(song.artist, DEFAULT_ARTIST);
        assert_eq!(song.key, MISC_KEY);
        assert_eq!(song.tuning, STANDARD_TUNING);
        assert_eq!(song.time, DEFAULT_TIME);
        assert_eq!(song.mood, 7.0);
        assert!(song.active);
    }

    #[test]
    fn test_blank_cells_are_backfilled() {
        let catalog = parse("Song,Artist,Time,Mood,Active\n,,,,\n").unwrap();
        assert_eq!(catalog.songs()[0], Song::default());
    }

    #[test]
    fn test_nan_mood_uses_default() {
        let catalog = parse("Song,Mood\nX,NaN\n").unwrap();
        assert_eq!(catalog.songs()[0].mood, DEFAULT_MOOD);
    }

    #[test]
    fn test_non_numeric_time_is_rejected() {
        let err = parse("Song,Time\nFine,3\nBroken,soon\n").unwrap_err();
        match err {
            SetlistError::InvalidCatalog { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Time");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_time_is_rejected() {
        assert!(matches!(
            parse("Song,Time\nBackwards,-2\n"),
            Err(SetlistError::InvalidCatalog { column: "Time", .. })
        ));
    }

    #[test]
    fn test_unknown_active_value_is_rejected() {
        assert!(matches!(
            parse("Song,Active\nMaybe,perhaps\n"),
            Err(SetlistError::InvalidCatalog { column: "Active", .. })
        ));
    }

    #[test]
    fn test_empty_file_is_empty_catalog() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_active_only_keeps_order() {
        let mut songs = vec![
            Song::new("One", "X", 3.0, 5.0),
            Song::new("Two", "X", 3.0, 5.0),
            Song::new("Three", "X", 3.0, 5.0),
        ];
        songs[1].active = false;
        let catalog = Catalog::from(songs);

        assert_eq!(catalog.active_titles(), vec!["One", "Three"]);
        let active = catalog.active_only();
        assert_eq!(active.len(), 2);
        assert_eq!(active.songs()[1].title, "Three");
    }

    #[test]
    fn test_set_active_reports_unmatched_titles() {
        let mut catalog = Catalog::from(vec![
            Song::new("Dup", "X", 3.0, 5.0),
            Song::new("Dup", "Y", 3.0, 5.0),
            Song::new("Other", "X", 3.0, 5.0),
        ]);

        let unmatched = catalog.set_active(&["Dup", "Missing"], false);

        assert_eq!(unmatched, vec!["Missing".to_string()]);
        assert_eq!(catalog.active_titles(), vec!["Other"]);
    }

    #[test]
    fn test_written_catalog_reads_back_identically() {
        let original = parse("Song,Tuning,Time\nA,Drop D,2.5\nB,,\n").unwrap();

        let mut buffer = Vec::new();
        original.to_writer(&mut buffer, Path::new("out.csv")).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Song,Artist,Key,Tuning,Time,Mood,Active\n"));
        assert!(text.contains("A,Unknown Artist,Misc,Drop D,2.5,5,True"));
        assert_eq!(parse(&text).unwrap(), original);
    }
}
