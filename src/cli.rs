//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `setlist` binary.
//!
//! ## Commands
//!
//! - `generate`: Build a setlist from a catalog file
//! - `active`: List the active songs in a catalog
//! - `format`: Rewrite a catalog with every column filled in
//! - `activate` / `deactivate`: Flip `Active` flags by title
//! - `config`: Show or create the defaults file
//! - `completion` / `completion-enhanced`: Shell completion scripts
//!
//! ## Examples
//!
//! ```bash
//! setlist generate songs.csv --set-time 90 --include "Opener,Closer"
//! setlist generate songs.csv --seed 7 --output tonight.txt
//! setlist deactivate songs.csv "Broken String Blues"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// How a generated setlist is printed or exported.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Titles with `-->` continuity markers and tuning notes
    #[default]
    Text,
    /// Bare titles, one per line
    List,
    /// Full song records as JSON
    Json,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(about = "Setlist: weighted, mood-arranged setlists from a song catalog")]
#[command(version)]
pub struct Args {
    /// Defaults file to use instead of the platform config path
    #[arg(long, global = true, env = "SETLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a setlist from a catalog
    ///
    /// Only songs marked Active are considered. Forced includes open the
    /// selection in the order given; the rest is drawn at random, weighted
    /// by mood, until the set is full. The result is arranged for a strong
    /// opening and a rising close.
    Generate {
        /// Catalog CSV (Song, Artist, Key, Tuning, Time, Mood, Active)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        catalog: PathBuf,

        /// Total set length in minutes [default: 60]
        #[arg(long, short = 't')]
        set_time: Option<f64>,

        /// Minutes reserved for transitions [default: 10% of set time]
        #[arg(long)]
        transition_time: Option<f64>,

        /// Flat sampling weight for the special artist's songs [default: 1.2]
        #[arg(long)]
        og_weight: Option<f64>,

        /// Exponent applied to mood for all other songs [default: 0.8]
        #[arg(long, allow_negative_numbers = true)]
        mood_weight: Option<f64>,

        /// Songs per mood cluster [default: 2]
        #[arg(long, short = 'c')]
        cluster_size: Option<usize>,

        /// Artist whose songs get the flat og weight [default: OG]
        #[arg(long)]
        og_artist: Option<String>,

        /// Titles that must be played, comma separated or repeated
        #[arg(long, short = 'i', value_delimiter = ',')]
        include: Vec<String>,

        /// Seed for a reproducible setlist
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the rendered setlist to this file
        #[arg(long, short = 'o', value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// List the titles of all active songs
    Active {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        catalog: PathBuf,
    },

    /// Rewrite a catalog with all columns present and blanks filled in
    ///
    /// Missing columns and empty cells get their defaults: Unknown Song,
    /// Unknown Artist, Misc, E Standard, 1 minute, mood 5, active.
    Format {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        catalog: PathBuf,

        /// Write here instead of overwriting the catalog
        #[arg(long, short = 'o', value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Mark songs active by exact title
    Activate {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        catalog: PathBuf,

        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Mark songs inactive by exact title
    Deactivate {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        catalog: PathBuf,

        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Print the generation defaults in effect
    Config {
        /// Write the built-in defaults to the config file if it is missing
        #[arg(long)]
        init: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: setlist completion bash > ~/.local/share/bash-completion/completions/setlist
    Completion {
        shell: Shell,
    },

    /// Generate completions that also complete song titles
    ///
    /// The script asks `setlist complete-titles <catalog>` for the active
    /// titles of the catalog named on the command line, and offers them
    /// after `generate --include`.
    ///
    /// Usage: setlist completion-enhanced bash > ~/.local/share/bash-completion/completions/setlist
    /// Usage: setlist completion-enhanced fish > ~/.config/fish/completions/setlist.fish
    CompletionEnhanced {
        /// Shell to generate enhanced completions for (bash and fish supported)
        shell: Shell,
    },

    /// Print active titles for shell completion (hidden command)
    #[command(hide = true)]
    CompleteTitles {
        catalog: PathBuf,
    },
}

/// Trims include titles and drops empty entries (`--include ""`, `a,,b`).
#[must_use]
pub fn clean_includes(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|title| title.trim())
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .collect()
}
