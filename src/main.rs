//! # Setlist
//!
//! Builds a setlist from a CSV song catalog: weighted random selection under
//! a time budget, then a mood-arc arrangement, printed or exported as text.
//!
//! ## Usage
//!
//! ```bash
//! # 90 minute set, two songs that must be played
//! setlist generate songs.csv --set-time 90 --include "Opener,Anthem"
//!
//! # Reproducible, exported for printing
//! setlist generate songs.csv --seed 12 --output tonight.txt
//!
//! # Catalog upkeep
//! setlist format songs.csv
//! setlist deactivate songs.csv "Song With Broken Capo"
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use setlist::catalog::Catalog;
use setlist::cli::{self, OutputFormat};
use setlist::config::{self, RuntimeConfig};
use setlist::generator::{SetlistGenerator, SetlistRequest};
use setlist::{completion, render};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn load_runtime_config(path: Option<PathBuf>) -> Result<RuntimeConfig> {
    match path {
        Some(path) => RuntimeConfig::with_config_path(path),
        None => RuntimeConfig::new(),
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Could not load catalog {}", path.display()))
}

/// Shared by `activate` and `deactivate`.
///
/// The file is left untouched when no title matches.
fn set_active(path: &Path, titles: &[String], active: bool) -> Result<()> {
    let mut catalog = load_catalog(path)?;
    let unmatched = catalog.set_active(titles, active);
    for title in &unmatched {
        eprintln!("warning: no song titled `{title}'");
    }

    let matched: BTreeSet<&str> = titles
        .iter()
        .map(String::as_str)
        .filter(|title| !unmatched.iter().any(|missing| missing == title))
        .collect();
    if matched.is_empty() {
        println!("No titles matched, {} left unchanged", path.display());
        return Ok(());
    }

    catalog
        .save(path)
        .with_context(|| format!("Could not save catalog {}", path.display()))?;
    println!(
        "Marked {} title(s) {}",
        matched.len(),
        if active { "active" } else { "inactive" }
    );
    Ok(())
}

/// Main entry point for the Setlist application.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug setlist generate songs.csv` - Enable debug logging
/// - `RUST_LOG=setlist::sampler=trace setlist generate songs.csv` - Every draw
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config_path = args.config;

    match args.command {
        cli::Command::Generate {
            catalog,
            set_time,
            transition_time,
            og_weight,
            mood_weight,
            cluster_size,
            og_artist,
            include,
            seed,
            format,
            output,
        } => {
            let defaults = load_runtime_config(config_path)?.defaults;
            let set_time = set_time.unwrap_or(defaults.set_time);
            let request = SetlistRequest {
                set_time,
                transition_time: transition_time
                    .unwrap_or_else(|| defaults.transition_time_for(set_time)),
                og_weight: og_weight.unwrap_or(defaults.og_weight),
                mood_weight: mood_weight.unwrap_or(defaults.mood_weight),
                cluster_size: cluster_size.unwrap_or(defaults.cluster_size),
                includes: cli::clean_includes(&include),
                og_artist: og_artist.unwrap_or(defaults.og_artist),
            };
            debug!("Generation request: {request:?}");

            let active = load_catalog(&catalog)?.active_only();
            info!("{} active songs in {}", active.len(), catalog.display());

            let mut generator =
                seed.map_or_else(SetlistGenerator::new, SetlistGenerator::with_seed);
            let setlist = generator.generate(&active, &request)?;
            for warning in &setlist.warnings {
                eprintln!("warning: {warning}");
            }

            let rendered = match format {
                OutputFormat::Text => render::render_text(&setlist.program),
                OutputFormat::List => render::render_list(&setlist.program).join("\n"),
                OutputFormat::Json => render::render_json(&setlist.program)?,
            };
            println!("{rendered}");

            if let Some(output) = output {
                render::export_to_file(&rendered, &output)?;
                eprintln!("Setlist written to {}", output.display());
            }
        }
        cli::Command::Active { catalog } => {
            for title in load_catalog(&catalog)?.active_titles() {
                println!("{title}");
            }
        }
        cli::Command::Format { catalog, output } => {
            let songs = load_catalog(&catalog)?;
            let destination = output.unwrap_or(catalog);
            songs
                .save(&destination)
                .with_context(|| format!("Could not write {}", destination.display()))?;
            println!("Catalog formatted: {} songs", songs.len());
        }
        cli::Command::Activate { catalog, titles } => set_active(&catalog, &titles, true)?,
        cli::Command::Deactivate { catalog, titles } => set_active(&catalog, &titles, false)?,
        cli::Command::Config { init } => {
            let runtime = load_runtime_config(config_path)?;
            if init && !runtime.config_path.exists() {
                config::write_defaults(&runtime.config_path, &runtime.defaults)?;
                eprintln!("Wrote defaults to {}", runtime.config_path.display());
            }
            println!("{}", serde_json::to_string_pretty(&runtime.defaults)?);
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            let shell = completion::shell_to_completion_shell(shell);
            completion::generate_completions(shell, &mut cmd);
        }
        cli::Command::CompletionEnhanced { shell } => {
            match completion::enhanced_completion_script(shell) {
                Some(script) => print!("{script}"),
                None => anyhow::bail!("Enhanced completions only supported for bash and fish"),
            }
        }
        cli::Command::CompleteTitles { catalog } => {
            completion::print_title_completions(&catalog)?;
        }
    }

    Ok(())
}
