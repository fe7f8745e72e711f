//! Weighted song selection under a time budget.
//!
//! Forced includes go in first, in the order they were asked for. After that
//! songs are drawn one at a time, each draw weighted over the songs not yet
//! chosen, until the budget is met or the first drawn song no longer fits.

use crate::catalog::Catalog;
use crate::error::{Result, SetlistError, Warning};
use crate::song::{Song, OG_ARTIST};
use log::{debug, trace, warn};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Serialize;

/// Immutable parameters for one selection.
#[derive(Debug, Clone)]
pub struct SamplingContext {
    /// Budget in minutes, usually set time minus a transition allowance.
    pub target_time: f64,
    /// Flat weight for every song by [`Self::og_artist`].
    pub og_weight: f64,
    /// Exponent applied to every other song's mood.
    pub mood_weight: f64,
    /// Titles that must open the selection, in this order.
    pub includes: Vec<String>,
    pub og_artist: String,
}

impl Default for SamplingContext {
    fn default() -> Self {
        Self {
            target_time: 54.0,
            og_weight: 1.2,
            mood_weight: 0.8,
            includes: Vec::new(),
            og_artist: OG_ARTIST.to_string(),
        }
    }
}

impl SamplingContext {
    /// # Errors
    ///
    /// [`SetlistError::InvalidConfiguration`] for a negative or non-finite
    /// budget, a non-positive `og_weight`, or a non-finite `mood_weight`.
    pub fn validate(&self) -> Result<()> {
        if !self.target_time.is_finite() || self.target_time < 0.0 {
            return Err(SetlistError::invalid_config(format!(
                "target time must be a non-negative number of minutes, got {}",
                self.target_time
            )));
        }
        if !self.og_weight.is_finite() || self.og_weight <= 0.0 {
            return Err(SetlistError::invalid_config(format!(
                "og weight must be greater than zero, got {}",
                self.og_weight
            )));
        }
        if !self.mood_weight.is_finite() {
            return Err(SetlistError::invalid_config(format!(
                "mood weight must be a finite exponent, got {}",
                self.mood_weight
            )));
        }
        Ok(())
    }
}

/// Songs chosen for one request, in selection order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Selection {
    pub songs: Vec<Song>,
    pub total_time: f64,
    pub warnings: Vec<Warning>,
}

impl Selection {
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.songs.iter().map(|song| song.title.as_str()).collect()
    }

    fn push(&mut self, song: &Song) {
        self.total_time += song.time;
        self.songs.push(song.clone());
    }

    fn warn(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Sampling weight of a single song.
///
/// Songs by the special artist get the flat `og_weight`, everything else
/// `mood ^ mood_weight`. A negative mood is never drawn. The result may be
/// `+inf` (a zero mood under a negative exponent, or plain overflow); the
/// sampler itself works on [`log_weight`] so such songs still rank highest.
#[must_use]
pub fn song_weight(song: &Song, context: &SamplingContext) -> f64 {
    if song.is_og(&context.og_artist) {
        return context.og_weight;
    }
    if !(song.mood >= 0.0) {
        return 0.0;
    }
    let weight = song.mood.powf(context.mood_weight);
    if weight.is_nan() {
        0.0
    } else {
        weight
    }
}

/// Natural log of [`song_weight`], computed without overflowing.
///
/// `-inf` means the song is never drawn.
#[must_use]
pub fn log_weight(song: &Song, context: &SamplingContext) -> f64 {
    let log = if song.is_og(&context.og_artist) {
        context.og_weight.ln()
    } else if !(song.mood >= 0.0) {
        f64::NEG_INFINITY
    } else if context.mood_weight == 0.0 {
        // x^0 is 1 for every mood, zero included.
        0.0
    } else {
        context.mood_weight * song.mood.ln()
    };

    if log.is_nan() {
        trace!("Unusable weight for `{}', treating as zero.", song.title);
        f64::NEG_INFINITY
    } else {
        log
    }
}

/// Turns log weights into weights relative to the largest one.
///
/// The largest weight becomes 1, so the total never overflows. If any weight
/// is infinite, only the infinite ones keep a share. `None` when every weight
/// is zero.
fn relative_weights(log_weights: &[f64]) -> Option<Vec<f64>> {
    let peak = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if peak.is_infinite() && peak < 0.0 {
        return None;
    }

    let weights = log_weights
        .iter()
        .map(|&log| {
            if peak.is_infinite() {
                if log.is_infinite() && log > 0.0 { 1.0 } else { 0.0 }
            } else {
                (log - peak).exp()
            }
        })
        .collect();
    Some(weights)
}

/// Builds a [`Selection`] from `catalog`.
///
/// `rng` is the only source of randomness; seed it to reproduce a run.
///
/// # Errors
///
/// Only [`SetlistError::InvalidConfiguration`] from [`SamplingContext::validate`].
/// Per-song problems end up in [`Selection::warnings`].
pub fn select<R: Rng + ?Sized>(
    catalog: &Catalog,
    context: &SamplingContext,
    rng: &mut R,
) -> Result<Selection> {
    context.validate()?;

    let songs = catalog.songs();
    let mut selection = Selection::default();
    let mut taken = vec![false; songs.len()];

    // Special category first, then the rest. Both keep catalog order.
    let (og, rest): (Vec<usize>, Vec<usize>) =
        (0..songs.len()).partition(|&i| songs[i].is_og(&context.og_artist));
    debug!("Sampling pool: {} og songs, {} others", og.len(), rest.len());
    let pool: Vec<(usize, f64)> = og
        .into_iter()
        .chain(rest)
        .map(|i| (i, log_weight(&songs[i], context)))
        .collect();

    for title in &context.includes {
        // Titles need not be unique; the first match is the one included.
        let Some(index) = songs.iter().position(|song| &song.title == title) else {
            selection.warn(Warning::NotFound { title: title.clone() });
            continue;
        };
        let song = &songs[index];
        if taken[index] {
            selection.warn(Warning::AlreadySelected { title: title.clone() });
        } else if selection.total_time + song.time > context.target_time {
            selection.warn(Warning::CapacityExceeded {
                title: title.clone(),
                time: song.time,
                remaining: context.target_time - selection.total_time,
            });
        } else {
            debug!("Including `{title}' ({} min)", song.time);
            selection.push(song);
            taken[index] = true;
        }
    }

    while selection.total_time < context.target_time {
        let eligible: Vec<(usize, f64)> =
            pool.iter().copied().filter(|&(i, _)| !taken[i]).collect();
        if eligible.is_empty() {
            debug!("Catalog exhausted at {:.1} min", selection.total_time);
            break;
        }

        // WeightedIndex normalizes over exactly the remaining songs.
        let log_weights: Vec<f64> = eligible.iter().map(|&(_, log)| log).collect();
        let distribution = relative_weights(&log_weights)
            .and_then(|weights| WeightedIndex::new(&weights).ok());
        let Some(distribution) = distribution else {
            selection.warn(Warning::NoSamplingWeight { eligible: eligible.len() });
            break;
        };
        let (index, log) = eligible[distribution.sample(&mut *rng)];
        let song = &songs[index];
        trace!("Drew `{}' (log weight {log:.3}, {} min)", song.title, song.time);

        // No second draw: the first song that overflows ends the selection.
        if selection.total_time + song.time > context.target_time {
            debug!(
                "`{}' would overflow {:.1}/{:.1} min, stopping",
                song.title, selection.total_time, context.target_time
            );
            break;
        }

        selection.push(song);
        taken[index] = true;
    }

    debug!(
        "Selected {} songs, {:.1} of {:.1} min, {} warnings",
        selection.songs.len(),
        selection.total_time,
        context.target_time,
        selection.warnings.len()
    );
    Ok(selection)
}
