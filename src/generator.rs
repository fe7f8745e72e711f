//! One-call setlist generation: sample, then arrange.
//!
//! [`SetlistGenerator`] owns the single random source used by both stages, so
//! seeding it reproduces a whole run. Give each concurrent caller its own
//! generator.

use crate::arranger::{self, Program};
use crate::catalog::Catalog;
use crate::config::GenerationDefaults;
use crate::error::{Result, SetlistError, Warning};
use crate::sampler::{self, SamplingContext};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Everything a caller chooses for one setlist.
#[derive(Debug, Clone, PartialEq)]
pub struct SetlistRequest {
    pub set_time: f64,
    pub transition_time: f64,
    pub og_weight: f64,
    pub mood_weight: f64,
    pub cluster_size: usize,
    pub includes: Vec<String>,
    pub og_artist: String,
}

impl Default for SetlistRequest {
    fn default() -> Self {
        Self::from_defaults(&GenerationDefaults::default())
    }
}

impl SetlistRequest {
    #[must_use]
    pub fn from_defaults(defaults: &GenerationDefaults) -> Self {
        Self {
            set_time: defaults.set_time,
            transition_time: defaults.transition_time_for(defaults.set_time),
            og_weight: defaults.og_weight,
            mood_weight: defaults.mood_weight,
            cluster_size: defaults.cluster_size,
            includes: Vec::new(),
            og_artist: defaults.og_artist.clone(),
        }
    }

    /// Minutes available for songs.
    #[must_use]
    pub fn target_time(&self) -> f64 {
        self.set_time - self.transition_time
    }

    /// # Errors
    ///
    /// [`SetlistError::InvalidConfiguration`] if the transition allowance is
    /// negative or larger than the set, or the cluster size is zero.
    pub fn sampling_context(&self) -> Result<SamplingContext> {
        if !(self.transition_time >= 0.0) {
            return Err(SetlistError::invalid_config(format!(
                "transition time must not be negative, got {}",
                self.transition_time
            )));
        }
        if self.transition_time > self.set_time {
            return Err(SetlistError::invalid_config(format!(
                "transition time ({}) is longer than the set ({})",
                self.transition_time, self.set_time
            )));
        }
        if self.cluster_size == 0 {
            return Err(SetlistError::invalid_config("cluster size must be at least 1"));
        }

        let context = SamplingContext {
            target_time: self.target_time(),
            og_weight: self.og_weight,
            mood_weight: self.mood_weight,
            includes: self.includes.clone(),
            og_artist: self.og_artist.clone(),
        };
        context.validate()?;
        Ok(context)
    }
}

/// Result of one generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedSetlist {
    pub program: Program,
    pub target_time: f64,
    pub warnings: Vec<Warning>,
}

/// Samples and arranges with the given random source.
///
/// All parameters are validated before the catalog is touched, so an error
/// never comes with a partial setlist.
///
/// # Errors
///
/// [`SetlistError::InvalidConfiguration`] for any out-of-range parameter.
pub fn generate<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &SetlistRequest,
    rng: &mut R,
) -> Result<GeneratedSetlist> {
    let context = request.sampling_context()?;

    let selection = sampler::select(catalog, &context, rng)?;
    let warnings = selection.warnings;
    let program = arranger::arrange(selection.songs, request.cluster_size, rng)?;

    info!(
        "Generated {} songs, {:.1} of {:.1} min",
        program.len(),
        program.total_time(),
        context.target_time
    );
    Ok(GeneratedSetlist { program, target_time: context.target_time, warnings })
}

/// Holds the random source across requests.
#[derive(Debug, Clone)]
pub struct SetlistGenerator {
    rng: StdRng,
}

impl SetlistGenerator {
    /// Seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible: same seed, catalog and request give the same setlist.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// See [`generate`].
    pub fn generate(
        &mut self,
        catalog: &Catalog,
        request: &SetlistRequest,
    ) -> Result<GeneratedSetlist> {
        generate(catalog, request, &mut self.rng)
    }
}

impl Default for SetlistGenerator {
    fn default() -> Self {
        Self::new()
    }
}
