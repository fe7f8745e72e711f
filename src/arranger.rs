//! # Cluster Arranger
//!
//! Turns a flat [`Selection`](crate::sampler::Selection) into a setlist with a
//! mood arc: a strong opening cluster, a shuffled middle, and a close whose
//! mood rises into the final song.
//!
//! ## Steps
//!
//! 1. Sort songs by mood, highest first (stable on ties).
//! 2. Cut into clusters of `cluster_size`; the last one may be short.
//! 3. **Opening promotion**: if the first cluster peaks below
//!    [`OPENING_FLOOR`], swap in the first later cluster that peaks at
//!    [`HIGH_MOOD`] or above. Then sort the first cluster descending.
//! 4. Shuffle every cluster strictly between first and last.
//! 5. **Closing promotion**: if the last cluster peaks below [`HIGH_MOOD`],
//!    walk backward from the second-to-last cluster (the first cluster
//!    included) and swap in the first one that peaks at [`HIGH_MOOD`] or
//!    above. Then sort the last cluster *ascending*.
//!
//! The closing scan does not protect the opener. When the only high cluster
//! sits at the front, closing promotion moves it to the end.

use crate::error::{Result, SetlistError};
use crate::song::Song;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// The opening cluster is replaced if its best song is below this.
pub const OPENING_FLOOR: f64 = 7.0;
/// A cluster peaking at or above this may be promoted to either end; the
/// closing cluster is replaced if it peaks below it.
pub const HIGH_MOOD: f64 = 8.0;

/// Arranged setlist, kept as its clusters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    clusters: Vec<Vec<Song>>,
}

impl Program {
    #[must_use]
    pub fn clusters(&self) -> &[Vec<Song>] {
        &self.clusters
    }

    /// Songs in play order.
    pub fn songs(&self) -> impl Iterator<Item = &Song> + '_ {
        self.clusters.iter().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.songs().map(|song| song.time).sum()
    }

    #[must_use]
    pub fn into_songs(self) -> Vec<Song> {
        self.clusters.into_iter().flatten().collect()
    }
}

/// Arranges `songs` into a [`Program`].
///
/// # Errors
///
/// [`SetlistError::InvalidConfiguration`] if `cluster_size` is zero. This is
/// checked before anything else, an empty selection included.
pub fn arrange<R: Rng + ?Sized>(
    mut songs: Vec<Song>,
    cluster_size: usize,
    rng: &mut R,
) -> Result<Program> {
    if cluster_size == 0 {
        return Err(SetlistError::invalid_config("cluster size must be at least 1"));
    }
    if songs.is_empty() {
        debug!("Nothing to arrange");
        return Ok(Program::default());
    }

    sort_descending(&mut songs);
    let mut clusters: Vec<Vec<Song>> = songs.chunks(cluster_size).map(<[Song]>::to_vec).collect();
    debug!(
        "Arranging {} songs into {} clusters of up to {cluster_size}",
        songs.len(),
        clusters.len()
    );

    arrange_clusters(&mut clusters, rng);
    Ok(Program { clusters })
}

/// Steps 3 to 5 on pre-built, non-empty clusters.
pub(crate) fn arrange_clusters<R: Rng + ?Sized>(clusters: &mut [Vec<Song>], rng: &mut R) {
    let count = clusters.len();
    if count == 0 {
        return;
    }

    if peak(&clusters[0]) < OPENING_FLOOR {
        if let Some(i) = (1..count).find(|&i| peak(&clusters[i]) >= HIGH_MOOD) {
            trace!("Promoting cluster {i} to open");
            clusters.swap(0, i);
        }
    }
    sort_descending(&mut clusters[0]);

    if count > 2 {
        clusters[1..count - 1].shuffle(rng);
    }

    let last = count - 1;
    if peak(&clusters[last]) < HIGH_MOOD {
        if let Some(i) = (0..last).rev().find(|&i| peak(&clusters[i]) >= HIGH_MOOD) {
            trace!("Promoting cluster {i} to close");
            clusters.swap(i, last);
        }
    }
    // A lone cluster stays descending.
    if count > 1 {
        clusters[last].sort_by(|a, b| a.mood.total_cmp(&b.mood));
    }
}

fn sort_descending(songs: &mut [Song]) {
    songs.sort_by(|a, b| b.mood.total_cmp(&a.mood));
}

/// Highest mood in a cluster.
fn peak(cluster: &[Song]) -> f64 {
    cluster.iter().map(|song| song.mood).fold(f64::NEG_INFINITY, f64::max)
}
