//! Property-based tests for selection and arrangement
//!
//! Invariants:
//! - A selection never runs past its target time
//! - No song is selected twice
//! - Every forced include is either selected or accounted for by a warning
//! - Arrangement neither drops nor duplicates songs, for any cluster size
//! - A fixed seed reproduces the same setlist

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use setlist::arranger;
use setlist::catalog::Catalog;
use setlist::generator::{SetlistGenerator, SetlistRequest};
use setlist::sampler::{self, SamplingContext};
use setlist::song::Song;

// ============================================================================
// Strategies
// ============================================================================

/// Catalogs of up to 24 uniquely titled songs, a third of them by `OG`.
fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec((1u32..=20, 0u32..=10, any::<bool>()), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (half_minutes, mood, og))| {
                let artist = if og && i % 3 == 0 { "OG" } else { "Cover" };
                let time = f64::from(half_minutes) / 2.0;
                Song::new(&format!("Song {i}"), artist, time, f64::from(mood))
            })
            .collect::<Catalog>()
    })
}

/// Include lists mixing real titles, repeats and titles that do not exist.
fn includes_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(0usize..30, 0..6)
        .prop_map(|picks| picks.into_iter().map(|i| format!("Song {i}")).collect())
}

fn sorted_titles<'a>(songs: impl Iterator<Item = &'a Song>) -> Vec<String> {
    let mut titles: Vec<String> = songs.map(|song| song.title.clone()).collect();
    titles.sort();
    titles
}

// ============================================================================
// Sampler properties
// ============================================================================

proptest! {
    #[test]
    fn selection_fits_the_budget(
        catalog in catalog_strategy(),
        includes in includes_strategy(),
        target in 0u32..=80,
        seed in any::<u64>(),
    ) {
        let context = SamplingContext {
            target_time: f64::from(target),
            includes,
            ..SamplingContext::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let selection = sampler::select(&catalog, &context, &mut rng).unwrap();

        prop_assert!(selection.total_time <= context.target_time);
        let summed: f64 = selection.songs.iter().map(|song| song.time).sum();
        prop_assert!((summed - selection.total_time).abs() < 1e-9);
    }

    #[test]
    fn selection_has_no_duplicates(
        catalog in catalog_strategy(),
        includes in includes_strategy(),
        target in 0u32..=200,
        seed in any::<u64>(),
    ) {
        let context = SamplingContext {
            target_time: f64::from(target),
            includes,
            ..SamplingContext::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let selection = sampler::select(&catalog, &context, &mut rng).unwrap();

        let mut titles = selection.titles();
        let count = titles.len();
        titles.sort_unstable();
        titles.dedup();
        prop_assert_eq!(titles.len(), count);
    }

    #[test]
    fn includes_are_selected_or_warned(
        catalog in catalog_strategy(),
        includes in includes_strategy(),
        target in 0u32..=80,
        seed in any::<u64>(),
    ) {
        let context = SamplingContext {
            target_time: f64::from(target),
            includes: includes.clone(),
            ..SamplingContext::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let selection = sampler::select(&catalog, &context, &mut rng).unwrap();

        let selected = selection.titles();
        for title in &includes {
            let warned = selection.warnings.iter().any(|w| w.title() == Some(title.as_str()));
            prop_assert!(
                selected.contains(&title.as_str()) || warned,
                "include `{}' neither selected nor warned", title
            );
        }
    }

    #[test]
    fn first_include_that_fits_opens_the_selection(
        catalog in catalog_strategy(),
        pick in 0usize..24,
        seed in any::<u64>(),
    ) {
        prop_assume!(pick < catalog.len());
        let song = &catalog.songs()[pick];
        let context = SamplingContext {
            target_time: song.time,
            includes: vec![song.title.clone()],
            ..SamplingContext::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let selection = sampler::select(&catalog, &context, &mut rng).unwrap();

        prop_assert_eq!(selection.titles().first().copied(), Some(song.title.as_str()));
        prop_assert!(selection.warnings.is_empty());
    }
}

// ============================================================================
// Arranger and pipeline properties
// ============================================================================

proptest! {
    #[test]
    fn arrangement_preserves_songs(
        catalog in catalog_strategy(),
        cluster_size in 1usize..6,
        seed in any::<u64>(),
    ) {
        let songs = catalog.songs().to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        let program = arranger::arrange(songs.clone(), cluster_size, &mut rng).unwrap();

        prop_assert_eq!(sorted_titles(program.songs()), sorted_titles(songs.iter()));
        prop_assert!(program.clusters().iter().all(|c| !c.is_empty() && c.len() <= cluster_size));
    }

    #[test]
    fn multi_cluster_programs_close_rising(
        catalog in catalog_strategy(),
        cluster_size in 1usize..4,
        seed in any::<u64>(),
    ) {
        let program = arranger::arrange(
            catalog.songs().to_vec(),
            cluster_size,
            &mut StdRng::seed_from_u64(seed),
        ).unwrap();

        if program.clusters().len() > 1 {
            let last = program.clusters().last().unwrap();
            prop_assert!(last.windows(2).all(|pair| pair[0].mood <= pair[1].mood));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible(
        catalog in catalog_strategy(),
        set_time in 1u32..=90,
        seed in any::<u64>(),
    ) {
        let request = SetlistRequest {
            set_time: f64::from(set_time),
            transition_time: f64::from(set_time) / 10.0,
            ..SetlistRequest::default()
        };

        let first = SetlistGenerator::with_seed(seed).generate(&catalog, &request).unwrap();
        let second = SetlistGenerator::with_seed(seed).generate(&catalog, &request).unwrap();

        let first: Vec<String> = first.program.songs().map(|s| s.title.clone()).collect();
        let second: Vec<String> = second.program.songs().map(|s| s.title.clone()).collect();
        prop_assert_eq!(first, second);
    }
}
