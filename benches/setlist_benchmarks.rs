//! # Setlist Performance Benchmarks
//!
//! Benchmarks for the hot paths of setlist generation.
//!
//! ## Benchmark Categories
//!
//! - **Sampling**: Weight calculation and weighted selection
//! - **Arrangement**: Clustering and boundary promotion
//! - **Catalog**: CSV parsing
//! - **Pipeline**: Full generation and rendering
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench sampling
//! cargo bench arrangement
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use setlist::catalog::Catalog;
use setlist::generator::{SetlistGenerator, SetlistRequest};
use setlist::sampler::{self, SamplingContext};
use setlist::song::Song;
use setlist::{arranger, render};
use std::hint::black_box;
use std::path::Path;

/// A catalog with a realistic spread of lengths, moods and artists
fn create_test_catalog(count: usize) -> Catalog {
    (1..=count)
        .map(|i| {
            let artist = if i % 4 == 0 { "OG" } else { "Cover" };
            let time = 2.5 + (i % 7) as f64 * 0.5;
            let mood = (i % 11) as f64;
            Song::new(&format!("Song {i:04}"), artist, time, mood)
                .with_key(["A", "C", "D", "E", "Misc"][i % 5], "E Standard")
        })
        .collect()
}

fn create_test_csv(count: usize) -> String {
    let mut csv = String::from("Song,Artist,Key,Tuning,Time,Mood,Active\n");
    for i in 1..=count {
        csv.push_str(&format!("Song {i:04},Cover,A,E Standard,{},{},True\n", 3 + i % 3, i % 11));
    }
    csv
}

/// Benchmark weight calculation and selection
fn benchmark_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let context = SamplingContext::default();

    let song = Song::new("Single", "Cover", 4.0, 7.0);
    group.bench_function("single_song_log_weight", |b| {
        b.iter(|| sampler::log_weight(black_box(&song), black_box(&context)))
    });

    for size in [10, 100, 1000].iter() {
        let catalog = create_test_catalog(*size);
        group.bench_with_input(BenchmarkId::new("select", size), &catalog, |b, catalog| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| sampler::select(black_box(catalog), black_box(&context), &mut rng))
        });
    }

    group.finish();
}

/// Benchmark clustering and promotion
fn benchmark_arrangement(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrangement");
    let songs = create_test_catalog(200).songs().to_vec();

    for cluster_size in [1, 2, 5].iter() {
        group.bench_with_input(
            BenchmarkId::new("arrange_200", cluster_size),
            cluster_size,
            |b, &cluster_size| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter_batched(
                    || songs.clone(),
                    |songs| arranger::arrange(songs, black_box(cluster_size), &mut rng),
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

/// Benchmark catalog parsing
fn benchmark_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    let csv = create_test_csv(1000);

    group.bench_function("parse_1000_rows", |b| {
        b.iter(|| Catalog::from_reader(black_box(csv.as_bytes()), Path::new("bench.csv")))
    });

    group.finish();
}

/// Benchmark the whole pipeline
fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let catalog = create_test_catalog(500);
    let request = SetlistRequest::default();

    group.bench_function("generate_and_render", |b| {
        let mut generator = SetlistGenerator::with_seed(3);
        b.iter(|| {
            generator
                .generate(black_box(&catalog), black_box(&request))
                .map(|setlist| render::render_text(&setlist.program))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sampling,
    benchmark_arrangement,
    benchmark_catalog,
    benchmark_pipeline
);
criterion_main!(benches);
