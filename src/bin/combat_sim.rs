//! Combat-outcome roll demo.
//!
//! Builds a weighted table of combat outcomes, rolls it many times, and
//! prints the observed distribution next to each outcome's share. Also
//! compares bulk-construction time with and without a populate scope.
//!
//! Usage:
//!   cargo run --bin combat_sim -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin combat_sim                  # Default: 100000 rolls
//!   cargo run --bin combat_sim -- -n 1000000    # More rolls
//!   cargo run --bin combat_sim -- --seed 42     # Reproducible run

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rolltable::{TableError, WeightedEntry, WeightedTable};
use std::collections::HashMap;
use std::env;
use std::time::Instant;

struct SimConfig {
    num_rolls: u64,
    bulk_entries: usize,
    seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_rolls: 100_000,
            bulk_entries: 30_000,
            seed: None,
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("COMBAT ROLL SIMULATOR");
    println!();
    println!("Configuration:");
    println!("  Rolls:        {}", config.num_rolls);
    println!("  Bulk entries: {}", config.bulk_entries);
    if let Some(seed) = config.seed {
        println!("  Seed:         {}", seed);
    }
    println!();

    if let Err(err) = run(&config) {
        eprintln!("simulation failed: {err}");
        std::process::exit(1);
    }
}

fn run(config: &SimConfig) -> Result<(), TableError> {
    let mut rng: StdRng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let table = WeightedTable::with_entries([
        WeightedEntry::new("hit", 55.0),
        WeightedEntry::new("miss", 25.0),
        WeightedEntry::new("crit", 10.0),
        WeightedEntry::new("dodge", 10.0),
    ])?;

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for _ in 0..config.num_rolls {
        let outcome = table.sample_with(&mut rng)?;
        *counts.entry(*outcome).or_insert(0) += 1;
    }

    println!("Outcome distribution over {} rolls:", config.num_rolls);
    for entry in table.entries() {
        let observed = *counts.get(entry.value()).unwrap_or(&0) as f64 / config.num_rolls as f64;
        println!(
            "  {:<8} share {:>7.4}  observed {:>7.4}",
            entry.value(),
            entry.share(),
            observed
        );
    }
    println!();

    compare_bulk_construction(config, &mut rng)
}

/// Times seeding a large table entry-by-entry against a populate scope.
fn compare_bulk_construction(config: &SimConfig, rng: &mut impl Rng) -> Result<(), TableError> {
    let n = config.bulk_entries;
    println!("Bulk construction of {n} entries:");

    let start = Instant::now();
    let mut unbatched = WeightedTable::new();
    for i in 0..n {
        unbatched.create(i, (n - i) as f64)?;
    }
    println!("  unbatched: {:?}", start.elapsed());
    println!("    sample: #{}", unbatched.sample_with(rng)?);

    let start = Instant::now();
    let mut batched = WeightedTable::new();
    batched.populate(|t| {
        for i in 0..n {
            t.create(i, (n - i) as f64)?;
        }
        Ok(())
    })?;
    println!("  populate:  {:?}", start.elapsed());
    println!("    sample: #{}", batched.sample_with(rng)?);

    Ok(())
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--rolls" => {
                if i + 1 < args.len() {
                    config.num_rolls = args[i + 1].parse().unwrap_or(100_000);
                    i += 1;
                }
            }
            "-b" | "--bulk" => {
                if i + 1 < args.len() {
                    config.bulk_entries = args[i + 1].parse().unwrap_or(30_000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Usage: combat_sim [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -n, --rolls <N>   Number of rolls (default: 100000)");
    println!("  -b, --bulk <N>    Entries for the bulk-construction timing (default: 30000)");
    println!("  -s, --seed <N>    RNG seed for reproducible runs");
    println!("  -h, --help        Show this help");
}
