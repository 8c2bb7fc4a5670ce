//! # Butterfly-nav CLI
//!
//! Command-line interface for the butterfly-nav library.
//! Finds turn-aware shortest routes on JSON town maps.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use butterfly_nav::{ConnectivityReport, NavConfig, Navigator, TownMap};
use clap::{Parser, Subcommand};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;

/// Command-line interface for butterfly-nav
#[derive(Parser)]
#[command(name = "butterfly-nav")]
#[command(about = "Turn-aware shortest path search over town road maps")]
#[command(long_about = "Finds the route with the fewest roads between two intersections,
obeying turn tables, one-way streets and no-left / no-right / no-U-turn lists:
  butterfly-nav route --map town.json --from 0 --to 44
  butterfly-nav random --map town.json --count 3 --seed 42
  butterfly-nav info --map town.json
  butterfly-nav connectivity --map town.json")]
#[command(version = env!("BUTTERFLY_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file overriding road speeds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest turn-legal route between two intersections
    Route {
        /// JSON map file
        #[arg(long)]
        map: PathBuf,
        /// Start intersection id
        #[arg(long)]
        from: String,
        /// Goal intersection id
        #[arg(long)]
        to: String,
    },
    /// Route between randomly chosen intersections
    Random {
        /// JSON map file
        #[arg(long)]
        map: PathBuf,
        /// Number of routes to draw
        #[arg(long, default_value = "3")]
        count: usize,
        /// Seed for reproducible draws
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show map metadata, landmarks and turn restrictions
    Info {
        /// JSON map file
        #[arg(long)]
        map: PathBuf,
    },
    /// Count intersection and road types, one-way roads and isolated intersections
    Connectivity {
        /// JSON map file
        #[arg(long)]
        map: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr; RUST_LOG overrides the level
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let config = match &cli.config {
        Some(path) => NavConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => NavConfig::default(),
    };

    match cli.command {
        Commands::Route { map, from, to } => {
            let nav = open(&map, config)?;

            let start = Instant::now();
            let route = nav.find_route(&from, &to)?;
            info!("Route query took {:.3}ms", start.elapsed().as_secs_f64() * 1e3);

            println!("{}", cli::render_route(nav.map(), &from, &to, route.as_ref()));
        }
        Commands::Random { map, count, seed } => {
            let nav = open(&map, config)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            for n in 1..=count {
                let drawn = nav.random_route(&mut rng)?;
                println!("{}", cli::render_random(n, &drawn));
            }
        }
        Commands::Info { map } => {
            let town = load(&map)?;
            println!("{}", cli::render_info(&town));
        }
        Commands::Connectivity { map } => {
            let town = load(&map)?;
            println!("{}", ConnectivityReport::from_map(&town));
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<TownMap> {
    TownMap::load(path).with_context(|| format!("Failed to load map {}", path.display()))
}

fn open(path: &Path, config: NavConfig) -> Result<Navigator> {
    Ok(Navigator::new(load(path)?, config))
}
