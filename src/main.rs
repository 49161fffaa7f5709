mod altitude;
mod feeder;
mod geodesy;
mod naming;
mod snapshot;
mod spatial;
mod trajectory;
mod web;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::altitude::{AltitudeBand, BandFilter};
use crate::naming::display_name;
use crate::snapshot::{SnapshotStore, LOOKBACK_HOURS};
use crate::spatial::{current_matches, historical_matches, RadiusQuery};
use crate::trajectory::{build_trajectories, BalloonCard, FlightStats};

#[derive(Parser)]
#[command(name = "balloon-tracker")]
#[command(about = "High-altitude balloon fleet tracking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live snapshots and serve the HTTP API
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
    /// Show reconstructed trajectories from local snapshot files
    Track {
        /// Directory holding 00.json .. 23.json
        #[arg(short, long)]
        dir: PathBuf,
        /// Slot index of a single balloon; all balloons when omitted
        #[arg(short, long)]
        balloon: Option<usize>,
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
        /// Comma separated visible bands (low,medium,high,very_high)
        #[arg(long)]
        bands: Option<BandFilter>,
    },
    /// List balloons inside a radius, now and over the last 24 hours
    Radius {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(short, long, default_value_t = 100.0)]
        radius_km: f64,
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
        #[arg(long)]
        bands: Option<BandFilter>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Track {
            dir,
            balloon,
            offset,
            bands,
        } => track(&dir, balloon, offset, bands.unwrap_or_default()),
        Commands::Radius {
            dir,
            lat,
            lon,
            radius_km,
            offset,
            bands,
        } => radius(
            &dir,
            RadiusQuery::new(lat, lon, radius_km),
            offset,
            bands.unwrap_or_default(),
        ),
    }
}

fn serve(path: &str) -> ExitCode {
    let config = match web::Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_store(dir: &Path, offset: usize) -> Option<SnapshotStore> {
    if offset >= LOOKBACK_HOURS {
        eprintln!("Offset must be below {}", LOOKBACK_HOURS);
        return None;
    }

    match SnapshotStore::load_dir(dir) {
        Ok(store) => Some(store),
        Err(e) => {
            eprintln!("Error loading snapshots: {}", e);
            None
        }
    }
}

fn track(dir: &Path, balloon: Option<usize>, offset: usize, filter: BandFilter) -> ExitCode {
    let Some(store) = load_store(dir, offset) else {
        return ExitCode::FAILURE;
    };

    let Some(slot) = balloon else {
        let trajectories = build_trajectories(&store, offset, &filter);
        println!(
            "{} trajectories from -{}h ({} balloons in latest snapshot)",
            trajectories.len(),
            offset,
            store.latest_len()
        );
        for trajectory in &trajectories {
            let distance = FlightStats::from_path(&trajectory.path_data)
                .map(|s| s.total_distance_km)
                .unwrap_or(0.0);
            println!(
                "  #{} {}: {} points, {:.0} km",
                trajectory.balloon_id,
                display_name(trajectory.balloon_id),
                trajectory.path_data.len(),
                distance
            );
        }
        return ExitCode::SUCCESS;
    };

    let Some(card) = BalloonCard::build(&store, offset, slot, &filter) else {
        eprintln!("No trajectory for balloon #{}", slot);
        return ExitCode::FAILURE;
    };

    println!("Balloon #{} {}", card.balloon_id, card.name);
    println!(
        "  Currently at {:.1} km ({})",
        card.current_altitude_km, card.band
    );
    println!("  Distance: {:.0} km", card.stats.total_distance_km);
    println!("  Avg speed: {:.0} km/h", card.stats.avg_speed_kmh);
    println!(
        "  Altitude min/avg/max: {:.1} / {:.1} / {:.1} km",
        card.stats.min_altitude_km, card.stats.avg_altitude_km, card.stats.max_altitude_km
    );
    println!("  Tracking last {} hours", card.hours_tracked);
    if let Some(origin) = card.trajectory.origin() {
        println!(
            "  Origin: {:.4}, {:.4} ({}h ago)",
            origin.position[0], origin.position[1], origin.hours_ago
        );
    }
    for point in &card.trajectory.path_data {
        println!(
            "    {:>2}h ago  {:>9.4} {:>9.4}  {:>6.2} km  {}",
            point.hours_ago,
            point.position[0],
            point.position[1],
            point.altitude_km,
            AltitudeBand::classify(point.altitude_km)
        );
    }

    ExitCode::SUCCESS
}

fn radius(dir: &Path, query: RadiusQuery, offset: usize, filter: BandFilter) -> ExitCode {
    let Some(store) = load_store(dir, offset) else {
        return ExitCode::FAILURE;
    };

    let current = store
        .get(offset)
        .map(|snapshot| current_matches(snapshot, &filter, &query))
        .unwrap_or_default();
    println!("Current ({})", current.len());
    for m in &current {
        println!(
            "  #{} {}  {:.0} km",
            m.index,
            display_name(m.index),
            m.distance_km
        );
    }

    let historical = historical_matches(&store, &query);
    println!("Past 24h ({})", historical.len());
    for m in &historical {
        println!(
            "  #{} {}  {:.0} km  {}h ago",
            m.index,
            display_name(m.index),
            m.distance_km,
            m.hours_ago
        );
    }

    ExitCode::SUCCESS
}
