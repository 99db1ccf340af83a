//! ML Pong entry point
//!
//! Headless runner: plays CPU-vs-CPU matches, writes saved-match logs and
//! training exports, and inspects saved logs.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ml_pong::persistence::{MatchLog, TrainingExporter};
use ml_pong::{Config, Match};

#[derive(Parser)]
#[command(name = "ml-pong")]
#[command(about = "Deterministic Pong simulation that records training frames", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play CPU-vs-CPU matches
    Simulate {
        /// JSON config file (missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// RNG seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Number of matches to play
        #[arg(long, default_value_t = 1)]
        matches: u32,

        /// Write every tick in the saved-match format
        #[arg(long)]
        log_out: Option<PathBuf>,

        /// Write recorded histories as JSON lines
        #[arg(long)]
        export_out: Option<PathBuf>,

        /// Include raster frames in the export
        #[arg(long, default_value = "false")]
        rasters: bool,

        /// Include the newest-minus-previous raster difference in the export
        #[arg(long, default_value = "false")]
        diff: bool,
    },

    /// Summarize a saved-match file
    Inspect {
        /// Saved-match file path
        log: PathBuf,
    },

    /// Print the default config as JSON
    Defaults,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            config,
            seed,
            matches,
            log_out,
            export_out,
            rasters,
            diff,
        } => simulate(config, seed, matches, log_out, export_out, rasters, diff),
        Commands::Inspect { log } => inspect(&log),
        Commands::Defaults => {
            println!("{}", Config::default().to_json());
            Ok(())
        }
    }
}

fn simulate(
    config: Option<PathBuf>,
    seed: u64,
    matches: u32,
    log_out: Option<PathBuf>,
    export_out: Option<PathBuf>,
    rasters: bool,
    diff: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => Config::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let mut match_log = log_out.as_ref().map(|_| MatchLog::new(&config));
    let mut exporter = match &export_out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            Some(TrainingExporter::new(BufWriter::new(file), rasters).with_difference(diff))
        }
        None => None,
    };

    log::info!("Simulating {} match(es) with seed {}", matches, seed);
    let mut game = Match::new(config, seed);
    for number in 1..=matches {
        let summary = game.run_simulated_match((&mut match_log, &mut exporter));
        log::info!(
            "Match {} finished {} after {} ticks",
            number,
            summary.score,
            summary.ticks
        );
        println!("{}", serde_json::to_string(&summary)?);
    }

    if let (Some(log), Some(path)) = (match_log, log_out) {
        log.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(exporter) = exporter {
        let frames = exporter.finish().context("writing training export")?;
        log::info!("Exported {} frames", frames);
    }

    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let log = MatchLog::load(path).with_context(|| format!("reading {}", path.display()))?;
    println!(
        "field {}x{}, paddle height {}",
        log.width, log.height, log.paddle_height
    );
    println!("{} values, {} ticks", log.data_count(), log.frames().len());

    if let (Some(first), Some(last)) = (log.frames().first(), log.frames().last()) {
        println!("first tick: {:?}", first.to_array());
        println!("last tick:  {:?}", last.to_array());
    }
    Ok(())
}
