//! mallowflight - headless training driver.

use clap::{Parser, Subcommand};
use mallowflight::controller::{LogPresenter, PerceptronPool};
use mallowflight::driver::RunOutcome;
use mallowflight::{RunConfig, SimRng, SimulationLoop};
use rand::SeedableRng;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Parser)]
#[command(name = "mallowflight")]
#[command(version)]
#[command(about = "Evaluates populations of android controllers on a marshmallow-stick course")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run training generations
    Run {
        /// Configuration file (YAML); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of generations
        #[arg(short, long)]
        generations: Option<u32>,

        /// Androids per generation
        #[arg(short, long)]
        population: Option<usize>,

        /// Random seed for reproducible courses
        #[arg(long)]
        seed: Option<u64>,

        /// Run unthrottled instead of 30 ticks per second
        #[arg(long)]
        fast: bool,

        /// Tick cap per generation
        #[arg(long)]
        max_ticks: Option<u64>,
    },

    /// Write the default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "mallowflight.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            population,
            seed,
            fast,
            max_ticks,
        } => {
            let mut run_config = match config {
                Some(path) => {
                    log::info!("Loading config from {}", path.display());
                    RunConfig::from_file(path)?
                }
                None => RunConfig::default(),
            };
            if let Some(generations) = generations {
                run_config.generations = generations;
            }
            if let Some(population) = population {
                run_config.population = population;
            }
            if seed.is_some() {
                run_config.seed = seed;
            }
            if fast {
                run_config.realtime = false;
            }
            if max_ticks.is_some() {
                run_config.max_ticks = max_ticks;
            }
            run_config.validate()?;
            run(&run_config);
        }
        Commands::Init { output } => {
            RunConfig::default().save(&output)?;
            println!("Wrote default configuration to {}", output.display());
        }
    }
    Ok(())
}

fn run(config: &RunConfig) {
    log::info!(
        "Starting {} generations of {} androids (seed {:?}, {})",
        config.generations,
        config.population,
        config.seed,
        if config.realtime { "realtime" } else { "unthrottled" }
    );

    let provider_rng = match config.seed {
        Some(seed) => SimRng::seed_from_u64(seed),
        None => SimRng::from_entropy(),
    };
    let mut pool = PerceptronPool::new(config.population, provider_rng);
    let mut presenter = LogPresenter::new(config.snapshot_interval);
    let mut sim = SimulationLoop::new(config);
    stop_on_enter(sim.stop_handle());

    let summaries = sim.train(&mut pool, config.generations, config.seed, &mut presenter);

    let best = summaries.iter().max_by_key(|s| s.score);
    let capped = summaries
        .iter()
        .filter(|s| s.outcome == RunOutcome::Stopped)
        .count();
    match (best, pool.champion()) {
        (Some(best), Some((_, fitness))) => log::info!(
            "Done: best score {} in gen {}, champion fitness {:.1}, {} generation(s) cut short",
            best.score,
            best.generation,
            fitness,
            capped
        ),
        _ => log::info!("Done: no generations completed"),
    }
}

/// Headless stand-in for a window-close event: a line on stdin raises the stop flag.
/// A closed stdin leaves the run to finish on its own.
fn stop_on_enter(stop: Arc<AtomicBool>) {
    let spawned = std::thread::Builder::new()
        .name("stop-on-enter".into())
        .spawn(move || {
            let mut line = String::new();
            match std::io::stdin().lock().read_line(&mut line) {
                Ok(n) if n > 0 => {
                    log::info!("Stop requested from terminal");
                    stop.store(true, Ordering::Relaxed);
                }
                Ok(_) => log::debug!("stdin closed; stop only via tick cap"),
                Err(e) => log::warn!("Cannot watch stdin for stop requests: {}", e),
            }
        });
    match spawned {
        Ok(_) => log::info!("Press Enter to stop after the current tick"),
        Err(e) => log::warn!("Cannot start stop watcher: {}", e),
    }
}
