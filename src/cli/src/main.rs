#![warn(clippy::pedantic)]

use std::{path::PathBuf, thread, time::Duration};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{OptionExt, WrapErr};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};
use twophase::{
    CancellationToken, Config, CubeState, MoveSequence, Solver, Tables, facelet,
};

/// Solves Rubik's Cubes with the two-phase algorithm
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A configuration file in TOML format. Flags override its values.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    log_level: u8,

    /// Worker threads for pruning table generation
    #[arg(long)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube given as 54 facelets in U, R, F, D, L, B face order
    Solve {
        /// The facelet string, using any six distinct characters
        facelets: String,
        /// Keep searching until a solution of at most this many moves is found
        #[arg(long, short = 't')]
        target_length: Option<u8>,
        /// Never return a solution longer than this
        #[arg(long)]
        max_length: Option<u8>,
        /// Keep adjacent turns of the same face separate
        #[arg(long)]
        no_coalesce: bool,
        /// Print a plain-language description of every move
        #[arg(long, short = 'd')]
        describe: bool,
        /// Give up after this many seconds
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<f64>,
    },
    /// Print the facelets of a solved cube after a move sequence, e.g. "R U' F2"
    Scramble {
        /// The moves to apply
        moves: String,
    },
    /// Print a random scramble and the facelets it produces
    Random {
        /// Number of moves in the scramble
        #[arg(long, short = 'n', default_value_t = 25)]
        length: usize,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the configuration in effect after applying flags
    Config,
    /// Build the pruning tables and write them to disk
    Tables {
        /// The output directory. The cache directory when unset.
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.threads.is_some() {
        config.tables.threads = cli.threads;
    }

    match cli.command {
        Commands::Solve {
            facelets,
            target_length,
            max_length,
            no_coalesce,
            describe,
            timeout,
        } => {
            if target_length.is_some() {
                config.solver.target_length = target_length;
            }
            if let Some(max_length) = max_length {
                config.solver.max_length = max_length;
            }
            if no_coalesce {
                config.solver.coalesce = false;
            }

            let tables = Tables::load_or_build(&config.tables)?;
            let solver = Solver::with_tables(tables.into(), config.solver);

            let cancel = CancellationToken::new();
            if let Some(timeout) = timeout {
                let duration = Duration::try_from_secs_f64(timeout)
                    .wrap_err("The timeout must be a non-negative number of seconds")?;
                let cancel = cancel.clone();
                thread::spawn(move || {
                    thread::sleep(duration);
                    cancel.cancel();
                });
            }

            let solution = match solver.solve_with_cancel(&facelets, &cancel) {
                Ok(solution) => solution,
                Err(err) if err.is_internal() => {
                    return Err(err).wrap_err(
                        "The solver failed on a valid cube; this is a bug, please report it",
                    );
                }
                Err(err) => return Err(err).wrap_err("Could not solve the cube"),
            };
            info!(
                "Phase 1: {} moves, phase 2: {} moves",
                solution.phase1_length, solution.phase2_length
            );
            println!("{solution}");
            if describe {
                println!(
                    "{}",
                    solution
                        .moves
                        .describe()
                        .iter()
                        .enumerate()
                        .map(|(i, step)| format!("{:>2}. {step}", i + 1))
                        .join("\n")
                );
            }
        }
        Commands::Scramble { moves } => {
            let moves: MoveSequence = moves.parse()?;
            println!(
                "{}",
                facelet::encode(&CubeState::SOLVED.apply_sequence(&moves))
            );
        }
        Commands::Random { length, seed } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let moves = MoveSequence::random(length, &mut rng);
            println!("{moves}");
            println!(
                "{}",
                facelet::encode(&CubeState::SOLVED.apply_sequence(&moves))
            );
        }
        Commands::Config => print!("{}", config.to_toml()?),
        Commands::Tables { out } => {
            let dir = out
                .or_else(|| config.tables.cache_dir())
                .ok_or_eyre("No cache directory is available; pass --out")?;
            let tables = Tables::build(&config.tables)?;
            tables.save(&dir)?;
            for table in tables.pruning_tables() {
                println!(
                    "{}: depth {} -> {}",
                    table.kind(),
                    table.depth(),
                    dir.join(table.kind().file_name()).display()
                );
            }
        }
    }
    Ok(())
}
