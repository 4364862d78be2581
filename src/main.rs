//! Binary entrypoint for the Dungeon Puzzler CLI.
//!
//! Commands:
//! - `play [--name <name>] [--seed <n>]` - start an interactive session on stdin
//! - `scores` - print the saved high-score table
//! - `init` - write a starter `dungeon.toml`
//!
//! See the library crate docs for module-level details: `dungeon_puzzler::`.
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use dungeon_puzzler::config::Config;
use dungeon_puzzler::dungeon::render::{
    render_error, render_final, render_outcome, render_room, render_scores, render_status,
};
use dungeon_puzzler::dungeon::{
    parse_command, CsvScoreStore, Dice, Game, ParsedInput, ScoreBoard, ScoreStore, SeededDice,
    SessionState, WorldCatalog, HELP_TEXT,
};
use dungeon_puzzler::logutil::format_duration;
use dungeon_puzzler::validation::validate_player_name;

#[derive(Parser)]
#[command(name = "dungeon-puzzler")]
#[command(about = "A turn-based dungeon puzzle adventure")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "dungeon.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter the dungeon
    Play {
        /// Name for the high-score table (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// RNG seed for a reproducible session (overrides game.seed)
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Show the high-score table
    Scores,
    /// Write a default configuration file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => Config::default(),
        _ if Path::new(&cli.config).exists() => Config::load(&cli.config)?,
        _ => Config::default(),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { name, seed } => play(&config, name, seed)?,
        Commands::Scores => {
            let store = CsvScoreStore::new(config.storage.scores_path());
            let scores = store.load().unwrap_or_else(|e| {
                warn!("Treating the score table as empty: {}", e);
                Vec::new()
            });
            let board = ScoreBoard::from_entries(scores, config.storage.max_high_scores);
            println!("{}", render_scores(board.entries()));
        }
        Commands::Init => {
            if Path::new(&cli.config).exists() {
                warn!("{} already exists; leaving it untouched", cli.config);
                return Ok(());
            }
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
        }
    }

    Ok(())
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}

fn play(config: &Config, name: Option<String>, seed: Option<u64>) -> Result<()> {
    let catalog = match &config.world.catalog {
        Some(path) => WorldCatalog::load(path)
            .with_context(|| format!("Failed to load world catalog {}", path))?,
        None => WorldCatalog::default(),
    };
    let dice: Box<dyn Dice> = match seed.or(config.game.seed) {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            Box::new(SeededDice::new(seed))
        }
        None => Box::new(SeededDice::from_entropy()),
    };
    let store = CsvScoreStore::new(config.storage.scores_path());
    let mut game = Game::new(
        &catalog,
        &config.game,
        config.storage.max_high_scores,
        dice,
        Box::new(store),
    )?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Welcome to Dungeon Puzzler!");
    let player_name = match name {
        Some(name) => validate_player_name(&name)?,
        None => loop {
            let Some(input) = prompt(&mut lines, "Enter your name: ")? else {
                bail!("No player name given");
            };
            match validate_player_name(&input) {
                Ok(name) => break name,
                Err(e) => println!("Invalid name: {}", e),
            }
        },
    };

    println!(
        "You have {} to collect items and solve all puzzles!\nType 'help' for a list of commands.\n",
        format_duration(game.time_limit())
    );
    println!("{}", render_room(&game.look()));
    info!("{} entered the dungeon", player_name);

    let started = Instant::now();
    loop {
        let elapsed = started.elapsed();
        if game.is_session_expired(elapsed) {
            println!("\nTime's up! Game Over!");
            println!("{}", render_status(&game.status(), game.remaining_time(elapsed)));
            info!("Session expired with score {}", game.score());
            break;
        }

        let text = format!("\n[{} left] > ", format_duration(game.remaining_time(elapsed)));
        let Some(line) = prompt(&mut lines, &text)? else {
            break;
        };

        match parse_command(&line) {
            ParsedInput::Help => println!("{}", HELP_TEXT),
            ParsedInput::Quit => {
                println!("Thanks for playing!");
                break;
            }
            ParsedInput::Invalid(message) => println!("{}", message),
            ParsedInput::Command(command) => {
                let elapsed = started.elapsed();
                if game.is_session_expired(elapsed) && !command.is_read_only() {
                    continue;
                }
                match game.execute(command) {
                    Ok(outcome) => {
                        println!("{}", render_outcome(&outcome, game.remaining_time(elapsed)))
                    }
                    Err(e) => println!("{}", render_error(&e)),
                }
            }
        }

        match game.state() {
            SessionState::Won => {
                let final_score = game.record_win(&player_name, started.elapsed())?;
                println!("\n{}", render_final(&final_score));
                break;
            }
            SessionState::Defeated => {
                println!("\nGame Over! Final score: {}", game.score());
                break;
            }
            SessionState::Exploring | SessionState::InCombat => {}
        }
    }
    Ok(())
}

fn init_logging(config: &Config, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => log::LevelFilter::from_str(&config.logging.level).unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    // The terminal is the game UI, so a configured log file takes all records.
    if let Some(ref file) = config.logging.file {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            Ok(f) => {
                builder.target(env_logger::Target::Pipe(Box::new(f)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {} (logging to stderr)", file, e),
        }
    }
    let _ = builder.try_init();
}
