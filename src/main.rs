//! Leapstake CLI
//!
//! Interactive wagering session over stdin: one `<direction> <stake>` line per
//! round, running until the session timer expires or input ends.

use clap::Parser;
use leapstake::engine::RoundEngine;
use leapstake::resolver::DrawSource;
use leapstake::storage::GameStore;
use leapstake::timer::RoundTimer;
use leapstake::types::Category;
use leapstake::ConfigLoader;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "leapstake")]
#[command(about = "Four-direction jump wagering mini-game", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Database directory (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Session length in minutes (overrides config)
    #[arg(long)]
    duration_minutes: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(ref path) = args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(minutes) = args.duration_minutes {
        config.session.duration_minutes = minutes;
    }

    let store = GameStore::open(&config.storage.data_dir)?;
    let mut engine = RoundEngine::open(store, config.ledger.starting_balance)?;
    let timer = RoundTimer::start(config.session_duration());

    println!(
        "balance: {} points | session: {} minute(s)",
        engine.balance(),
        config.session.duration_minutes
    );
    println!("wager with \"<direction> <stake>\" (forward, backward, left, right); ctrl-d quits");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut expiry = timer.subscribe();
    loop {
        tokio::select! {
            changed = expiry.wait_for(|state| state.is_expired()) => {
                changed?;
                println!("session expired, no more wagers");
                break;
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => play_round(&mut engine, &line),
                    None => break,
                }
            }
        }
    }
    timer.cancel();

    println!("final balance: {} points", engine.balance());
    if !engine.history().is_empty() {
        println!("recent rounds (latest first):");
        for result in engine.history().iter().rev() {
            println!(
                "  {} staked {} -> drew {}, {:+} points",
                result.chosen, result.stake, result.resolved, result.points_delta
            );
        }
    }
    Ok(())
}

fn play_round<D: DrawSource>(engine: &mut RoundEngine<D>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let mut parts = line.splitn(2, char::is_whitespace);
    let direction = parts.next().unwrap_or_default();
    let Some(chosen) = Category::from_label(direction) else {
        println!("unknown direction {:?}; pick forward, backward, left or right", direction);
        return;
    };
    let raw_stake = parts.next().unwrap_or_default();

    match engine.submit_wager_input(chosen, raw_stake) {
        Ok(result) => {
            let verdict = if result.is_win() { "win" } else { "loss" };
            println!(
                "drew {} -> {} ({:+} points), balance now {}",
                result.resolved,
                verdict,
                result.points_delta,
                engine.balance()
            );
        }
        Err(err) if err.is_fatal() => {
            // Round outcome may not be durably recorded; stop the session.
            eprintln!("fatal: {}", err);
            std::process::exit(1);
        }
        Err(err) => println!("wager rejected: {}", err),
    }
}
