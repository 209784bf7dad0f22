use std::error::Error;
use std::process;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bataille::card::{DEFAULT_CARDS_PER_SUIT, DEFAULT_JOKER_COUNT, DEFAULT_SUIT_COUNT};
use bataille::{DEFAULT_SEED, Game, GameResult, GameStatus, describe_result, describe_round};

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Simulate Bataille games and report the winner.")]
struct Args {
    /// Number of regular ranks per suit (jokers rank just above them)
    #[arg(long = "cards-per-suit", default_value_t = DEFAULT_CARDS_PER_SUIT)]
    cards_per_suit: u32,

    /// Number of suits in the deck
    #[arg(long = "suits", default_value_t = DEFAULT_SUIT_COUNT)]
    suits: u32,

    /// Number of jokers in the deck
    #[arg(long = "jokers", default_value_t = DEFAULT_JOKER_COUNT)]
    jokers: u32,

    /// Number of players
    #[arg(short = 'p', long = "players", default_value_t = 4)]
    players: usize,

    /// Base RNG seed (per-game seeds are derived from it)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// Safety cap on rounds per game; longer games are aborted
    #[arg(long = "max-rounds")]
    max_rounds: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log every round
    #[arg(short, long)]
    verbose: bool,
}

/// Aggregate statistics over a batch of games.
#[derive(Debug, Default, Serialize)]
struct Summary {
    games: usize,
    wins_per_seat: Vec<usize>,
    no_winner: usize,
    aborted: usize,
    mean_rounds: f64,
    max_rounds: usize,
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.games == 0 {
        return Err("games must be positive".into());
    }
    if args.games == 1 {
        let result = play_game(&args, args.seed)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", describe_result(&result));
        }
        return Ok(());
    }

    let mut summary = Summary {
        wins_per_seat: vec![0; args.players],
        ..Summary::default()
    };
    let mut total_rounds = 0usize;
    for game_idx in 0..args.games {
        let result = play_game(&args, mix_seed(args.seed, game_idx as u64))?;
        match result.status {
            GameStatus::Finished { winner } => summary.wins_per_seat[winner] += 1,
            GameStatus::NoWinner => summary.no_winner += 1,
            GameStatus::Aborted => summary.aborted += 1,
            GameStatus::Ongoing => {}
        }
        summary.games += 1;
        total_rounds += result.round_count;
        summary.max_rounds = summary.max_rounds.max(result.round_count);
    }
    summary.mean_rounds = total_rounds as f64 / summary.games as f64;
    info!(games = summary.games, mean_rounds = summary.mean_rounds, "batch finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn play_game(args: &Args, seed: u64) -> Result<GameResult, Box<dyn Error>> {
    let mut builder = Game::builder(args.players)?
        .with_deck_shape(args.cards_per_suit, args.suits, args.jokers)
        .with_seed(seed);
    if let Some(limit) = args.max_rounds {
        builder = builder.with_max_rounds(limit);
    }
    let mut game = builder.build()?;
    if !args.verbose {
        return Ok(game.run()?);
    }

    while !game.is_finished() {
        if args.max_rounds.is_some_and(|limit| game.round_count() >= limit) {
            // Let `run` record the abort.
            break;
        }
        let report = game.play_round()?;
        info!("{}", describe_round(&game, &report));
    }
    Ok(game.run()?)
}

fn print_summary(summary: &Summary) {
    println!("Games played: {}", summary.games);
    for (seat, wins) in summary.wins_per_seat.iter().enumerate() {
        let rate = *wins as f64 * 100.0 / summary.games as f64;
        println!("  Player {seat}: {wins} wins ({rate:.1}%)");
    }
    println!("No winner: {}", summary.no_winner);
    if summary.aborted > 0 {
        println!("Aborted: {}", summary.aborted);
    }
    println!(
        "Rounds: mean {:.1}, max {}",
        summary.mean_rounds, summary.max_rounds
    );
}

fn mix_seed(base: u64, game_idx: u64) -> u64 {
    let mut z = base ^ game_idx.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
