use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use clap::Parser;
use machikoro_rs::cli::{PlayerInstance, StatisticsAccumulator, create_player, print_player_help};
use machikoro_rs::game::{Game, GameConfig};
use machikoro_rs::narrator::{Silent, TracingNarrator};
use machikoro_rs::types::{BreakingPolicy, GameVersion};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "machikoro-sim")]
#[command(about = "Machi Koro simulator - play games between scripted decision makers")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Comma-separated player codes (e.g., R,R,R,R or F,R)
    /// Use ':' to set player-specific params (e.g., R:7 for a seed)
    #[arg(long, default_value = "R,R,R,R")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Game version: BASIC, HARBOR, or MILLIONAIRE
    #[arg(long)]
    version: Option<String>,

    /// Coin breaking policy: NONE or AUTO_BREAK
    #[arg(long)]
    breaking: Option<String>,

    /// JSON file with a game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,

    /// Silence console output
    #[arg(long)]
    quiet: bool,

    /// Narrate every game event through the log
    #[arg(short, long)]
    verbose: bool,

    /// Number of worker threads for parallel execution
    #[arg(long, default_value_t = 1)]
    workers: usize,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn base_config(args: &Args) -> GameConfig {
    let mut config = match &args.config {
        Some(path) => match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), "failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(version) = &args.version {
        config.version = GameVersion::from_str(version).unwrap_or_else(|_| {
            eprintln!("Error: Invalid version '{version}'. Use BASIC, HARBOR, or MILLIONAIRE");
            std::process::exit(1);
        });
    }
    if let Some(breaking) = &args.breaking {
        config.breaking = BreakingPolicy::from_str(breaking).unwrap_or_else(|_| {
            eprintln!("Error: Invalid breaking policy '{breaking}'. Use NONE or AUTO_BREAK");
            std::process::exit(1);
        });
    }
    config
}

fn main() {
    let args = Args::parse();

    if args.help_players {
        print_player_help();
        return;
    }

    init_tracing(args.verbose);

    let player_keys: Vec<&str> = args.players.split(',').collect();
    if player_keys.len() < 2 || player_keys.len() > 4 {
        eprintln!("Error: Must specify 2-4 players");
        std::process::exit(1);
    }

    let mut players: Vec<PlayerInstance> = Vec::new();
    for (seat, key) in player_keys.iter().enumerate() {
        let mut parts = key.split(':');
        let code = parts.next().unwrap_or_default();
        match create_player(code, seat, parts.collect()) {
            Some(player) => players.push(player),
            None => {
                eprintln!("Error: Unknown player code '{code}'");
                eprintln!("Use --help-players to see available codes");
                std::process::exit(1);
            }
        }
    }

    let mut config = base_config(&args);
    config.num_players = players.len();

    let mut stats = StatisticsAccumulator::new();
    if args.workers > 1 {
        run_parallel_simulations(&args, &config, &players, &mut stats);
    } else {
        run_sequential_simulations(&args, &config, &players, &mut stats);
    }

    if !args.quiet {
        print_summary(&stats, &players);
    }
}

fn run_sequential_simulations(
    args: &Args,
    config: &GameConfig,
    players: &[PlayerInstance],
    stats: &mut StatisticsAccumulator,
) {
    for game_idx in 0..args.num {
        let config = GameConfig {
            seed: config.seed + u64::from(game_idx),
            ..config.clone()
        };

        let start = Instant::now();
        let mut game = match Game::new(config) {
            Ok(game) => game,
            Err(e) => {
                error!("cannot start game: {e}");
                std::process::exit(1);
            }
        };
        let winner = if args.verbose {
            game.play(players, &mut TracingNarrator)
        } else {
            game.play(players, &mut Silent)
        };
        let duration = start.elapsed();

        stats.after(&game, duration);

        if !args.quiet {
            let last_n = 10;
            if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
                let winner_str = winner
                    .map(|p| format!("P{p}"))
                    .unwrap_or_else(|| "None".to_string());
                println!(
                    "Game {:>4}: Winner={:>5}, Turns={:>4}, Duration={:?}",
                    game_idx + 1,
                    winner_str,
                    game.state.turn,
                    duration
                );
            } else if (game_idx + 1) % 100 == 0 {
                print!(".");
                use std::io::Write;
                let _ = std::io::stdout().flush();
            }
        }
    }
}

fn run_parallel_simulations(
    args: &Args,
    config: &GameConfig,
    players: &[PlayerInstance],
    stats: &mut StatisticsAccumulator,
) {
    use std::sync::Arc;
    use std::thread;

    let players = Arc::new(players.to_vec());
    let games_per_worker = args.num as usize / args.workers;
    let remainder = args.num as usize % args.workers;

    let mut handles = Vec::new();
    for worker_id in 0..args.workers {
        let players = Arc::clone(&players);
        let config = config.clone();
        let num_games = if worker_id < remainder {
            games_per_worker + 1
        } else {
            games_per_worker
        };

        let handle = thread::spawn(move || {
            let mut local_stats = StatisticsAccumulator::new();
            let start_idx = worker_id * games_per_worker + worker_id.min(remainder);

            for local_idx in 0..num_games {
                let game_idx = start_idx + local_idx;
                let config = GameConfig {
                    seed: config.seed + game_idx as u64,
                    ..config.clone()
                };

                let start = Instant::now();
                match Game::new(config) {
                    Ok(mut game) => {
                        game.play(players.as_slice(), &mut Silent);
                        local_stats.after(&game, start.elapsed());
                    }
                    Err(e) => warn!(game_idx, "skipping game: {e}"),
                }
            }
            local_stats
        });
        handles.push(handle);
    }

    for handle in handles {
        match handle.join() {
            Ok(worker_stats) => stats.stats.merge(worker_stats.stats),
            Err(_) => error!("simulation worker panicked"),
        }
    }
}

fn print_summary(stats: &StatisticsAccumulator, players: &[PlayerInstance]) {
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nPlayer Summary:");
    println!(
        "{:<15} {:<10} {:<12} {:<14}",
        "Player", "Wins", "Win Rate", "Avg Landmarks"
    );
    println!("{}", "-".repeat(52));

    for (seat, player) in players.iter().enumerate() {
        let wins = stats.stats.wins.get(&seat).copied().unwrap_or(0);
        let win_rate = if stats.stats.games > 0 {
            (f64::from(wins) / f64::from(stats.stats.games)) * 100.0
        } else {
            0.0
        };

        println!(
            "{:<15} {:<10} {:<11.1}% {:<14.2}",
            format!("{} (P{seat})", player.name()),
            wins,
            win_rate,
            stats.stats.get_avg_landmarks(seat)
        );
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.stats.games);
    println!("  Unfinished: {}", stats.stats.unfinished);
    println!("  Avg Turns: {:.2}", stats.stats.get_avg_turns());
    println!("  Avg Duration: {:.2?}", stats.stats.get_avg_duration());
}
