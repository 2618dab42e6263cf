// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for games, tournaments and odds tables
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use conquest_agents::SearchConfig;
use conquest_engine::config::GameConfig;
use conquest_engine::error::ConfigError;
use conquest_engine::probability::{expected_margin, outcomes, supported_pairs, win_probability};
use conquest_engine::setup::create_board;
use conquest_tournament::{
    make_players, run_game, run_tournament, GameError, MatchLimits, PlayerKind, TournamentConfig,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "conquest-runner", about = "Territory conquest engine")]
struct Cli {
    /// JSON file with game, search and match settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single headless game
    Play {
        /// Map, dice and player seed (defaults to the configured layout seed)
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long)]
        territories: Option<usize>,
        #[arg(short, long)]
        players: Option<u8>,
        /// Comma-separated seat lineup: planner, search, random
        #[arg(short, long, value_delimiter = ',')]
        agents: Vec<PlayerKind>,
        /// Search depth for planner and search players
        #[arg(short, long)]
        depth: Option<u32>,
        /// Print the starting map
        #[arg(long)]
        show_map: bool,
    },
    /// Run a tournament of N games in parallel
    Tournament {
        #[arg(short, long, default_value_t = 20)]
        games: u32,
        /// Worker threads (0 = one per core)
        #[arg(short = 'j', long, default_value_t = 0)]
        threads: usize,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, value_delimiter = ',')]
        agents: Vec<PlayerKind>,
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// Print the combat outcome table
    Odds,
    /// Generate and draw a map
    Map {
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long)]
        territories: Option<usize>,
        #[arg(short, long)]
        players: Option<u8>,
    },
}

/// Settings loadable from `--config`. Command-line flags win.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RunnerConfig {
    game: GameConfig,
    search: SearchConfig,
    limits: MatchLimits,
    lineup: Vec<PlayerKind>,
}

impl RunnerConfig {
    fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else { return Ok(RunnerConfig::default()) };
        let text = std::fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&text)?;
        config.game.validate()?;
        config.search.validate()?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    fn lineup(&self, override_with: Vec<PlayerKind>) -> Vec<PlayerKind> {
        if !override_with.is_empty() {
            override_with
        } else if !self.lineup.is_empty() {
            self.lineup.clone()
        } else {
            vec![PlayerKind::Planner, PlayerKind::Random]
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunnerError> {
    let mut config = RunnerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Play { seed, territories, players, agents, depth, show_map } => {
            apply_overrides(&mut config, territories, players, depth);
            let seed = seed.unwrap_or(config.game.layout_seed);
            config.game.layout_seed = seed;
            cmd_play(&config, seed, agents, show_map)
        }
        Commands::Tournament { games, threads, seed, agents, depth } => {
            apply_overrides(&mut config, None, None, depth);
            cmd_tournament(&config, games, threads, seed, agents)
        }
        Commands::Odds => {
            cmd_odds();
            Ok(())
        }
        Commands::Map { seed, territories, players } => {
            apply_overrides(&mut config, territories, players, None);
            if let Some(seed) = seed {
                config.game.layout_seed = seed;
            }
            cmd_map(&config)
        }
    }
}

fn apply_overrides(config: &mut RunnerConfig, territories: Option<usize>, players: Option<u8>, depth: Option<u32>) {
    if let Some(n) = territories {
        config.game.territory_count = n;
    }
    if let Some(p) = players {
        config.game.player_count = p;
    }
    if let Some(d) = depth {
        config.search.depth = d;
    }
}

fn cmd_play(config: &RunnerConfig, seed: u64, agents: Vec<PlayerKind>, show_map: bool) -> Result<(), RunnerError> {
    config.search.validate()?;
    let lineup = config.lineup(agents);
    let names: Vec<String> = lineup.iter().map(|k| k.to_string()).collect();
    println!("=== Territory Conquest ===\n");
    println!(
        "Running single game: seed={}, territories={}, players={}, lineup={}\n",
        seed,
        config.game.territory_count,
        config.game.player_count,
        names.join(",")
    );

    let board = create_board(&config.game)?;
    if show_map {
        println!("{}", board);
    }
    let mut players = make_players(&lineup, config.game.player_count, seed, &config.search);
    let result = run_game(board, &mut players, seed, &config.limits)?;

    println!("Game finished!");
    println!("  Winner: {} ({})", result.winner, result.winner_name);
    println!("  Turns played: {}", result.turns);
    println!("  Attacks: {}, captures: {}, rejected requests: {}", result.attacks, result.captures, result.rejected);
    println!();
    println!("  Final standings:");
    for pr in &result.player_results {
        println!(
            "    {:10} {:8} -- territories: {}, troops: {}",
            pr.player.to_string(),
            pr.name,
            pr.territories,
            pr.troops
        );
    }
    Ok(())
}

fn cmd_tournament(
    config: &RunnerConfig,
    games: u32,
    threads: usize,
    seed: u64,
    agents: Vec<PlayerKind>,
) -> Result<(), RunnerError> {
    let tournament = TournamentConfig {
        games,
        base_seed: seed,
        threads,
        lineup: config.lineup(agents),
        game: config.game.clone(),
        search: config.search.clone(),
        limits: config.limits,
    };
    let names: Vec<String> = tournament.lineup.iter().map(|k| k.to_string()).collect();
    println!("=== Tournament: {} games, lineup={} ===\n", games, names.join(","));

    let summary = run_tournament(&tournament)?;

    println!("--- Summary ({} games, {} errors) ---", summary.games, summary.errors);
    for (seat, wins) in summary.wins.iter().enumerate() {
        let kind = tournament.lineup[seat % tournament.lineup.len()];
        println!(
            "  Player {} ({:8}): {:>4} wins ({:.1}%)",
            seat + 1,
            kind.to_string(),
            wins,
            summary.win_rate(seat) * 100.0
        );
    }
    println!("  Average game length: {:.1} turns", summary.average_turns());
    Ok(())
}

fn cmd_odds() {
    println!("=== Combat odds (one duel) ===\n");
    println!("{:>4} {:>4} {:>14} {:>14} {:>12}", "att", "def", "att lost", "def lost", "probability");
    println!("{}", "-".repeat(52));
    for (a, d) in supported_pairs() {
        for o in outcomes(a, d) {
            println!(
                "{:>4} {:>4} {:>14} {:>14} {:>12.4}",
                a, d, o.attackers_lost, o.defenders_lost, o.probability
            );
        }
        println!(
            "          clean sweep: {:.4}, expected margin: {:+.4}",
            win_probability(a, d),
            expected_margin(a, d)
        );
    }
}

fn cmd_map(config: &RunnerConfig) -> Result<(), RunnerError> {
    let board = create_board(&config.game)?;
    println!("{}", board);
    println!("Adjacency:");
    for t in board.territories() {
        let neighbours: Vec<String> = t
            .neighbours
            .iter()
            .filter_map(|&n| board.territory(n))
            .map(|n| n.name.clone())
            .collect();
        println!("  {:>4} ({:>3},{:>3}) -> {}", t.name, t.coords.x, t.coords.y, neighbours.join(", "));
    }
    Ok(())
}
