use std::fs;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cards::{parse_line, shuffled_deck};
use crate::clock::{Clock, SystemClock};
use crate::display::{grid_display, print_error, print_success};
use crate::error::SquaresResult;
use crate::player::{Player, DEFAULT_DEPTH_LIMIT};
use crate::scoring::PointSystem;
use crate::table::HeuristicTable;
use crate::tuner::{tune, Strategy, TunerConfig};

#[derive(Parser)]
#[command(
    name = "squares",
    version = "1.0.0",
    about = "Poker Squares agent: greedy Monte-Carlo play with offline heuristic tuning."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Points {
    American,
    English,
}

impl Points {
    fn system(self) -> PointSystem {
        match self {
            Points::American => PointSystem::american(),
            Points::English => PointSystem::english(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Genetic,
    Sruler,
}

impl StrategyArg {
    fn strategy(self) -> Strategy {
        match self {
            StrategyArg::Genetic => Strategy::Genetic,
            StrategyArg::Sruler => Strategy::StochasticRuler,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate full games with self-dealt shuffled decks
    Play {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "1")]
        games: usize,
        /// Per-game time budget in milliseconds
        #[arg(short, long, default_value = "30000")]
        budget: u64,
        /// Greedy rollout depth limit
        #[arg(short, long, default_value_t = DEFAULT_DEPTH_LIMIT)]
        depth: usize,
        /// Point system to play under
        #[arg(short, long, value_enum, default_value = "american")]
        points: Points,
        /// Pre-game calibration budget in milliseconds (0 skips tuning)
        #[arg(short, long, default_value = "0")]
        calibrate: u64,
        /// Tuner configuration JSON file
        #[arg(long)]
        config: Option<String>,
        /// Tuning strategy (overrides the config file)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// RNG seed for reproducible deals
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Calibrate a heuristic table and print it
    Tune {
        /// Tuning budget in milliseconds
        #[arg(short, long, default_value = "60000")]
        budget: u64,
        /// Point system to tune against
        #[arg(short, long, value_enum, default_value = "american")]
        points: Points,
        /// Tuner configuration JSON file
        #[arg(long)]
        config: Option<String>,
        /// Tuning strategy (overrides the config file)
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },
    /// Classify a partial 5-card line (e.g. "As Ks -- -- --")
    Classify {
        /// Up to 5 cards; "--" marks an empty cell
        line: String,
    },
}

fn load_config(path: Option<&str>, strategy: Option<StrategyArg>) -> SquaresResult<TunerConfig> {
    let mut config = match path {
        Some(p) => serde_json::from_str(&fs::read_to_string(p).map_err(|e| {
            crate::error::SquaresError::InvalidValue(format!("cannot read {}: {}", p, e))
        })?)?,
        None => TunerConfig::default(),
    };
    if let Some(s) = strategy {
        config.strategy = s.strategy();
    }
    Ok(config)
}

fn cmd_play(
    games: usize,
    budget: u64,
    depth: usize,
    points: PointSystem,
    calibrate: u64,
    config: &TunerConfig,
    seed: Option<u64>,
) -> SquaresResult<()> {
    let mut player = match seed {
        Some(s) => Player::with_seed(points, depth, s)?,
        None => Player::new(points, depth)?,
    };
    if calibrate > 0 {
        println!("Calibrating for {} ms...", calibrate);
        let clock = SystemClock::new();
        player.calibrate(config, calibrate, &clock)?;
        print_success("Calibration done.");
    }

    let mut deal_rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut scores: Vec<i32> = Vec::with_capacity(games);
    for game in 0..games {
        player.start_game();
        let deck = shuffled_deck(&mut deal_rng);
        let clock = SystemClock::new();
        let game_start = clock.now_millis();
        for card in deck.iter().take(25) {
            let elapsed = clock.now_millis() - game_start;
            player.play(*card, budget.saturating_sub(elapsed), &clock)?;
        }
        let score = player.final_score()?;
        scores.push(score);
        println!("\n{} {}", "Game".bold(), game + 1);
        println!("{}", grid_display(player.grid(), &points)?);
        println!("Score: {}", score.to_string().green().bold());
    }

    if games > 1 {
        let total: i64 = scores.iter().map(|&s| i64::from(s)).sum();
        let mean = total as f64 / games as f64;
        let min = scores.iter().min().unwrap_or(&0);
        let max = scores.iter().max().unwrap_or(&0);
        println!(
            "\n{} games | mean {:.1} | min {} | max {}",
            games, mean, min, max
        );
    }
    Ok(())
}

fn cmd_tune(budget: u64, points: PointSystem, config: &TunerConfig) -> SquaresResult<()> {
    let seeded = HeuristicTable::seed(&points)?;
    println!("Seeded table:\n{}", seeded);
    println!("Tuning for {} ms...", budget);
    let clock = SystemClock::new();
    let mut rng = rand::thread_rng();
    let deadline = clock.now_millis() + budget;
    let tuned = tune(config, &seeded, &points, deadline, &clock, &mut rng)?;
    print_success("Tuning done.");
    println!("{}", tuned);
    Ok(())
}

fn cmd_classify(notation: &str) -> SquaresResult<()> {
    let line = parse_line(notation)?;
    let hand = crate::classify::classify(&line)?;
    println!("{}", hand);
    Ok(())
}

pub fn run() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Play {
            games,
            budget,
            depth,
            points,
            calibrate,
            config,
            strategy,
            seed,
        } => load_config(config.as_deref(), strategy).and_then(|cfg| {
            cmd_play(games, budget, depth, points.system(), calibrate, &cfg, seed)
        }),
        Commands::Tune {
            budget,
            points,
            config,
            strategy,
        } => load_config(config.as_deref(), strategy)
            .and_then(|cfg| cmd_tune(budget, points.system(), &cfg)),
        Commands::Classify { line } => cmd_classify(&line),
    };
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
