use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::config::GameConfig;
use crate::display::{print_error, print_section, print_success, results_table, simulation_table};
use crate::error::RpsResult;
use crate::play::play_command;
use crate::random::{from_entropy, seeded};
use crate::results::{validate_team_code, JsonDirStore, ResultStore};
use crate::session::Session;
use crate::simulate::{simulate, PlayerPattern};

#[derive(Parser)]
#[command(name = "rps", version = "1.0.0", about = "Rock-Paper-Scissors against a pattern-learning AI.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum Preset {
    Classic,
    Marathon,
}

impl Preset {
    fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Marathon => "marathon",
        }
    }
}

#[derive(Clone, ValueEnum)]
enum Pattern {
    Cycle,
    Repeat,
    Mirror,
    Random,
    Biased,
    All,
}

impl Pattern {
    fn patterns(&self) -> Vec<PlayerPattern> {
        match self {
            Pattern::Cycle => vec![PlayerPattern::Cycle],
            Pattern::Repeat => vec![PlayerPattern::Repeat],
            Pattern::Mirror => vec![PlayerPattern::Mirror],
            Pattern::Random => vec![PlayerPattern::Random],
            Pattern::Biased => vec![PlayerPattern::Biased],
            Pattern::All => PlayerPattern::all().to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the AI
    Play {
        /// Team code recorded with the result (asked for if omitted)
        #[arg(long)]
        team: Option<String>,
        /// Game preset
        #[arg(short, long, default_value = "classic")]
        preset: Preset,
        /// JSON config file (overrides the preset)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Round limit override
        #[arg(short, long)]
        rounds: Option<u32>,
        /// Time limit override in seconds
        #[arg(short, long = "time-limit")]
        time_limit: Option<u64>,
        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,
        /// Directory for saved results
        #[arg(long = "results-dir")]
        results_dir: Option<PathBuf>,
        /// Do not save the result
        #[arg(long = "no-save")]
        no_save: bool,
    },
    /// Pit the AI against a scripted player over many games
    Simulate {
        /// Player pattern
        #[arg(long, default_value = "all")]
        pattern: Pattern,
        /// Number of games per pattern
        #[arg(short = 'n', long, default_value = "200")]
        games: usize,
        /// Game preset
        #[arg(short, long, default_value = "classic")]
        preset: Preset,
        /// JSON config file (overrides the preset)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Round limit override
        #[arg(short, long)]
        rounds: Option<u32>,
        /// Base seed
        #[arg(long, default_value = "1")]
        seed: u64,
    },
    /// List saved game results
    Results {
        /// Directory holding saved results
        #[arg(long = "results-dir")]
        results_dir: Option<PathBuf>,
    },
    /// Print a preset as JSON, ready to edit and pass via --config
    Config {
        #[arg(short, long, default_value = "classic")]
        preset: Preset,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    let outcome = match cli.command {
        Commands::Play {
            team,
            preset,
            config,
            rounds,
            time_limit,
            seed,
            results_dir,
            no_save,
        } => cmd_play(team, preset, config, rounds, time_limit, seed, results_dir, no_save),
        Commands::Simulate {
            pattern,
            games,
            preset,
            config,
            rounds,
            seed,
        } => cmd_simulate(pattern, games, preset, config, rounds, seed),
        Commands::Results { results_dir } => cmd_results(results_dir),
        Commands::Config { preset } => cmd_config(preset),
    };
    if let Err(e) = outcome {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn resolve_config(preset: &Preset, path: Option<PathBuf>, rounds: Option<u32>) -> RpsResult<GameConfig> {
    let mut config = match path {
        Some(p) => GameConfig::load(&p)?,
        None => GameConfig::preset(preset.as_str())?,
    };
    if rounds.is_some() {
        config.round_limit = rounds;
    }
    config.validate()?;
    Ok(config)
}

#[allow(clippy::too_many_arguments)]
fn cmd_play(
    team: Option<String>,
    preset: Preset,
    config_path: Option<PathBuf>,
    rounds: Option<u32>,
    time_limit: Option<u64>,
    seed: Option<u64>,
    results_dir: Option<PathBuf>,
    no_save: bool,
) -> RpsResult<()> {
    let mut config = resolve_config(&preset, config_path, rounds)?;
    if time_limit.is_some() {
        config.time_limit_secs = time_limit;
        config.validate()?;
    }
    let team = team.map(|t| validate_team_code(&t)).transpose()?;

    let rng = match seed {
        Some(s) => seeded(s),
        None => from_entropy(),
    };
    log::info!("starting game: {:?}", config);
    let mut session = Session::new(config, rng);

    let store = JsonDirStore::new(results_dir.unwrap_or_else(JsonDirStore::default_dir));
    let store_ref: Option<&dyn ResultStore> = if no_save { None } else { Some(&store) };
    play_command(&mut session, team, store_ref);
    Ok(())
}

fn cmd_simulate(
    pattern: Pattern,
    games: usize,
    preset: Preset,
    config_path: Option<PathBuf>,
    rounds: Option<u32>,
    seed: u64,
) -> RpsResult<()> {
    let config = resolve_config(&preset, config_path, rounds)?;
    let rounds_label = config
        .round_limit
        .map(|r| r.to_string())
        .unwrap_or_else(|| crate::simulate::DEFAULT_SIM_ROUNDS.to_string());

    println!();
    println!(
        "{}",
        format!("Simulating {} games of {} rounds per pattern", games, rounds_label)
            .cyan()
            .bold()
    );

    for p in pattern.patterns() {
        let summary = simulate(&config, p, games, seed);
        println!("\n{}", simulation_table(p, &summary));
    }
    Ok(())
}

fn cmd_results(results_dir: Option<PathBuf>) -> RpsResult<()> {
    let store = JsonDirStore::new(results_dir.unwrap_or_else(JsonDirStore::default_dir));
    let results = store.load_all()?;
    if results.is_empty() {
        print_section("Results", &format!("No results in {}", store.dir().display()));
        return Ok(());
    }
    let wins = results.iter().filter(|r| r.win).count();
    println!();
    println!("{}", results_table(&results));
    print_success(&format!("{} games, {} won against the AI", results.len(), wins));
    Ok(())
}

fn cmd_config(preset: Preset) -> RpsResult<()> {
    let config = GameConfig::preset(preset.as_str())?;
    println!("{}", config.to_json()?);
    Ok(())
}
