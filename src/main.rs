use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ti_stats::api::state::AppState;
use ti_stats::calculate::{
    active_filter_count, aggregate, best_faction, filter_games, most_played_faction,
    player_leaderboard, position_stats,
};
use ti_stats::config::AppConfig;
use ti_stats::models::{Dataset, FilterCriteria};
use ti_stats::storage::{check_dataset, DatasetReader};

#[derive(Parser)]
#[command(name = "ti-stats")]
#[command(about = "Statistics for a board-game group's Twilight Imperium games")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the statistics overview
    Summary {
        /// Only games this player took part in (repeatable)
        #[arg(long = "player")]
        players: Vec<String>,

        /// Only games where this faction was played (repeatable)
        #[arg(long = "faction")]
        factions: Vec<String>,

        /// Only games with this many players (repeatable)
        #[arg(long = "players-count")]
        player_counts: Vec<u32>,

        /// Only games played to this many victory points (repeatable)
        #[arg(long = "game-type")]
        game_types: Vec<u32>,

        /// First start date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last start date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only count the selected players in the tables
        #[arg(long)]
        personal: bool,
    },

    /// Report structural problems in the dataset
    Check,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn parse_date_arg(value: Option<String>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .with_context(|| format!("Invalid --{} date (expected YYYY-MM-DD): {}", flag, s))
        })
        .transpose()
}

fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    let reader = DatasetReader::from_config(&config.storage());
    reader
        .read()
        .with_context(|| format!("Failed to load dataset from {:?}", reader.path()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = PathBuf::from(&cli.config);
    let mut config = AppConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config {:?}", config_path))?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    init_tracing(
        cli.log_level.as_deref().unwrap_or(&config.log_level),
        cli.json_logs,
    );

    tracing::info!("Starting ti-stats v{}", env!("CARGO_PKG_VERSION"));
    if !config_path.exists() {
        tracing::info!("No config file at {:?}, using defaults", config_path);
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let dataset = load_dataset(&config)?;
            let state = AppState::new(dataset, config.stats.clone());
            let app = ti_stats::api::build_app(state, &config.server);

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Summary {
            players,
            factions,
            player_counts,
            game_types,
            from,
            to,
            personal,
        } => {
            let mut criteria = FilterCriteria::new();
            criteria.players.extend(players);
            criteria.factions.extend(factions);
            criteria.player_counts.extend(player_counts);
            criteria.game_types.extend(game_types);
            let from = parse_date_arg(from, "from")?;
            let to = parse_date_arg(to, "to")?;
            if from.is_some() || to.is_some() {
                criteria = criteria.with_date_range(from, to);
            }

            let dataset = load_dataset(&config)?;
            let chronological = dataset.chronological();
            let games = filter_games(&chronological, &criteria);
            let subset = if personal {
                criteria.player_subset()
            } else {
                Vec::new()
            };
            let summary = aggregate(&games, &subset);

            println!("\n=== Overview ===");
            println!("Active filters:   {}", active_filter_count(&criteria));
            println!("Games:            {}", summary.total_games);
            println!("Avg duration:     {} days", summary.avg_duration_days);
            println!("Avg rounds:       {:.1}", summary.avg_rounds);

            let min_games = config.stats.best_faction_min_games;
            match best_faction(&summary.factions, min_games) {
                Some(f) => println!(
                    "Best faction:     {} ({:.1}% over {} games)",
                    f.full_name.as_deref().unwrap_or(&f.short_name),
                    f.win_rate,
                    f.games
                ),
                None => println!("Best faction:     - (none with {}+ games)", min_games),
            }
            if let Some(f) = most_played_faction(&summary.factions) {
                println!(
                    "Most played:      {} ({} games)",
                    f.full_name.as_deref().unwrap_or(&f.short_name),
                    f.games
                );
            }

            let positions = position_stats(&games);
            if let Some(best) = positions.best_position() {
                println!(
                    "Best position:    {} ({:.1}% vs {:.1}% expected)",
                    best.position, best.win_rate, best.expected_rate
                );
            }

            println!("\n=== Players ===");
            println!("{:<20} {:>6} {:>6} {:>8} {:>8}", "Player", "Games", "Wins", "Win %", "Avg VP");
            for p in player_leaderboard(&summary.players) {
                println!(
                    "{:<20} {:>6} {:>6} {:>8.1} {:>8.1}",
                    p.name, p.games, p.wins, p.win_rate, p.avg_points
                );
            }
        }
        Commands::Check => {
            let dataset = load_dataset(&config)?;
            let issues = check_dataset(&dataset);

            println!("\n=== Dataset Check ===");
            println!("Games:            {}", dataset.games.len());
            println!("Players:          {}", dataset.players.len());
            println!("Factions:         {}", dataset.factions.len());
            if issues.is_empty() {
                println!("\nNo issues found.");
            } else {
                println!("\nIssues ({}):", issues.len());
                for issue in &issues {
                    println!("  - {}", issue);
                }
            }
        }
    }

    Ok(())
}
