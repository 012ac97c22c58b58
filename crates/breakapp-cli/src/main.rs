use anyhow::Result;
use breakapp_application::CommandRequest;
use breakapp_core::geo::Coordinate;
use breakapp_core::language::Language;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod bootstrap;
mod commands;
mod render;

use bootstrap::EngineOptions;

#[derive(Parser)]
#[command(name = "breakapp")]
#[command(about = "BreakApp - conversational food ordering for production crews", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/breakapp/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Menu catalog TOML (defaults to ~/.config/breakapp/catalog.toml, then demo data)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory for conversation session files
    #[arg(long, global = true)]
    sessions_dir: Option<PathBuf>,

    /// Keep sessions in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// User placing orders
    #[arg(long, global = true, default_value = "crew-1")]
    user: String,

    /// Conversation language code (en, ar); defaults to the configured language
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Copy)]
struct LocationArgs {
    /// Latitude of the caller
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude of the caller
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
}

impl LocationArgs {
    fn coordinate(self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive conversation (default)
    Repl {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Process a single utterance
    Say {
        /// What the user said
        text: String,
        /// Continue an existing conversation
        #[arg(long)]
        session: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Confirm or decline the staged order of a conversation
    Confirm {
        session: String,
        /// Decline instead of confirming
        #[arg(long)]
        decline: bool,
    },
    /// List restaurants near a point
    Nearby {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Search radius in kilometres
        #[arg(long)]
        radius: Option<f64>,
        /// List available menu items instead of restaurants
        #[arg(long)]
        items: bool,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = EngineOptions {
        config: cli.config,
        catalog: cli.catalog,
        sessions_dir: cli.sessions_dir,
        ephemeral: cli.ephemeral,
    };
    let config = bootstrap::load_config(&options);
    bootstrap::init_tracing(&config.logging);

    let command = cli.command.unwrap_or(Commands::Repl {
        location: LocationArgs {
            lat: None,
            lon: None,
        },
    });
    if let Commands::Config = command {
        return commands::config::show(&config);
    }

    let language = cli
        .lang
        .as_deref()
        .map_or(config.engine.default_language, Language::from_code);
    let usecase = bootstrap::build_usecase(&options, &config).await?;

    match command {
        Commands::Repl { location } => {
            commands::repl::run(&usecase, cli.user, language, location.coordinate()).await?
        }
        Commands::Say {
            text,
            session,
            location,
        } => {
            let request = CommandRequest {
                user_id: cli.user,
                transcript: text,
                language,
                session_id: session,
                location: location.coordinate(),
            };
            commands::say::run(&usecase, request, cli.json).await?
        }
        Commands::Confirm { session, decline } => {
            commands::confirm::run(&usecase, &cli.user, &session, !decline, cli.json).await?
        }
        Commands::Nearby {
            lat,
            lon,
            radius,
            items,
        } => {
            commands::nearby::run(&usecase, Coordinate::new(lat, lon), radius, items, cli.json)
                .await?
        }
        Commands::Config => {}
    }

    Ok(())
}
