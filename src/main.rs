use aniwatch::config::ConfigManager;
use aniwatch::models::{SearchOptions, ServerExtraData};
use aniwatch::{AniWatchProvider, OnlineStreamingProvider};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "aniwatch")]
#[command(about = "Probe the AniWatch provider from the terminal", long_about = None)]
struct Cli {
    /// Overrides the site origin from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// More log output (-v info, -vv debug). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Settings,
    Search {
        query: String,
        #[arg(long)]
        dub: bool,
    },
    Episodes {
        id: String,
    },
    Servers {
        episode_id: String,
    },
    Source {
        episode_id: String,
        server_id: String,
        #[arg(short, long, default_value = "default")]
        name: String,
    },
    /// Picks a server and resolves its sources in one go.
    Resolve {
        episode_id: String,
        #[arg(short, long)]
        server: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config_manager = ConfigManager::new()?;
    log::debug!("Configuration loaded from: {:?}", config_manager.config_path);

    let mut config = config_manager.config.provider;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let provider = AniWatchProvider::new(config).context("Failed to build provider")?;

    match cli.command {
        Commands::Settings => print_json(&provider.get_settings())?,
        Commands::Search { query, dub } => {
            let results = provider.search(SearchOptions { query, dub }).await;
            print_json(&results)?;
        }
        Commands::Episodes { id } => print_json(&provider.find_episodes(&id).await)?,
        Commands::Servers { episode_id } => {
            print_json(&provider.find_episode_server(&episode_id).await)?
        }
        Commands::Source {
            episode_id,
            server_id,
            name,
        } => {
            let extra = ServerExtraData {
                server_id,
                episode_id: provider.normalize_id(&episode_id),
            };
            let source = provider
                .find_episode_source(&episode_id, &name, Some(&extra))
                .await;
            print_json(&source)?;
        }
        Commands::Resolve { episode_id, server } => {
            let resolved = provider
                .find_episode_server_with_sources(&episode_id, server.as_deref())
                .await;
            print_json(&resolved)?;
        }
    }

    Ok(())
}
