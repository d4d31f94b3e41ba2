use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use parliament_execution::logging::{self, LoggingOptions};
use parliament_infrastructure::{ConfigService, ParliamentPaths};
use std::path::PathBuf;
use tokio::sync::mpsc;

mod commands;

#[derive(Parser)]
#[command(name = "parliament")]
#[command(about = "Parliamentarium - a council of AI personas deliberating on your topic", long_about = None)]
struct Cli {
    /// Stream council log events to the terminal
    #[arg(long, global = true)]
    trace: bool,

    /// Configuration file (defaults to ~/.config/parliamentarium/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the council members
    Personas {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Describe the phases of a simulated session
    Phases,
    /// Propose a topic for the next session
    Propose {
        topic: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        proposer: Option<String>,
    },
    /// Hold a simulated session (uses the proposed topic when none is given)
    Convene {
        topic: Vec<String>,
        /// Seed for reproducible votes and lines
        #[arg(long)]
        seed: Option<u64>,
        /// Timeline speed multiplier (2.0 runs twice as fast)
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
    /// Deliberate with agent-backed council members
    Deliberate {
        topic: Vec<String>,
        /// Use scripted agents instead of LLM providers
        #[arg(long)]
        offline: bool,
    },
    /// Deliberate through a remote council server
    Remote {
        /// Server root, e.g. http://localhost:8001 (defaults to [remote].base_url)
        #[arg(long)]
        url: Option<String>,
        topic: Vec<String>,
    },
    /// Inspect the proposed-topic cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show the pending topic
    Show,
    /// Discard the pending topic
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    let mut options = LoggingOptions::from_config(&config.logging, ParliamentPaths::logs_dir().ok());
    let trace_printer = if cli.trace {
        let (tx, mut rx) = mpsc::unbounded_channel();
        options = options.with_events(tx);
        Some(tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let fields = serde_json::to_string(&event.fields).unwrap_or_default();
                eprintln!(
                    "{}",
                    format!("[{} {}] {} {}", event.level, event.target, event.message, fields)
                        .bright_black()
                );
            }
        }))
    } else {
        None
    };
    let _log_guard = logging::init(options)?;

    let result = match cli.command {
        Commands::Personas { json } => commands::personas::run(json),
        Commands::Phases => {
            commands::phases::run();
            Ok(())
        }
        Commands::Propose {
            topic,
            description,
            proposer,
        } => commands::propose::run(topic, description, proposer),
        Commands::Convene { topic, seed, speed } => {
            commands::convene::run(topic, seed, speed, &config).await
        }
        Commands::Deliberate { topic, offline } => {
            commands::deliberate::run_local(topic, offline, &config).await
        }
        Commands::Remote { url, topic } => commands::deliberate::run_remote(url, topic, &config).await,
        Commands::Cache { action } => match action {
            CacheAction::Show => commands::cache::show(),
            CacheAction::Clear => commands::cache::clear(),
        },
    };

    if let Some(printer) = trace_printer {
        printer.abort();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_convene_accepts_multiword_topic() {
        let cli = Cli::try_parse_from([
            "parliament", "--trace", "convene", "rooftop", "farms", "--seed", "7",
        ])
        .unwrap();
        assert!(cli.trace);
        match cli.command {
            Commands::Convene { topic, seed, speed } => {
                assert_eq!(topic, vec!["rooftop", "farms"]);
                assert_eq!(seed, Some(7));
                assert_eq!(speed, 1.0);
            }
            _ => panic!("expected convene"),
        }
    }

    #[test]
    fn test_cache_requires_action() {
        assert!(Cli::try_parse_from(["parliament", "cache"]).is_err());
        assert!(Cli::try_parse_from(["parliament", "cache", "clear"]).is_ok());
    }
}
