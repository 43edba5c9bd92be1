//! Trie Index - Main entrypoint.
//!
//! Loads the configuration, builds the completion index from the configured
//! vocabulary and answers a single query.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

use trie_index_lib::completion::{CachedCompletion, Completion};
use trie_index_lib::config::{self, AppConfig, ConfigLoader};
use trie_index_lib::error::{TrieIndexError, TrieIndexResult};

/// Command line arguments for the trie index.
#[derive(Parser, Debug)]
#[clap(name = "Trie Index", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the literals an argument may complete to
    Complete {
        /// The partially typed argument
        argument: String,

        /// Print the suggestions as a JSON array
        #[clap(long)]
        json: bool,
    },

    /// Check whether a literal is part of the vocabulary
    Lookup {
        /// The literal to look up
        literal: String,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Loads the configuration or exits with a logged error.
fn load_config(loader: &ConfigLoader) -> AppConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    }
}

/// Builds the completion index from the configured vocabulary.
fn build_completion(config: &AppConfig) -> TrieIndexResult<CachedCompletion> {
    let literals = config.vocabulary.load_literals()?;
    info!(literals = literals.len(), "Indexing vocabulary");
    Ok(CachedCompletion::new(literals, &config.completion))
}

/// Main entry point for the application.
fn main() -> TrieIndexResult<()> {
    let args = Args::parse();
    let loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);

    match args.command.unwrap_or(Command::Validate) {
        Command::Complete { argument, json } => {
            let config = load_config(&loader);
            trie_index_lib::init_logging(&config.log)?;

            let suggestions = build_completion(&config)?.complete(&argument);
            if json {
                println!("{}", serde_json::to_string(&suggestions)?);
            } else {
                for suggestion in &suggestions {
                    println!("{suggestion}");
                }
            }
            Ok(())
        }
        Command::Lookup { literal } => {
            let config = load_config(&loader);
            trie_index_lib::init_logging(&config.log)?;

            if build_completion(&config)?.contains(&literal) {
                println!("{literal}");
                Ok(())
            } else {
                error!(literal = %literal, "Literal not found in vocabulary");
                process::exit(2);
            }
        }
        Command::Validate => {
            let config = load_config(&loader);
            trie_index_lib::init_logging(&config.log)?;

            info!("Validating configuration");
            let literals = config.vocabulary.load_literals()?;
            info!(literals = literals.len(), "Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            let default_config = AppConfig::default();
            trie_index_lib::init_logging(&default_config.log)?;
            info!("Generating default configuration");

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| TrieIndexError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}
