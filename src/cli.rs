//! # Command line interface
//!
//! ```sh
//! ontology-service start --port 8080
//! ontology-service ontologies
//! ontology-service superclasses animals Dog
//! ontology-service config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::{
    boot::{self, ServeParams},
    config::Config,
    environment::{resolve_from_env, Environment, DEFAULT_ENVIRONMENT},
    logger, Result,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Specify the environment
    #[arg(short, long, global = true, help = &format!("Specify the environment [default: {}]", DEFAULT_ENVIRONMENT))]
    environment: Option<String>,

    /// Folder holding `<environment>.yaml`
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and reason over the ontologies, then serve the HTTP API
    Start {
        /// server bind address
        #[arg(short, long, action)]
        binding: Option<String>,
        /// server port address
        #[arg(short, long, action)]
        port: Option<u16>,
    },
    /// Print the names of the ontologies that load successfully
    Ontologies,
    /// Print the labels of every ancestor of a class
    Superclasses {
        /// Ontology name (file name without extension)
        ontology: String,
        /// Class name or trailing IRI fragment
        class: String,
        /// Skip the external reasoner and use asserted knowledge only
        #[arg(long)]
        no_reasoner: bool,
    },
    /// Print the resolved configuration
    Config,
}

/// Entry point of the `ontology-service` binary.
///
/// # Errors
/// When the configuration cannot be loaded, logging cannot be initialized,
/// the server fails, or a query misses.
pub async fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    let environment: Environment = cli.environment.unwrap_or_else(resolve_from_env).into();
    let config = environment.load_from_folder(&cli.config_dir)?;

    logger::init(&config.logger)?;

    match cli.command {
        Commands::Start { binding, port } => {
            let mut params = ServeParams::from(&config);
            if let Some(binding) = binding {
                params.binding = binding;
            }
            if let Some(port) = port {
                params.port = port;
            }
            let ctx = boot::create_context(&environment, config).await;
            boot::start(ctx, params).await?;
        }
        Commands::Ontologies => {
            let mut config = config;
            config.reasoner.enable = false;
            let ctx = boot::create_context(&environment, config).await;
            let names = ctx.ontology.names();
            if names.is_empty() {
                eprintln!(
                    "{} add ontology files to '{}' and try again",
                    "no ontologies loaded:".yellow(),
                    ctx.ontology.store().directory().display()
                );
            }
            for name in names {
                println!("{name}");
            }
        }
        Commands::Superclasses {
            ontology,
            class,
            no_reasoner,
        } => {
            let mut config = config;
            if no_reasoner {
                config.reasoner.enable = false;
            }
            let ctx = boot::create_context(&environment, config).await;
            for label in ctx.ontology.superclass_labels(&ontology, &class)? {
                println!("{label}");
            }
        }
        Commands::Config => {
            print_config(&config)?;
        }
    }
    Ok(())
}

fn print_config(config: &Config) -> Result<()> {
    println!("{}", config.to_yaml()?);
    Ok(())
}
