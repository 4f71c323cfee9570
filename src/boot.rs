//! # Boot
//!
//! Startup is an explicit phase: load the ontologies, classify them once,
//! freeze the result into the [`AppContext`], and only then bind the
//! listener. Nothing mutates the knowledge base afterwards.

use axum::Router;
use colored::Colorize;

use crate::{
    app::AppContext,
    config::Config,
    controller,
    environment::Environment,
    ontology::{OntologyService, ReasoningStatus},
    Result,
};

/// Where the HTTP server listens.
#[derive(Debug, Clone)]
pub struct ServeParams {
    pub port: u16,
    pub binding: String,
}

impl From<&Config> for ServeParams {
    fn from(config: &Config) -> Self {
        Self {
            port: config.server.port,
            binding: config.server.binding.clone(),
        }
    }
}

/// Runs the initialization phase and returns the immutable application
/// context.
pub async fn create_context(environment: &Environment, config: Config) -> AppContext {
    tracing::info!(environment = %environment, "starting up ontology service");
    let ontology = OntologyService::boot(&config.ontology, &config.reasoner).await;
    AppContext::new(environment.clone(), config, ontology)
}

/// Builds the router for an already booted context.
#[must_use]
pub fn create_router(ctx: &AppContext) -> Router {
    controller::router(ctx.clone())
}

/// Serves HTTP until Ctrl-C or SIGTERM.
///
/// # Errors
/// When the listener cannot be bound or the server fails.
pub async fn start(ctx: AppContext, params: ServeParams) -> Result<()> {
    let router = create_router(&ctx);
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", params.binding, params.port)).await?;

    print_banner(&ctx, &params);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down ontology service");
    Ok(())
}

fn print_banner(ctx: &AppContext, params: &ServeParams) {
    let store = ctx.ontology.store();
    let reasoning = match ctx.ontology.reasoning() {
        ReasoningStatus::Skipped => "skipped".yellow(),
        ReasoningStatus::Completed { inferred } => format!("completed ({inferred} inferred)").green(),
        ReasoningStatus::Failed { .. } => "failed, asserted knowledge only".red(),
    };

    println!();
    println!("{}", "ontology service".bold());
    println!("     environment: {}", ctx.environment.to_string().green());
    println!(
        "      ontologies: {} from {}",
        store.len().to_string().green(),
        store.directory().display()
    );
    println!("       reasoning: {reasoning}");
    println!(
        "       listening on {}",
        format!("http://{}:{}", params.binding, params.port).cyan()
    );
    println!();
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
