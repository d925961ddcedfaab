use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use qcm::router::init_router;
use qcm::state::AppState;
use qcm_config::DatabaseConfig;
use qcm_db::{PgStore, init_db_pool};
use qcm_observability::{LoggingConfig, init_logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "qcm", version, about = "Quiz management API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run database migrations and start the HTTP server
    Serve(ServeArgs),
    /// Create an admin account
    CreateAdmin(CreateAdminArgs),
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "PORT")]
    port: u16,
}

#[derive(Args)]
struct CreateAdminArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    init_logging(&LoggingConfig::from_env())?;

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::CreateAdmin(args) => create_admin(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()?)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let state = AppState::from_env(Arc::new(PgStore::new(pool)))?;
    let app = init_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "Server listening");
    info!("OpenAPI document at http://{addr}/api-docs/openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn create_admin(args: CreateAdminArgs) -> anyhow::Result<()> {
    let pool = init_db_pool(&DatabaseConfig::from_env()?)
        .await
        .context("failed to connect to database")?;
    let store = PgStore::new(pool);

    let id = qcm::cli::create_admin(&store, &args.username, &args.email, &args.password).await?;
    info!(user_id = id, username = %args.username, "Admin created");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
