use std::env;
use std::sync::Arc;

use leave_adjudicator::adjudication::Adjudicator;
use leave_adjudicator::api::{AppState, create_router};
use leave_adjudicator::backend::OpenAiBackend;
use leave_adjudicator::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_POLICY_DIR: &str = "./config/leave_policy";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("leave-adjudicator: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let policy_dir = env::var("LEAVE_POLICY_DIR").unwrap_or_else(|_| DEFAULT_POLICY_DIR.to_string());
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let loader = ConfigLoader::load(&policy_dir)?;
    let backend = OpenAiBackend::from_env(loader.config().backend())?;
    let adjudicator = Adjudicator::new(loader.config(), Arc::new(backend));
    let app = create_router(AppState::new(adjudicator));

    let listener = TcpListener::bind(&bind_addr).await?;
    info!(
        %bind_addr,
        %policy_dir,
        model = %loader.config().backend().model,
        "Leave adjudication engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
}
