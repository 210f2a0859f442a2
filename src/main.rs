use std::time::Duration;

use tracing_subscriber::EnvFilter;

use clinic_chat::config::ClientConfig;
use clinic_chat::handlers::terminal;
use clinic_chat::services::backend::http::HttpChatBackend;
use clinic_chat::services::controller::ConversationController;
use clinic_chat::services::session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let config = ClientConfig::from_env()?;

    let session_id = session::open_session(&config)?;
    tracing::info!(
        session_id = %session_id,
        persistence = config.session_persistence.as_str(),
        "session ready"
    );

    let backend = HttpChatBackend::new(
        &config.backend_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    tracing::info!("using chat backend at {}", backend.endpoint());

    let controller = ConversationController::new(session_id, Box::new(backend), config.hours_policy);

    terminal::run(controller).await
}
