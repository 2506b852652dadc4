use tracing::info;

use neuroviz::config::Config;
use neuroviz::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("[neuroviz] Starting neuroviz server");
    info!("[neuroviz] Neuron API: {}", config.api_prefix());
    info!("[neuroviz] UI links: {}", config.ui_prefix());
    info!(
        "[neuroviz] Token window: {} before, {} after peak",
        config.window.before, config.window.after
    );
    if let Some(timeout) = config.api_timeout {
        info!("[neuroviz] Neuron API timeout: {:?}", timeout);
    }

    let state = AppState::new(config.clone())?;
    let app = neuroviz::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[neuroviz] Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
