use ai_chef::{client::ChefConfig, ChefApp, ChefMcpServer};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3001".to_string());

    // Missing settings do not stop the server: every tool answers with a notice instead
    let config = ChefConfig::from_env();
    if let Err(e) = &config {
        tracing::error!("Configuration problem: {}", e);
        tracing::error!("Please verify:");
        tracing::error!("  - SUPABASE_URL points at your project");
        tracing::error!("  - SUPABASE_PUBLISHABLE_DEFAULT_KEY is set");
        tracing::error!("  - optional CHEF_* settings are valid");
    }
    let app = ChefApp::new(config);

    let config = SseServerConfig {
        bind: bind_addr.parse()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("AI Chef MCP Server listening on {}", config.bind);

    let sse_server = SseServer::serve_with_config(config).await?;

    // Sessions share one app, so the pending-generation guard spans all of them
    let ct = sse_server.with_service(move || ChefMcpServer::new(app.clone()));

    tracing::info!("AI Chef MCP Server started successfully");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
