mod api;
mod config;
mod error;
mod server;
mod state;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use server::RecipeFinderServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries MCP JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting recipe-finder MCP server");

    let config = Config::from_env()?;
    info!(
        base_url = %config.spoonacular.base_url,
        api_key = config.spoonacular.api_key.is_some(),
        result_limit = config.spoonacular.result_limit,
        demo = config.demo,
        "configuration loaded"
    );

    let backend = Arc::new(config.backend()?);
    info!(mode = ?backend.mode(), "recipe backend ready");

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = RecipeFinderServer::new(Arc::clone(&backend));
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        let server = RecipeFinderServer::new(backend);
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
