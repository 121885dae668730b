use anyhow::Result;
use fnapps_core::{ApplicationService, ConfigProvider, COMPARTMENT_ID_KEY};
use fnapps_remote::HttpFunctionsClient;
use fnapps_server::{run_until_cancelled, Config};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with INFO level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load_default()?;

    tracing::info!("fnapps server starting...");
    tracing::info!("Transport: {}", config.server.transport);
    tracing::info!("Functions endpoint: {}", config.functions.endpoint);

    if config.get_string(COMPARTMENT_ID_KEY).is_empty() {
        tracing::warn!(
            "{} is not set; application tools will fail until it is. Example config:\n{}",
            COMPARTMENT_ID_KEY,
            Config::example()
        );
    }

    // Initialize functions client and application service
    let client = HttpFunctionsClient::new(&config.functions.client_config())?;
    let app_service = ApplicationService::new(Arc::new(client), Arc::new(config.clone()));

    // Cancel in-flight remote calls on Ctrl-C
    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested, cancelling in-flight requests");
            signal.cancel();
        }
    });

    // Create MCP server
    let mcp_server = fnapps_server::McpServer::with_cancellation(app_service, shutdown.clone());

    match config.server.transport.as_str() {
        "http" => {
            tracing::info!("MCP server initialized successfully");
            tracing::info!(
                "fnapps ready to accept MCP requests via HTTP on {}:{}",
                config.server.bind_address,
                config.server.port
            );
            tracing::info!(
                "MCP endpoints: http://localhost:{}/sse (SSE), http://localhost:{}/message (POST)",
                config.server.port,
                config.server.port
            );

            // Run HTTP server with SSE transport
            use rmcp::transport::sse_server::SseServer;
            use rmcp::ServiceExt;

            let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port).parse()?;
            let mut sse_server = SseServer::serve(bind_addr).await?;

            // Process incoming SSE transports until shutdown
            loop {
                let transport = tokio::select! {
                    () = shutdown.cancelled() => break,
                    transport = sse_server.next_transport() => transport,
                };
                let Some(transport) = transport else { break };

                let server = mcp_server.clone();
                let shutdown = shutdown.clone();
                tokio::spawn(async move {
                    match server.serve(transport).await {
                        Ok(service) => {
                            if let Err(e) = run_until_cancelled(service, &shutdown).await {
                                tracing::error!("Service error: {}", e);
                            }
                        }
                        Err(e) => {
                            tracing::error!("Failed to serve transport: {}", e);
                        }
                    }
                });
            }
        }
        "stdio" => {
            tracing::info!("MCP server initialized successfully");
            tracing::info!("fnapps ready to accept MCP requests via stdio");

            // Run the MCP server over stdio until it closes or Ctrl-C
            use rmcp::{transport::stdio, ServiceExt};
            let service = mcp_server.serve(stdio()).await?;
            run_until_cancelled(service, &shutdown).await?;
        }
        other => {
            anyhow::bail!("Invalid transport type: {}. Must be 'stdio' or 'http'", other);
        }
    }

    Ok(())
}
