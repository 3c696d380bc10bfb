use clap::Parser;
use tokio::net::TcpListener;

use gateway_proxy::config;
use gateway_proxy::lifecycle::Shutdown;
use gateway_proxy::observability;
use gateway_proxy::HttpServer;

/// Forwarding proxy for normalized gateway events.
#[derive(Parser, Debug)]
#[command(name = "gateway-proxy", version, about)]
struct Args {
    /// Bind address override (falls back to BIND_ADDRESS, then 0.0.0.0:8080).
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Refuses to start without a target host.
    let (proxy_config, mut server_config) = config::load_from_env()?;
    if let Some(bind) = args.bind {
        server_config.bind_address = bind;
    }

    observability::logging::init(proxy_config.debug_logging);

    tracing::info!(
        target_host = %proxy_config.target_host,
        target_port = ?proxy_config.target_port,
        https = proxy_config.use_https,
        cors = proxy_config.add_cors_header,
        path_prefix = ?proxy_config.path_prefix,
        exclude_path_prefix = ?proxy_config.exclude_path_prefix,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&server_config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    let shutdown_rx = shutdown.subscribe();

    let server = HttpServer::new(proxy_config, server_config);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
