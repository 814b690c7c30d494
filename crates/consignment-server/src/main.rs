use clap::Parser;
use consignment_server::server::{
    config::{CliArgs, ServerConfig},
    listener::run_server_with_incoming,
    repository::InMemoryRepository,
    service::ConsignmentService,
    telemetry::{init_telemetry, shutdown_telemetry},
};
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let providers = init_telemetry()?;

    // The store lives exactly as long as the server.
    let service: ConsignmentService = ConsignmentService::new(InMemoryRepository::new());

    let res = if config.uds {
        #[cfg(unix)]
        {
            use tokio::net::UnixListener;
            use tokio_stream::wrappers::UnixListenerStream;
            let uds_path = config.server_addr.clone();
            let uds = UnixListener::bind(&uds_path)?;
            let incoming = UnixListenerStream::new(uds);
            log_startup_info(&uds_path, &config);
            let res = run_server_with_incoming(service, incoming, shutdown_signal()).await;
            // Best effort: a panic can still leave the socket file behind.
            let _ = std::fs::remove_file(&uds_path);
            res
        }
        #[cfg(not(unix))]
        {
            anyhow::bail!("Unix domain sockets are not supported on this platform");
        }
    } else {
        let tcp_path = config.server_addr.clone();
        let tcp = TcpListener::bind(&tcp_path).await?;
        let incoming = TcpListenerStream::new(tcp);
        log_startup_info(&tcp_path, &config);
        run_server_with_incoming(service, incoming, shutdown_signal()).await
    };

    shutdown_telemetry(providers);
    res
}

fn log_startup_info(addr: &str, config: &ServerConfig) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting consignment service on {} with full config: {:#?}",
            addr,
            config
        );
    } else {
        tracing::info!("Starting consignment service on {}", addr);
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}
