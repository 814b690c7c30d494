use anyhow::{Context, bail};
use clap::Parser;
use std::net::SocketAddr;

/// Runtime configuration for the `consignment-server` binary.
///
/// Values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first, if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "consignment-server",
    version,
    about = "A gRPC service for storing and listing shipment consignments"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/consignment.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let server_addr = args.server_addr.trim().to_string();

        if server_addr.is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        if !args.uds {
            server_addr
                .parse::<SocketAddr>()
                .with_context(|| format!("SERVER_ADDR ({server_addr}) is not a valid host:port"))?;
        }

        Ok(Self {
            server_addr,
            uds: args.uds,
        })
    }
}
