use anyhow::Context;
use clap::Parser;
use consignment_core::proto::{
    Consignment, GetRequest, shipping_service_client::ShippingServiceClient,
};
use std::path::{Path, PathBuf};
use tonic::{codec::CompressionEncoding, transport::Channel};
use tracing_subscriber::EnvFilter;

/// Submits a consignment read from a JSON file, then lists everything the
/// server has stored.
#[derive(Parser, Debug)]
#[command(
    name = "consignment-cli",
    version,
    about = "Client for the consignment shipping service"
)]
struct CliArgs {
    /// JSON file describing the consignment to create.
    #[arg(default_value = "consignment.json")]
    file: PathBuf,

    /// URL of the shipping service.
    ///
    /// Environment variable: `SERVER_URL`
    #[arg(long, env = "SERVER_URL", default_value_t = String::from("http://127.0.0.1:50051"))]
    server_url: String,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let consignment = read_consignment(&args.file).await?;

    let channel = Channel::from_shared(args.server_url.clone())
        .with_context(|| format!("invalid server URL `{}`", args.server_url))?
        .connect()
        .await
        .with_context(|| format!("failed to connect to {}", args.server_url))?;
    let mut client = ShippingServiceClient::new(channel)
        .send_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Zstd);

    let created = client
        .create_consignment(consignment)
        .await
        .context("CreateConsignment failed")?
        .into_inner();
    tracing::info!(created = created.created, "Created: {:?}", created.consignment);

    let listed = client
        .get_consignments(GetRequest {})
        .await
        .context("GetConsignments failed")?
        .into_inner();
    tracing::info!("{} consignment(s) stored", listed.consignments.len());
    for c in &listed.consignments {
        println!("{}", serde_json::to_string(c)?);
    }

    Ok(())
}

async fn read_consignment(path: &Path) -> anyhow::Result<Consignment> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_consignment(&raw).with_context(|| format!("invalid consignment in {}", path.display()))
}

fn parse_consignment(raw: &str) -> serde_json::Result<Consignment> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let c = parse_consignment(include_str!("../consignment.json")).unwrap();
        assert_eq!(c.id, "C1");
        assert_eq!(c.weight, 550);
        assert_eq!(c.vessel_id, "vessel001");
        assert_eq!(c.containers.len(), 1);
        assert_eq!(c.containers[0].origin, "Manchester, United Kingdom");
        // Omitted in the document.
        assert_eq!(c.containers[0].id, "");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c = parse_consignment(r#"{"id":"C2","weight":200}"#).unwrap();
        assert_eq!(
            c,
            Consignment {
                id: "C2".to_string(),
                weight: 200,
                ..Default::default()
            }
        );
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(parse_consignment(r#"{"weight":"heavy"}"#).is_err());
    }
}
