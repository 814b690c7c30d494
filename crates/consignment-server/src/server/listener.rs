//! Server assembly shared by the binary, the integration tests, and the
//! benchmarks.
//!
//! [`run_server_with_incoming`] wires the shipping service together with the
//! gRPC health and reflection services behind a CORS + gRPC-Web layer, then
//! serves connections from any listener stream until `signal` resolves.

use crate::server::{
    repository::Repository,
    service::{ConsignmentService, build_shipping_service},
};
use consignment_core::proto::{
    Consignment, FILE_DESCRIPTOR_SET, shipping_service_server::ShippingServiceServer,
};
use futures::Stream;
use std::future::Future;
use tokio::io::{AsyncRead, AsyncWrite};
use tonic::transport::{Server, server::Connected};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Serves the shipping API on `incoming` until `signal` completes.
///
/// The health service reports `SERVING` for `consignment.ShippingService`
/// while connections are accepted and flips to `NOT_SERVING` as soon as the
/// shutdown signal fires, before in-flight calls drain.
///
/// # Errors
///
/// Fails if the reflection service cannot be built or the transport errors.
pub async fn run_server_with_incoming<R, I, IO, IE, F>(
    service: ConsignmentService<R>,
    incoming: I,
    signal: F,
) -> anyhow::Result<()>
where
    R: Repository<Consignment> + 'static,
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<ShippingServiceServer<ConsignmentService<R>>>()
        .await;

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let shutdown = async move {
        signal.await;
        tracing::info!("Shutdown signal received, terminating gracefully...");
        health_reporter
            .set_not_serving::<ShippingServiceServer<ConsignmentService<R>>>()
            .await;
    };

    Server::builder()
        .accept_http1(true)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_shipping_service(service))
        .serve_with_incoming_shutdown(incoming, shutdown)
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}
