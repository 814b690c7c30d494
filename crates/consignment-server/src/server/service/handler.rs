//! gRPC service implementation for storing and listing consignments.
//!
//! This module defines [`ConsignmentService`], the concrete implementation of
//! the `ShippingService` gRPC service defined in the protobuf schema. It is a
//! thin adapter: every call is forwarded to a [`Repository`] and the result is
//! wrapped in a `Response` envelope.
//!
//! ## Responsibilities
//!
//! - Forward `CreateConsignment` to [`Repository::create`] and echo the stored
//!   record.
//! - Forward `GetConsignments` to [`Repository::get_all`].
//! - Surface repository errors to the caller as gRPC statuses.

use crate::server::{
    repository::{InMemoryRepository, Repository},
    service::envelope,
    telemetry::{
        increment_consignments_created, increment_create_errors, increment_create_requests,
        increment_list_requests, record_list_size, record_request_duration,
    },
};
use consignment_core::proto::{
    self, Consignment, GetRequest,
    shipping_service_server::{ShippingService, ShippingServiceServer},
};
use std::sync::Arc;
use std::time::Instant;
use tonic::{Request, Response, Status, codec::CompressionEncoding};

/// gRPC façade over a consignment [`Repository`].
///
/// The repository is shared behind an [`Arc`], so clones of the service (one
/// per connection, as tonic requires) all read and write the same store.
pub struct ConsignmentService<R = InMemoryRepository<Consignment>> {
    repository: Arc<R>,
}

impl<R> ConsignmentService<R>
where
    R: Repository<Consignment>,
{
    /// Creates a service that owns `repository` for the rest of its lifetime.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The store backing this service.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R> Clone for ConsignmentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[tonic::async_trait]
impl<R> ShippingService for ConsignmentService<R>
where
    R: Repository<Consignment> + 'static,
{
    /// Stores the submitted consignment and echoes it back.
    ///
    /// No validation happens here; whatever the repository accepts is stored
    /// as-is. A repository error fails the call with no partial response.
    #[tracing::instrument(skip_all)]
    async fn create_consignment(
        &self,
        req: Request<Consignment>,
    ) -> Result<Response<proto::Response>, Status> {
        let start = Instant::now();
        increment_create_requests();

        let result = self.repository.create(req.into_inner());
        record_request_duration("create", start.elapsed().as_secs_f64() * 1000.0);

        let stored = result.map_err(|e| {
            increment_create_errors();
            tracing::warn!("Create failed: {}", e);
            Status::from(e)
        })?;

        increment_consignments_created();
        tracing::debug!(stored = self.repository.len(), "Consignment stored");

        Ok(Response::new(envelope::created(stored)))
    }

    /// Returns every stored consignment in insertion order.
    #[tracing::instrument(skip_all)]
    async fn get_consignments(
        &self,
        _req: Request<GetRequest>,
    ) -> Result<Response<proto::Response>, Status> {
        let start = Instant::now();
        increment_list_requests();

        let consignments = self.repository.get_all();

        record_list_size(consignments.len() as f64);
        record_request_duration("list", start.elapsed().as_secs_f64() * 1000.0);
        tracing::debug!(count = consignments.len(), "Listing consignments");

        Ok(Response::new(envelope::listing(consignments)))
    }
}

/// Wraps `service` in the generated tonic server with compression enabled in
/// both directions.
pub fn build_shipping_service<R>(
    service: ConsignmentService<R>,
) -> ShippingServiceServer<ConsignmentService<R>>
where
    R: Repository<Consignment> + 'static,
{
    ShippingServiceServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}
