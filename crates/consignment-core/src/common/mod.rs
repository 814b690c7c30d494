//! Shared protocol bindings and error definitions for the shipping service.
//!
//! ## Submodules
//!
//! - [`error`] - Repository error type and its mapping onto `tonic::Status`.
//! - [`proto`] - Messages and service stubs generated from
//!   `proto/consignment.proto`.

pub mod error;
pub use error::{Error, Result};

/// gRPC service and message definitions generated from
/// `proto/consignment.proto`.
///
/// ## Service
///
/// - `ShippingService` with `CreateConsignment` and `GetConsignments`.
///
/// ## Messages
///
/// - [`Consignment`](proto::Consignment) - A shipment record. Opaque to the
///   server: it is stored and returned without inspection.
/// - [`Container`](proto::Container) - A container referenced by a
///   consignment.
/// - [`GetRequest`](proto::GetRequest) - Empty list request.
/// - [`Response`](proto::Response) - The envelope returned by both calls.
pub mod proto {
    tonic::include_proto!("consignment");

    /// Encoded file descriptor set, registered with gRPC reflection so that
    /// generic clients such as `grpcurl` can discover the service.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("consignment_descriptor");
}
