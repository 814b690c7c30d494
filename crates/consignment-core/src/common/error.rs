//! Error types for the consignment service.
//!
//! This module defines the central `Error` enum raised by repositories when a
//! write cannot be completed. It implements `From<Error>` for `tonic::Status`
//! so a failed write reaches the remote caller as a gRPC status with no
//! partial response.
//!
//! ## Error Cases
//! - `Rejected`: The record was refused before being stored (e.g. failed
//!   validation).
//! - `Storage`: The backing store could not complete the write.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for repository operations.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The record was refused and nothing was stored.
    #[error("Consignment rejected: {reason}")]
    Rejected { reason: String },

    /// The store failed while writing the record.
    #[error("Storage error: {context}")]
    Storage { context: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Rejected { .. } => Status::invalid_argument(message),
            Error::Storage { .. } => Status::internal(message),
        }
    }
}
