//! gRPC service implementation for the shipping API.
//!
//! This module contains the request handlers that translate gRPC calls into
//! repository operations and the helpers that shape their responses.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`ConsignmentService`).
//! - [`envelope`] - Builders for the `Response` envelope returned by every
//!   call.

pub mod envelope;
pub mod handler;

pub use handler::{ConsignmentService, build_shipping_service};
