//! Server-side components of the consignment service.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/environment configuration.
//! - [`listener`] - Assembly of the tonic server and its auxiliary services.
//! - [`repository`] - Storage abstraction and the in-memory store.
//! - [`service`] - gRPC handlers and response shaping.
//! - [`telemetry`] - Logging and optional OpenTelemetry export.

pub mod config;
pub mod listener;
pub mod repository;
pub mod service;
pub mod telemetry;
