//! Sider server access for dataset digests.
//!
//! This crate provides:
//! - [`ConnectionConfig`] with the operator tools' defaults (`127.0.0.1:6379`, db 0)
//! - [`SiderConnection`], an explicit connection handle implementing
//!   [`sider_digest::DataSource`]
//! - [`with_connection`] for scoped acquisition and release
//!
//! The wire protocol is spoken by the `redis` crate; this crate only maps
//! the digest engine's reads onto commands and server replies onto
//! [`sider_digest::ReadFailure`].

#![deny(missing_docs)]

/// Connection settings.
pub mod config;
/// Connection handle and data source.
pub mod connection;
/// Error types for connection acquisition.
pub mod errors;

pub use config::{ConnectionConfig, DEFAULT_DB, DEFAULT_HOST, DEFAULT_PORT};
pub use connection::{with_connection, SiderConnection};
pub use errors::ClientError;
