//! Manage GoDaddy DNS records as declared resources.
//!
//! [`config::configure`] builds a [`api::GoDaddyClient`] once per run. The
//! client is then handed to [`resource::RecordResource`] for record lifecycle
//! operations, or to [`resource::DomainDataSource`] for domain lookups.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod identifier;
pub mod resource;
pub mod sync;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
