//! # cloudnode-core
//!
//! Provider-agnostic compute abstraction.
//!
//! This crate provides the shared node model, the driver and transport traits,
//! error handling and connection configuration used by provider drivers.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`types`] - Normalized domain types (nodes, images, sizes, locations)
//! - [`driver`] - The `NodeDriver` and `Connection` traits
//! - [`config`] - Credential and endpoint configuration
//! - [`client`] - HTTP client settings and construction
//! - [`query`] - Ordered request parameters

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use driver::{Connection, NodeDriver};
pub use error::{Error, Result};
pub use types::{
    CreateNodeRequest, Extra, Node, NodeImage, NodeLocation, NodeSize, NodeState, Provider,
};
