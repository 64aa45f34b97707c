//! DigitalOcean driver for cloudnode.
//!
//! Provides an authenticated connection to the DigitalOcean v1 API and a
//! [`cloudnode_core::NodeDriver`] implementation that normalizes droplets, images,
//! sizes and regions into the shared compute model.

#![deny(missing_docs)]

pub mod connection;
pub mod driver;
pub mod models;
pub mod translate;

pub use connection::{DigitalOceanConnection, DigitalOceanConnectionBuilder, DEFAULT_API_URL};
pub use driver::{default_location, DigitalOceanNodeDriver};
pub use models::{Droplet, Image, NewDroplet, Record, Region, Size};

/// Convenient result alias that reuses the shared compute error type.
pub type Result<T> = cloudnode_core::Result<T>;
