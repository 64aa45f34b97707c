//! Provider-agnostic compute domain types.
//!
//! Drivers normalize provider records into [`Node`], [`NodeImage`], [`NodeSize`] and
//! [`NodeLocation`]. Every entity remembers which [`Provider`] produced it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Raw provider fields kept alongside a normalized entity.
pub type Extra = Map<String, Value>;

/// Supported compute providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Provider {
    /// DigitalOcean (v1 API)
    DigitalOcean,
}

impl Provider {
    /// Returns the provider identifier as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DigitalOcean => "digitalocean",
        }
    }

    /// Returns all known providers.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::DigitalOcean]
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "digitalocean" | "digital_ocean" => Ok(Self::DigitalOcean),
            _ => Err(Error::InvalidRequest(format!("Unknown provider: {s}"))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lifecycle state of a node as seen by a driver.
///
/// `Rebooting` is only ever set client-side after a reboot request was accepted;
/// providers are not known to report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Being provisioned
    Pending,
    /// Up and running
    Running,
    /// Reboot requested
    Rebooting,
    /// Shutting down or gone
    Terminated,
    /// Provider reported a status the driver does not recognize
    Unknown,
}

impl NodeState {
    /// Returns the state as a lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Rebooting => "rebooting",
            Self::Terminated => "terminated",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A virtual machine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle state.
    pub state: NodeState,
    /// Public addresses, in provider order.
    #[serde(default)]
    pub public_ips: Vec<String>,
    /// Private addresses, in provider order.
    #[serde(default)]
    pub private_ips: Vec<String>,
    /// Size the node was created with, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<NodeSize>,
    /// Image the node was created from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<NodeImage>,
    /// Raw provider record.
    #[serde(default)]
    pub extra: Extra,
    /// Provider that produced this node.
    pub driver: Provider,
}

impl Node {
    /// Look up a raw provider field.
    #[must_use]
    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// An installable operating system image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeImage {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Raw provider record.
    #[serde(default)]
    pub extra: Extra,
    /// Provider that produced this image.
    pub driver: Provider,
}

/// A hardware profile nodes can be created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Memory in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<u64>,
    /// Disk in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
    /// Included transfer in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,
    /// Hourly price; `0.0` when the provider does not publish one.
    #[serde(default)]
    pub price: f64,
    /// Provider that produced this size.
    pub driver: Provider,
}

/// A region nodes can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLocation {
    /// Provider identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// ISO country code, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Provider that produced this location.
    pub driver: Provider,
}

/// Parameters for creating a node.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateNodeRequest {
    /// Name for the new node.
    pub name: String,
    /// Size to create the node with.
    pub size: NodeSize,
    /// Image to boot the node from.
    pub image: NodeImage,
    /// Placement; drivers fall back to their default location when `None`.
    pub location: Option<NodeLocation>,
}

impl CreateNodeRequest {
    /// Create a request without an explicit location.
    #[must_use]
    pub fn new(name: impl Into<String>, size: NodeSize, image: NodeImage) -> Self {
        Self {
            name: name.into(),
            size,
            image,
            location: None,
        }
    }

    /// Place the node in the given location.
    #[must_use]
    pub fn with_location(mut self, location: NodeLocation) -> Self {
        self.location = Some(location);
        self
    }
}
