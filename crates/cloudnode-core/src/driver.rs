//! Driver and transport abstractions.
//!
//! A [`NodeDriver`] exposes one provider through the shared compute model. Drivers
//! talk to their provider through a [`Connection`], which owns authentication and
//! HTTP and hands back the parsed JSON body.

use async_trait::async_trait;
use serde_json::Value;

use crate::query::QueryParams;
use crate::types::{CreateNodeRequest, Node, NodeImage, NodeLocation, NodeSize, Provider};
use crate::Result;

/// Authenticated request/response capability used by drivers.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Issue a request to `path` (relative to the provider API root) and return the
    /// parsed JSON body.
    ///
    /// Implementations add their credentials to `params` before dispatch.
    async fn request(&self, path: &str, params: QueryParams) -> Result<Value>;
}

#[async_trait]
impl<C> Connection for std::sync::Arc<C>
where
    C: Connection + ?Sized,
{
    async fn request(&self, path: &str, params: QueryParams) -> Result<Value> {
        (**self).request(path, params).await
    }
}

/// Provider-agnostic node lifecycle operations.
#[async_trait]
pub trait NodeDriver: Send + Sync {
    /// Provider this driver talks to.
    fn provider(&self) -> Provider;

    /// Human readable driver name.
    fn name(&self) -> &str;

    /// Provider website.
    fn website(&self) -> &str;

    /// List all nodes on the account.
    async fn list_nodes(&self) -> Result<Vec<Node>>;

    /// List images nodes can be created from.
    async fn list_images(&self) -> Result<Vec<NodeImage>>;

    /// List available node sizes.
    async fn list_sizes(&self) -> Result<Vec<NodeSize>>;

    /// List available locations.
    async fn list_locations(&self) -> Result<Vec<NodeLocation>>;

    /// Create a node.
    async fn create_node(&self, request: &CreateNodeRequest) -> Result<Node>;

    /// Reboot a node.
    ///
    /// On success the node's state is updated to reflect the accepted request;
    /// on failure the node is left untouched.
    async fn reboot_node(&self, node: &mut Node) -> Result<bool>;

    /// Destroy a node.
    ///
    /// On success the node's state is updated to reflect the accepted request;
    /// on failure the node is left untouched.
    async fn destroy_node(&self, node: &mut Node) -> Result<bool>;
}
