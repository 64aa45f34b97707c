//! DigitalOcean implementation of [`NodeDriver`].

use async_trait::async_trait;
use cloudnode_core::config::ProviderConfig;
use cloudnode_core::query::QueryParams;
use cloudnode_core::{
    Connection, CreateNodeRequest, Extra, Node, NodeDriver, NodeImage, NodeLocation, NodeSize,
    NodeState, Provider,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::connection::DigitalOceanConnection;
use crate::models::{
    decode, ensure_ok, CreatedDroplet, DropletList, EventResponse, ImageList, RegionList,
    SizeList, SshKeyList,
};
use crate::translate;
use crate::Result;

/// Node driver for DigitalOcean droplets.
///
/// Generic over the [`Connection`] so that tests can substitute the transport.
#[derive(Debug, Clone)]
pub struct DigitalOceanNodeDriver<C = DigitalOceanConnection> {
    connection: C,
    default_location: NodeLocation,
}

impl DigitalOceanNodeDriver<DigitalOceanConnection> {
    /// Create a driver for the default endpoint with the given credentials.
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let connection = DigitalOceanConnection::new(user_id, api_key)?;
        Ok(Self::with_connection(connection))
    }

    /// Create a driver from a connection configuration.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let connection = DigitalOceanConnection::from_config(config)?;
        Ok(Self::with_connection(connection))
    }
}

impl<C> DigitalOceanNodeDriver<C>
where
    C: Connection,
{
    /// Driver display name.
    pub const NAME: &'static str = "DigitalOcean Node Provider";

    /// Provider website.
    pub const WEBSITE: &'static str = "http://digitalocean.com";

    /// Wrap an existing connection.
    #[must_use]
    pub fn with_connection(connection: C) -> Self {
        Self {
            connection,
            default_location: default_location(),
        }
    }

    /// Override the location used when a create request names none.
    #[must_use]
    pub fn with_default_location(mut self, location: NodeLocation) -> Self {
        self.default_location = location;
        self
    }

    /// Access the underlying connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Location used when a create request names none.
    #[must_use]
    pub fn default_location(&self) -> &NodeLocation {
        &self.default_location
    }

    /// List the SSH keys on the account as raw provider records.
    pub async fn ex_list_ssh_keys(&self) -> Result<Vec<Extra>> {
        let list: SshKeyList = self.fetch("/ssh_keys/", QueryParams::new()).await?;
        Ok(list.ssh_keys)
    }

    /// Create a droplet, optionally installing SSH keys.
    ///
    /// `ssh_key_ids` is sent only when at least one key id is given.
    pub async fn ex_create_node(
        &self,
        request: &CreateNodeRequest,
        ex_ssh_key_ids: Option<&[u64]>,
    ) -> Result<Node> {
        let location = request
            .location
            .as_ref()
            .unwrap_or(&self.default_location);

        let mut params = QueryParams::new();
        params.push("name", &request.name);
        params.push("size_id", &request.size.id);
        params.push("image_id", &request.image.id);
        params.push("region_id", &location.id);
        if let Some(ids) = ex_ssh_key_ids {
            params.push_joined("ssh_key_ids", ids);
        }

        info!(
            droplet_name = %request.name,
            size_id = %request.size.id,
            image_id = %request.image.id,
            region_id = %location.id,
            "Creating DigitalOcean droplet"
        );

        let created: CreatedDroplet = self.fetch("/droplets/new", params).await?;
        let node = translate::to_created_node(created.droplet, request);
        debug!(droplet_id = %node.id, "Droplet creation accepted");
        Ok(node)
    }

    /// Reboot a droplet, either gracefully or by power cycling it.
    ///
    /// The node's state becomes [`NodeState::Rebooting`] only once the provider has
    /// accepted the request.
    pub async fn ex_reboot_node(&self, node: &mut Node, ex_power_cycle: bool) -> Result<bool> {
        let path = if ex_power_cycle {
            format!("/droplets/{}/power_cycle/", node.id)
        } else {
            format!("/droplets/{}/reboot/", node.id)
        };

        let event = self.send_action(&path).await?;
        debug!(droplet_id = %node.id, event_id = ?event.event_id, ex_power_cycle, "Reboot accepted");
        node.state = NodeState::Rebooting;
        Ok(true)
    }

    async fn send_action(&self, path: &str) -> Result<EventResponse> {
        info!(path = %path, "Sending DigitalOcean droplet action");
        self.fetch(path, QueryParams::new()).await
    }

    async fn fetch<T>(&self, path: &str, params: QueryParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body: Value = self.connection.request(path, params).await?;
        ensure_ok(Provider::DigitalOcean.name(), &body)?;
        decode(path, body)
    }
}

#[async_trait]
impl<C> NodeDriver for DigitalOceanNodeDriver<C>
where
    C: Connection,
{
    fn provider(&self) -> Provider {
        Provider::DigitalOcean
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn website(&self) -> &str {
        Self::WEBSITE
    }

    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let list: DropletList = self.fetch("/droplets/", QueryParams::new()).await?;
        Ok(translate::to_nodes(list.droplets))
    }

    async fn list_images(&self) -> Result<Vec<NodeImage>> {
        let list: ImageList = self.fetch("/images/", QueryParams::new()).await?;
        Ok(translate::to_images(list.images))
    }

    async fn list_sizes(&self) -> Result<Vec<NodeSize>> {
        let list: SizeList = self.fetch("/sizes/", QueryParams::new()).await?;
        Ok(translate::to_sizes(list.sizes))
    }

    async fn list_locations(&self) -> Result<Vec<NodeLocation>> {
        let list: RegionList = self.fetch("/regions/", QueryParams::new()).await?;
        Ok(translate::to_locations(list.regions))
    }

    async fn create_node(&self, request: &CreateNodeRequest) -> Result<Node> {
        self.ex_create_node(request, None).await
    }

    async fn reboot_node(&self, node: &mut Node) -> Result<bool> {
        self.ex_reboot_node(node, false).await
    }

    async fn destroy_node(&self, node: &mut Node) -> Result<bool> {
        let path = format!("/droplets/{}/destroy/", node.id);
        let event = self.send_action(&path).await?;
        debug!(droplet_id = %node.id, event_id = ?event.event_id, "Destroy accepted");
        node.state = NodeState::Terminated;
        Ok(true)
    }
}

/// Location used when a create request names none: New York 1.
#[must_use]
pub fn default_location() -> NodeLocation {
    NodeLocation {
        id: "1".to_string(),
        name: "New York 1".to_string(),
        country: None,
        driver: Provider::DigitalOcean,
    }
}
