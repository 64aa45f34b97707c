//! Translation of DigitalOcean records into the shared node model.

use cloudnode_core::{
    CreateNodeRequest, Node, NodeImage, NodeLocation, NodeSize, NodeState, Provider,
};

use crate::models::{Droplet, Image, NewDroplet, Record, Region, Size};

const PROVIDER: Provider = Provider::DigitalOcean;

/// Droplet status strings the API is known to report.
pub const NODE_STATE_MAP: &[(&str, NodeState)] = &[
    ("new", NodeState::Pending),
    ("active", NodeState::Running),
    ("shutting-down", NodeState::Terminated),
    ("terminated", NodeState::Terminated),
];

/// Map a droplet status to a node state; unrecognized values become `Unknown`.
#[must_use]
pub fn node_state(status: &str) -> NodeState {
    NODE_STATE_MAP
        .iter()
        .find(|(known, _)| *known == status)
        .map_or(NodeState::Unknown, |(_, state)| *state)
}

/// Translate a listed droplet.
#[must_use]
pub fn to_node(record: Record<Droplet>) -> Node {
    let Record { fields, raw } = record;
    Node {
        id: fields.id.to_string(),
        name: fields.name,
        state: node_state(&fields.status),
        public_ips: fields.ip_address.into_iter().collect(),
        private_ips: fields.private_ip_address.into_iter().collect(),
        size: None,
        image: None,
        extra: raw,
        driver: PROVIDER,
    }
}

/// Translate the droplet returned by a create call.
///
/// The API does not assign addresses until provisioning finishes, so both address
/// lists are empty.
#[must_use]
pub fn to_created_node(record: Record<NewDroplet>, request: &CreateNodeRequest) -> Node {
    let Record { fields, raw } = record;
    Node {
        id: fields.id.to_string(),
        name: fields.name,
        state: NodeState::Pending,
        public_ips: Vec::new(),
        private_ips: Vec::new(),
        size: Some(request.size.clone()),
        image: Some(request.image.clone()),
        extra: raw,
        driver: PROVIDER,
    }
}

/// Translate an image.
#[must_use]
pub fn to_image(record: Record<Image>) -> NodeImage {
    NodeImage {
        id: record.fields.id.to_string(),
        name: record.fields.name,
        extra: record.raw,
        driver: PROVIDER,
    }
}

/// Translate a size.
#[must_use]
pub fn to_size(record: Record<Size>) -> NodeSize {
    let fields = record.fields;
    let ram = fields.memory.or_else(|| ram_from_name(&fields.name));
    NodeSize {
        id: fields.id.to_string(),
        name: fields.name,
        ram,
        disk: fields.disk,
        bandwidth: None,
        price: 0.0,
        driver: PROVIDER,
    }
}

/// Translate a region. The API does not report countries.
#[must_use]
pub fn to_location(record: Record<Region>) -> NodeLocation {
    NodeLocation {
        id: record.fields.id.to_string(),
        name: record.fields.name,
        country: None,
        driver: PROVIDER,
    }
}

/// Translate listed droplets.
#[must_use]
pub fn to_nodes(records: Vec<Record<Droplet>>) -> Vec<Node> {
    records.into_iter().map(to_node).collect()
}

/// Translate images.
#[must_use]
pub fn to_images(records: Vec<Record<Image>>) -> Vec<NodeImage> {
    records.into_iter().map(to_image).collect()
}

/// Translate sizes.
#[must_use]
pub fn to_sizes(records: Vec<Record<Size>>) -> Vec<NodeSize> {
    records.into_iter().map(to_size).collect()
}

/// Translate regions.
#[must_use]
pub fn to_locations(records: Vec<Record<Region>>) -> Vec<NodeLocation> {
    records.into_iter().map(to_location).collect()
}

/// Memory in MiB encoded in size names like `512MB` or `2GB`.
fn ram_from_name(name: &str) -> Option<u64> {
    let name = name.trim().to_ascii_uppercase();
    if let Some(mb) = name.strip_suffix("MB") {
        return mb.trim().parse().ok();
    }
    if let Some(gb) = name.strip_suffix("GB") {
        return gb
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|gb| gb.checked_mul(1024));
    }
    None
}
