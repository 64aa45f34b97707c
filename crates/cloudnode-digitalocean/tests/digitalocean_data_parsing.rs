//! Integration tests for parsing DigitalOcean response data.
//!
//! These tests validate that the response schemas and translators handle
//! representative v1 API bodies stored under `tests/fixtures`.

use cloudnode_core::NodeState;
use cloudnode_digitalocean::models::{decode, DropletList, ImageList, RegionList, SizeList};
use cloudnode_digitalocean::translate;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture body from disk.
fn load_fixture(name: &str) -> Value {
    let fixture_path = fixtures_dir().join(name);
    let data = fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    });
    serde_json::from_str(&data).unwrap()
}

#[test]
fn test_droplet_list_translation() {
    let body = load_fixture("droplets.json");
    let expected = body["droplets"].as_array().unwrap().len();

    let list: DropletList = decode("/droplets/", body).unwrap();
    let nodes = translate::to_nodes(list.droplets);

    assert_eq!(nodes.len(), expected);

    let active = &nodes[0];
    assert_eq!(active.id, "100823");
    assert_eq!(active.state, NodeState::Running);
    assert_eq!(active.public_ips, vec!["192.0.2.10".to_string()]);
    assert!(active.private_ips.is_empty());
    assert_eq!(active.extra.get("region_id"), Some(&serde_json::json!(1)));

    let provisioning = &nodes[1];
    assert_eq!(provisioning.state, NodeState::Pending);
    assert!(provisioning.public_ips.is_empty());
    assert_eq!(provisioning.private_ips, vec!["10.128.0.4".to_string()]);

    // "archive" is not a status the driver knows.
    assert_eq!(nodes[2].state, NodeState::Unknown);
}

#[test]
fn test_image_list_translation() {
    let body = load_fixture("images.json");
    let expected = body["images"].as_array().unwrap().len();

    let list: ImageList = decode("/images/", body).unwrap();
    let images = translate::to_images(list.images);

    assert_eq!(images.len(), expected);
    assert_eq!(images[1].id, "1601");
    assert_eq!(images[1].name, "CentOS 5.8 x64");
    assert_eq!(
        images[1].extra.get("slug"),
        Some(&serde_json::json!("centos-5-8-x64"))
    );
}

#[test]
fn test_size_list_translation() {
    let body = load_fixture("sizes.json");
    let expected = body["sizes"].as_array().unwrap().len();

    let list: SizeList = decode("/sizes/", body).unwrap();
    let sizes = translate::to_sizes(list.sizes);

    assert_eq!(sizes.len(), expected);
    let rams: Vec<_> = sizes.iter().map(|size| size.ram).collect();
    assert_eq!(rams, vec![Some(512), Some(1024), Some(2048), Some(4096)]);
    assert_eq!(sizes[1].disk, Some(30));
    assert!(sizes[0].disk.is_none());
    assert!(sizes.iter().all(|size| size.price == 0.0));
}

#[test]
fn test_region_list_translation() {
    let body = load_fixture("regions.json");
    let expected = body["regions"].as_array().unwrap().len();

    let list: RegionList = decode("/regions/", body).unwrap();
    let locations = translate::to_locations(list.regions);

    assert_eq!(locations.len(), expected);
    assert_eq!(locations[0].id, "1");
    assert_eq!(locations[0].name, "New York 1");
    assert!(locations.iter().all(|location| location.country.is_none()));
}
