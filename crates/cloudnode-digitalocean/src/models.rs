//! Response schemas for the DigitalOcean v1 API.
//!
//! Every v1 response is a JSON object carrying `status` (`"OK"` or `"ERROR"`) next to
//! the payload. Records are decoded into typed structs while the raw object is kept
//! in [`Record::raw`] so drivers can pass provider fields through untouched.

use cloudnode_core::{Error, Extra, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status value the API uses to report a failed operation.
pub const STATUS_ERROR: &str = "ERROR";

/// A decoded record together with the raw JSON object it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    /// Typed view of the record.
    pub fields: T,
    /// The record exactly as the provider returned it.
    pub raw: Extra,
}

impl<'de, T> Deserialize<'de> for Record<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Extra::deserialize(deserializer)?;
        let fields = T::deserialize(Value::Object(raw.clone())).map_err(D::Error::custom)?;
        Ok(Self { fields, raw })
    }
}

/// Status fields present on every response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope {
    /// `"OK"` or `"ERROR"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Human readable failure description, set when `status` is `"ERROR"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Envelope {
    /// Returns true if the provider reported the request as failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some(STATUS_ERROR)
    }
}

/// A droplet as listed by `/droplets/`.
///
/// Only the fields the translators read are typed; everything else travels in
/// [`Record::raw`] and is never validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Droplet {
    /// Droplet id.
    pub id: u64,
    /// Droplet name.
    pub name: String,
    /// Provider status (`new`, `active`, `off`, ...).
    pub status: String,
    /// Public IPv4 address; unset while the droplet is being provisioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Private IPv4 address, when private networking is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
}

/// The droplet record returned by `/droplets/new`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDroplet {
    /// Droplet id.
    pub id: u64,
    /// Droplet name.
    pub name: String,
}

/// An image as listed by `/images/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Image id.
    pub id: u64,
    /// Image name.
    pub name: String,
}

/// A size as listed by `/sizes/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    /// Size id.
    pub id: u64,
    /// Size name, such as `512MB`.
    pub name: String,
    /// Memory in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// Disk in GiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
}

/// A region as listed by `/regions/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    /// Region id.
    pub id: u64,
    /// Region name, such as `New York 1`.
    pub name: String,
}

/// Body of `/droplets/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DropletList {
    /// All droplets on the account.
    pub droplets: Vec<Record<Droplet>>,
}

/// Body of `/images/`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageList {
    /// All visible images.
    pub images: Vec<Record<Image>>,
}

/// Body of `/sizes/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SizeList {
    /// All sizes.
    pub sizes: Vec<Record<Size>>,
}

/// Body of `/regions/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionList {
    /// All regions.
    pub regions: Vec<Record<Region>>,
}

/// Body of `/ssh_keys/`; keys are handed out as raw records.
#[derive(Debug, Clone, Deserialize)]
pub struct SshKeyList {
    /// All SSH keys on the account.
    pub ssh_keys: Vec<Extra>,
}

/// Body of `/droplets/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedDroplet {
    /// The droplet being provisioned.
    pub droplet: Record<NewDroplet>,
}

/// Body of droplet actions such as reboot or destroy.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct EventResponse {
    /// Id of the event tracking the action.
    #[serde(default)]
    pub event_id: Option<u64>,
}

/// Fail with the provider's message when the body reports `status == "ERROR"`.
///
/// # Errors
///
/// Returns [`Error::ProviderError`] for error bodies and
/// [`Error::ResponseParseError`] if the status fields are malformed.
pub fn ensure_ok(provider: &str, body: &Value) -> Result<()> {
    let envelope = Envelope::deserialize(body)?;
    if envelope.is_error() {
        return Err(Error::ProviderError {
            provider: provider.to_string(),
            message: envelope
                .error_message
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(())
}

/// Decode a response body into the schema expected for `path`.
///
/// # Errors
///
/// Returns [`Error::ResponseParseError`] naming `path` when required fields are
/// missing or have the wrong type.
pub fn decode<T>(path: &str, body: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(body).map_err(|err| {
        Error::ResponseParseError(format!("Unexpected response for `{path}`: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keeps_raw_fields() {
        let record: Record<Region> = serde_json::from_value(json!({
            "id": 1,
            "name": "New York 1",
            "slug": "nyc1",
            "available": true
        }))
        .unwrap();

        assert_eq!(record.fields.id, 1);
        assert_eq!(record.fields.name, "New York 1");
        assert_eq!(record.raw.get("slug"), Some(&json!("nyc1")));
        assert_eq!(record.raw.get("available"), Some(&json!(true)));
        assert_eq!(record.raw.len(), 4);
    }

    #[test]
    fn record_reports_missing_required_field() {
        let err = serde_json::from_value::<Record<Droplet>>(json!({
            "id": 5,
            "status": "active"
        }))
        .unwrap_err();

        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn droplet_accepts_nulls_and_odd_passthrough_fields() {
        let record: Record<Droplet> = serde_json::from_value(json!({
            "id": 100823,
            "name": "test222",
            "status": "new",
            "ip_address": null,
            "created_at": "2013-01-01 09:30:00",
            "backups_active": "false",
            "locked": "no",
            "region_id": "nyc1"
        }))
        .unwrap();

        assert!(record.fields.ip_address.is_none());
        assert_eq!(record.raw.get("created_at"), Some(&json!("2013-01-01 09:30:00")));
        assert_eq!(record.raw.get("backups_active"), Some(&json!("false")));
    }

    #[test]
    fn droplet_list_decodes_despite_odd_passthrough_fields() {
        let list: DropletList = decode(
            "/droplets/",
            json!({
                "status": "OK",
                "droplets": [
                    {"id": 1, "name": "a", "status": "active", "created_at": "yesterday"},
                    {"id": 2, "name": "b", "status": "off", "locked": "false", "size_id": null}
                ]
            }),
        )
        .unwrap();

        assert_eq!(list.droplets.len(), 2);
        assert_eq!(list.droplets[1].raw.get("locked"), Some(&json!("false")));
    }

    #[test]
    fn ensure_ok_passes_ok_and_missing_status() {
        assert!(ensure_ok("digitalocean", &json!({"status": "OK"})).is_ok());
        assert!(ensure_ok("digitalocean", &json!({"droplets": []})).is_ok());
    }

    #[test]
    fn ensure_ok_surfaces_error_message() {
        let err = ensure_ok(
            "digitalocean",
            &json!({"status": "ERROR", "error_message": "quota exceeded"}),
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::ProviderError {
                provider: "digitalocean".to_string(),
                message: "quota exceeded".to_string(),
            }
        );
    }

    #[test]
    fn ensure_ok_without_message() {
        let err = ensure_ok("digitalocean", &json!({"status": "ERROR"})).unwrap_err();
        assert!(matches!(err, Error::ProviderError { message, .. } if message == "unknown error"));
    }

    #[test]
    fn decode_names_the_path() {
        let err = decode::<SizeList>("/sizes/", json!({"status": "OK"})).unwrap_err();
        match err {
            Error::ResponseParseError(message) => assert!(message.contains("/sizes/")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
