//! The two mutually exclusive network schema versions and their codec
//!
//! Version 1 is the legacy per-interface list, carried entry by entry as
//! generic values so interface shapes outside the typed subset survive a
//! round trip untouched. Version 2 is the modern declarative mapping which is
//! kept as a raw text blob that only gets parse-validated, never decomposed.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub const WARN_NOT_MAPPING: &str = "Network V2 YAML must be an object/dictionary";
pub const WARN_UNPARSABLE: &str = "Could not parse Network V2 YAML";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    Physical,
    Bond,
    Vlan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubnetKind {
    Dhcp,
    Dhcp4,
    Dhcp6,
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub network: String,
    pub netmask: String,
    pub gateway: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnet {
    #[serde(rename = "type")]
    pub kind: SubnetKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_nameservers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: InterfaceKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,

    #[serde(default)]
    pub subnets: Vec<Subnet>,
}

impl Interface {
    /// Typed view of a v1 config entry, `None` when the entry does not match
    /// the modeled interface shape
    pub fn from_entry(entry: &Value) -> Option<Self> {
        serde_yaml::from_value(entry.clone()).ok()
    }
}

impl From<Interface> for Value {
    fn from(interface: Interface) -> Self {
        serde_yaml::to_value(&interface).expect("interface is always representable as yaml")
    }
}

/// Active network configuration, only ever one version at a time
///
/// Switching the variant discards whatever the other variant held
#[derive(Debug, Clone, PartialEq)]
pub enum Network {
    /// Per-entry config values, shapes outside the typed subset included
    V1(Vec<Value>),
    /// Raw yaml blob, edited as text
    V2(String),
}

impl Default for Network {
    fn default() -> Self {
        Self::V2(String::new())
    }
}

fn warning(message: &str) -> Value {
    let mut map = Mapping::new();
    map.insert("__warning".into(), message.into());
    Value::Mapping(map)
}

/// Project the network state into the document tree
///
/// Returns `None` when there is nothing worth emitting. A v2 blob that is not
/// valid yaml or not a mapping degrades to a `__warning` placeholder instead
/// of failing the whole serialization, this runs on every keystroke
pub fn encode(network: &Network) -> Option<Value> {
    match network {
        Network::V1(entries) => {
            if entries.is_empty() {
                return None;
            }

            let mut map = Mapping::new();
            map.insert("version".into(), Value::from(1_u64));
            map.insert("config".into(), Value::Sequence(entries.clone()));
            Some(Value::Mapping(map))
        }
        Network::V2(raw) => {
            if raw.trim().is_empty() {
                return None;
            }

            match serde_yaml::from_str::<Value>(raw) {
                Ok(Value::Mapping(map)) => Some(Value::Mapping(map)),
                Ok(_) => Some(warning(WARN_NOT_MAPPING)),
                Err(_) => Some(warning(WARN_UNPARSABLE)),
            }
        }
    }
}

/// Rebuild network state from the `network` value of an imported document
///
/// Dispatches on `version` being the integer 1, anything else is kept as a v2
/// blob by flattening the value back into block-style text for editing. The
/// re-encoded text is stable under further parse/encode cycles.
///
/// V1 config entries are taken verbatim, there is no deep validation of the
/// per-interface shapes, only the sequence itself is checked
pub fn decode(value: &Value) -> Result<Network, String> {
    let version = value
        .as_mapping()
        .and_then(|x| x.get("version"))
        .and_then(Value::as_i64);

    if version == Some(1) {
        let config = value
            .as_mapping()
            .and_then(|x| x.get("config"))
            .filter(|x| !x.is_null());

        match config {
            None => Ok(Network::V1(vec![])),
            Some(Value::Sequence(entries)) => Ok(Network::V1(entries.clone())),
            Some(_) => Err("'network.config' must be a list.".to_string()),
        }
    } else {
        let raw = serde_yaml::to_string(value)
            .map_err(|err| format!("'network' could not be re-encoded ({err})."))?;

        Ok(Network::V2(raw))
    }
}
