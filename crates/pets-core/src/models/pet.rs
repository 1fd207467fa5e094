//! Item, origin record and collection models
//!
//! Field names on the wire are the legacy capitalised names shared with
//! the provider services and the web front-end.

use serde::{Deserialize, Serialize};

/// A single item served by a provider backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pet {
    /// Provider-local identifier
    #[serde(rename = "Index")]
    pub index: u32,
    #[serde(rename = "Name")]
    pub name: String,
    /// Owning backend name, overwritten by the gateway
    #[serde(rename = "Type")]
    pub type_tag: String,
    #[serde(rename = "Kind")]
    pub kind: String,
    #[serde(rename = "Age")]
    pub age: u32,
    /// Picture URL
    #[serde(rename = "URL", alias = "Url")]
    pub url: String,
    /// Host that served the item
    #[serde(rename = "Hostname")]
    pub hostname: String,
    #[serde(rename = "From")]
    pub origin: String,
    /// Path of the item; gateway-relative once aggregated
    #[serde(rename = "URI", alias = "Uri")]
    pub uri: String,
}

/// Which logical service and physical host answered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Origin {
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Hostname")]
    pub hostname: String,
}

impl Origin {
    pub fn new(service: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            hostname: hostname.into(),
        }
    }
}

/// A collection of items, as served by a provider or by the gateway
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pets {
    #[serde(rename = "Total")]
    pub total: u64,
    #[serde(rename = "Hostname")]
    pub hostname: String,
    /// Origin records; for an aggregate the first entry is the gateway itself
    #[serde(rename = "Hostnames")]
    pub hostnames: Vec<Origin>,
    #[serde(rename = "Pets")]
    pub items: Vec<Pet>,
}

impl Pets {
    /// Create an empty aggregate seeded with the gateway's own origin record
    pub fn seeded(origin: Origin) -> Self {
        Self {
            total: 0,
            hostname: origin.hostname.clone(),
            hostnames: vec![origin],
            items: Vec::new(),
        }
    }

    /// Stable sort of the items by name; equal names keep their insertion order
    pub fn sort_by_name(&mut self) {
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pet(name: &str, index: u32) -> Pet {
        Pet {
            index,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn decodes_legacy_field_names() {
        let json = r#"{
            "Total": 1,
            "Hostname": "fishes-7d9",
            "Pets": [
                {"Index": 2, "Name": "Nemo", "Kind": "Poisson Clown", "Age": 14,
                 "URL": "http://img/nemo.jpg", "URI": "/fishes/v1/data/2"}
            ]
        }"#;

        let pets: Pets = serde_json::from_str(json).unwrap();
        assert_eq!(pets.total, 1);
        assert_eq!(pets.hostname, "fishes-7d9");
        assert!(pets.hostnames.is_empty());
        assert_eq!(pets.items[0].name, "Nemo");
        assert_eq!(pets.items[0].url, "http://img/nemo.jpg");
        assert_eq!(pets.items[0].uri, "/fishes/v1/data/2");
        assert_eq!(pets.items[0].type_tag, "");
    }

    #[test]
    fn encodes_legacy_field_names() {
        let value = serde_json::to_value(Pets::seeded(Origin::new("pets", "gw"))).unwrap();
        assert_eq!(value["Total"], 0);
        assert_eq!(value["Hostnames"][0]["Service"], "pets");
        assert_eq!(value["Hostnames"][0]["Hostname"], "gw");
        assert!(value["Pets"].as_array().unwrap().is_empty());
    }

    #[test]
    fn sort_is_stable_for_equal_names() {
        let mut pets = Pets::default();
        pets.items = vec![pet("Rex", 1), pet("Argo", 2), pet("Rex", 3), pet("Bil", 4)];
        pets.sort_by_name();

        let order: Vec<(String, u32)> = pets
            .items
            .iter()
            .map(|p| (p.name.clone(), p.index))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Argo".to_string(), 2),
                ("Bil".to_string(), 4),
                ("Rex".to_string(), 1),
                ("Rex".to_string(), 3),
            ]
        );
    }
}
