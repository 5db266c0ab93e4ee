// Capability model for the router's `/API/Capabilities` document.
//
// A router advertises a flat list of features, each with a URI template
// and the operations it accepts. Everything the router module validates
// against lives here.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};
use tracing::trace;

/// Path of the discovery document, relative to the base URL.
pub const CAPABILITIES_PATH: &str = "/API/Capabilities";

// ── Operation ───────────────────────────────────────────────────────

/// An operation a feature may advertise, letter-coded on the wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    /// Resource can be read.
    Read,
    /// Resource can be modified.
    Write,
    /// Action can be triggered.
    Invoke,
    /// Child resources can be added.
    Add,
    /// Resource can be deleted.
    Delete,
    /// Resource description can be read.
    Query,
}

impl Operation {
    /// Single-letter wire code (`R`, `W`, `I`, `A`, `D`, `Q`).
    pub const fn code(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
            Self::Invoke => 'I',
            Self::Add => 'A',
            Self::Delete => 'D',
            Self::Query => 'Q',
        }
    }

    /// Parse a wire code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(Self::Read),
            "W" => Some(Self::Write),
            "I" => Some(Self::Invoke),
            "A" => Some(Self::Add),
            "D" => Some(Self::Delete),
            "Q" => Some(Self::Query),
            _ => None,
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_code(&raw).ok_or_else(|| {
            serde::de::Error::unknown_variant(&raw, &["R", "W", "I", "A", "D", "Q"])
        })
    }
}

// ── Feature ─────────────────────────────────────────────────────────

/// A named resource or action exposed by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Uri")]
    pub uri: String,
    #[serde(rename = "Ops", with = "ops_codes")]
    pub ops: BTreeSet<Operation>,
}

impl Feature {
    pub fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        ops: impl IntoIterator<Item = Operation>,
    ) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            ops: ops.into_iter().collect(),
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.ops.contains(&operation)
    }

    /// Placeholder names in the URI template, left to right.
    ///
    /// A placeholder is `{name}` with a non-empty name containing no `}`.
    /// Repeated placeholders are reported once per occurrence.
    pub fn path_variable_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut rest = self.uri.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(0) => rest = after,
                Some(close) => {
                    names.push(after[..close].to_owned());
                    rest = &after[close + 1..];
                }
                None => break,
            }
        }
        names
    }

    /// Substitute every supplied variable into the URI template.
    ///
    /// Placeholders without a supplied value are left as-is.
    pub fn path(&self, vars: &BTreeMap<String, String>) -> String {
        vars.iter().fold(self.uri.clone(), |path, (name, value)| {
            path.replace(&format!("{{{name}}}"), value)
        })
    }
}

/// Serde helper: `Ops` arrives as a list of letter codes. Codes this
/// client does not know about are skipped so newer firmwares still parse.
mod ops_codes {
    use std::collections::BTreeSet;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Operation, trace};

    pub fn serialize<S: Serializer>(
        ops: &BTreeSet<Operation>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(ops.iter().map(|op| op.code().to_string()))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeSet<Operation>, D::Error> {
        let codes = Vec::<String>::deserialize(deserializer)?;
        Ok(codes
            .iter()
            .filter_map(|code| {
                let op = Operation::from_code(code);
                if op.is_none() {
                    trace!(%code, "skipping unknown operation code");
                }
                op
            })
            .collect())
    }
}

// ── Capability set ──────────────────────────────────────────────────

/// The full feature list returned by discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(rename = "Features")]
    pub features: Vec<Feature>,
}

impl Capabilities {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}

/// Id-keyed lookup over a [`Capabilities`] value.
///
/// Built from scratch for each discovery. When ids repeat, the later
/// feature wins.
#[derive(Debug, Clone, Default)]
pub struct FeatureIndex {
    by_id: HashMap<String, Feature>,
}

impl FeatureIndex {
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl From<&Capabilities> for FeatureIndex {
    fn from(capabilities: &Capabilities) -> Self {
        let by_id = capabilities
            .features
            .iter()
            .map(|feature| (feature.id.clone(), feature.clone()))
            .collect();
        Self { by_id }
    }
}

/// A discovered capability set paired with its index.
///
/// Held behind a single `Arc` so the pair is always replaced together.
#[derive(Debug, Clone)]
pub struct CapabilityCache {
    pub capabilities: Arc<Capabilities>,
    pub index: FeatureIndex,
}

impl From<Capabilities> for CapabilityCache {
    fn from(capabilities: Capabilities) -> Self {
        let index = FeatureIndex::from(&capabilities);
        Self {
            capabilities: Arc::new(capabilities),
            index,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn parses_capabilities_document() {
        let caps: Capabilities = serde_json::from_value(json!({
            "Features": [
                { "Id": "GeneralInfo", "Uri": "/API/GeneralInfo", "Ops": ["R"] },
                { "Id": "Reboot", "Uri": "/API/Reboot", "Ops": ["I"] },
                { "Id": "WlanAccessPoint",
                  "Uri": "/API/LAN/WIFI/{wlan_ifc}/AccessPoint/{wlan_ap}",
                  "Ops": ["R", "W", "Z"] }
            ]
        }))
        .unwrap();

        assert_eq!(caps.len(), 3);
        let ap = &caps.features[2];
        assert!(ap.supports(Operation::Read));
        assert!(ap.supports(Operation::Write));
        assert!(!ap.supports(Operation::Delete));
        assert_eq!(ap.ops.len(), 2);
    }

    #[test]
    fn serializes_ops_as_letter_codes() {
        let feature = Feature::new("X", "/x", [Operation::Write, Operation::Read]);
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value, json!({ "Id": "X", "Uri": "/x", "Ops": ["R", "W"] }));
    }

    #[test]
    fn extracts_variables_in_order() {
        let feature = Feature::new("F", "/API/{wlan_ifc}/AP/{wlan_ap}", []);
        assert_eq!(feature.path_variable_names(), vec!["wlan_ifc", "wlan_ap"]);
    }

    #[test]
    fn extracts_repeated_and_skips_empty_placeholders() {
        let feature = Feature::new("F", "/a/{}/{x}/{x}/{tail", []);
        assert_eq!(feature.path_variable_names(), vec!["x", "x"]);
        assert!(Feature::new("F", "/API/Plain", []).path_variable_names().is_empty());
    }

    #[test]
    fn substitutes_supplied_variables_only() {
        let feature = Feature::new("F", "/API/{wlan_ifc}/AP/{wlan_ap}", []);
        assert_eq!(
            feature.path(&vars(&[("wlan_ifc", "wl0"), ("wlan_ap", "AABB")])),
            "/API/wl0/AP/AABB"
        );
        assert_eq!(
            feature.path(&vars(&[("wlan_ifc", "wl0")])),
            "/API/wl0/AP/{wlan_ap}"
        );
    }

    #[test]
    fn later_duplicate_wins_in_index() {
        let caps = Capabilities {
            features: vec![
                Feature::new("Dup", "/first", [Operation::Read]),
                Feature::new("Dup", "/second", [Operation::Write]),
            ],
        };
        let index = FeatureIndex::from(&caps);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Dup").unwrap().uri, "/second");
    }

    #[test]
    fn operation_display_is_lowercase_name() {
        assert_eq!(Operation::Invoke.to_string(), "invoke");
        assert_eq!(Operation::from_code("Q"), Some(Operation::Query));
        assert_eq!(Operation::from_code("r"), None);
    }
}
