//! API models for the relay REST API
//!
//! Bodies are bare JSON objects without an envelope: the legacy endpoints
//! must match the myStrom WiFi Switch wire format, and the resource endpoints
//! share the same shapes.

use crate::types::RelayId;
use serde::{Deserialize, Serialize};

/// Canonical body of every 404 response, on both API surfaces
pub const NOT_FOUND_BODY: &str =
    "<html><head><title>Error</title></head><body><h1>404 Not Found</h1></body></html>";

/// State of a single relay: `{"relay": true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayStateResponse {
    /// Whether the relay is on
    pub relay: bool,
}

impl RelayStateResponse {
    pub fn new(on: bool) -> Self {
        Self { relay: on }
    }
}

/// One entry of the overview, serialized as a single-key object `{"3": false}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayEntry {
    /// External relay id
    pub id: RelayId,
    /// Whether the relay is on
    pub on: bool,
}

impl Serialize for RelayEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id.to_string(), &self.on)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for RelayEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct RelayEntryVisitor;

        impl<'de> Visitor<'de> for RelayEntryVisitor {
            type Value = RelayEntry;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a single-key map from relay id to state")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let Some((key, on)) = access.next_entry::<String, bool>()? else {
                    return Err(de::Error::custom("empty relay entry"));
                };
                if access.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom("relay entry has more than one key"));
                }

                let id = RelayId::parse(&key, usize::MAX)
                    .map_err(|_| de::Error::custom(format!("Invalid relay ID: {}", key)))?;
                Ok(RelayEntry { id, on })
            }
        }

        deserializer.deserialize_map(RelayEntryVisitor)
    }
}

/// Overview of every relay in ordinal order:
/// `{"relays": [{"1": false}, {"2": true}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaysOverview {
    pub relays: Vec<RelayEntry>,
}

impl FromIterator<(RelayId, bool)> for RelaysOverview {
    fn from_iter<I: IntoIterator<Item = (RelayId, bool)>>(iter: I) -> Self {
        Self {
            relays: iter
                .into_iter()
                .map(|(id, on)| RelayEntry { id, on })
                .collect(),
        }
    }
}
