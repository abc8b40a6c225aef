//! Cargo handling instructions keyed by input position.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller-supplied cargo payloads keyed by the stringified position of each
/// location in the original input list.
///
/// Payloads are opaque JSON; the planner only copies them onto the matching
/// [`RouteStep`](crate::RouteStep). Positions without an entry receive an
/// empty JSON object.
///
/// # Examples
/// ```
/// use haulplan_core::CargoDetails;
/// use serde_json::json;
///
/// let cargo = CargoDetails::default().with_entry(2, json!({"pallets": 4}));
/// assert_eq!(cargo.handling_for(2), json!({"pallets": 4}));
/// assert_eq!(cargo.handling_for(0), json!({}));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CargoDetails {
    entries: HashMap<String, Value>,
}

impl CargoDetails {
    /// Wrap an existing position-keyed map.
    pub const fn new(entries: HashMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Attach a payload to the location at `position`.
    #[must_use]
    pub fn with_entry(mut self, position: usize, payload: Value) -> Self {
        self.entries.insert(position.to_string(), payload);
        self
    }

    /// Payload for the location at `position`, or an empty object.
    #[must_use]
    pub fn handling_for(&self, position: usize) -> Value {
        self.entries
            .get(&position.to_string())
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    /// Whether no payloads were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
