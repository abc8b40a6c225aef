//! Planning requests as submitted by callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cargo::CargoDetails;

/// A request to plan a route through named locations.
///
/// `time_constraints` is accepted so existing request payloads deserialise
/// unchanged; planning does not read it because arrival times are not
/// computed.
///
/// # Examples
/// ```
/// use haulplan_core::PlanRequest;
///
/// let request: PlanRequest = serde_json::from_str(
///     r#"{"locations": ["Hamburg", "Bremen"], "cargo_details": {"1": {"pallets": 2}}}"#,
/// )?;
/// assert_eq!(request.locations.len(), 2);
/// assert!(request.time_constraints.is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Location names in caller order; the first resolvable one is the start.
    pub locations: Vec<String>,
    /// Cargo payloads keyed by stringified position in `locations`.
    #[serde(default)]
    pub cargo_details: CargoDetails,
    /// Pickup and delivery windows, carried opaquely.
    #[serde(default)]
    pub time_constraints: Map<String, Value>,
}

impl PlanRequest {
    /// Construct a request for `locations` with no cargo or time windows.
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Attach cargo payloads.
    #[must_use]
    pub fn with_cargo_details(mut self, cargo_details: CargoDetails) -> Self {
        self.cargo_details = cargo_details;
        self
    }
}
