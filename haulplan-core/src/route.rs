//! Route plans produced by the planner.
//!
//! A [`RoutePlan`] aggregates the sequenced [`RouteStep`]s with the derived
//! [`FuelStop`]s and [`ComplianceCheckpoint`]s. Plans have no identity of
//! their own; storage collaborators assign one when persisting them.

use std::time::Duration;

use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stop on a sequenced route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Zero-based index of the location in the caller's input list.
    pub position: usize,
    /// Location name as supplied by the caller.
    pub location_name: String,
    /// Coordinate chosen when the name was resolved.
    #[serde(with = "lat_lon")]
    pub coordinate: Coord<f64>,
    /// Time from departure to arrival at this step.
    ///
    /// Always `None`: arrival times are not computed. Treat it as unknown,
    /// never as zero.
    pub arrival_time: Option<Duration>,
    /// Cargo payload supplied for this step's input position.
    pub cargo_handling: Value,
}

/// A recommended refuelling point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStop {
    /// Step at which to refuel.
    pub location_name: String,
    /// Distance travelled since the previous fuel stop (or the start) when
    /// the stop was triggered.
    pub distance_from_start_meters: f64,
}

/// Kind of mandatory compliance checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointKind {
    /// Driver rest break after the duty-time ceiling.
    RestBreak,
}

/// A mandatory regulatory stop.
///
/// # Examples
/// ```
/// use haulplan_core::{CheckpointKind, ComplianceCheckpoint};
///
/// let checkpoint = ComplianceCheckpoint::rest_break("Lyon", 45);
/// assert_eq!(checkpoint.kind, CheckpointKind::RestBreak);
/// let json = serde_json::to_value(&checkpoint).unwrap();
/// assert_eq!(json["type"], "rest_break");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheckpoint {
    /// Step at which the checkpoint applies.
    pub location_name: String,
    /// Checkpoint category.
    #[serde(rename = "type")]
    pub kind: CheckpointKind,
    /// Required stop length in minutes.
    pub duration_minutes: u32,
}

impl ComplianceCheckpoint {
    /// Construct a rest-break checkpoint.
    pub fn rest_break(location_name: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            location_name: location_name.into(),
            kind: CheckpointKind::RestBreak,
            duration_minutes,
        }
    }
}

/// A complete delivery route plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Steps in visiting order.
    pub steps: Vec<RouteStep>,
    /// Sum of great-circle leg distances along `steps`, in meters.
    pub total_distance_meters: f64,
    /// Recommended refuelling points.
    pub fuel_stops: Vec<FuelStop>,
    /// Mandatory rest breaks.
    pub compliance_checkpoints: Vec<ComplianceCheckpoint>,
}

impl RoutePlan {
    /// Construct a plan with no steps.
    ///
    /// # Examples
    /// ```
    /// use haulplan_core::RoutePlan;
    ///
    /// let plan = RoutePlan::empty();
    /// assert!(plan.steps.is_empty());
    /// assert_eq!(plan.total_distance_meters, 0.0);
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Location names in visiting order.
    pub fn location_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.location_name.as_str())
    }
}

/// Serialise coordinates as `{latitude, longitude}` objects.
mod lat_lon {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct LatLon {
        latitude: f64,
        longitude: f64,
    }

    pub(super) fn serialize<S: Serializer>(
        coord: &Coord<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        LatLon {
            latitude: coord.y,
            longitude: coord.x,
        }
        .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Coord<f64>, D::Error> {
        let LatLon {
            latitude,
            longitude,
        } = LatLon::deserialize(deserializer)?;
        Ok(Coord {
            x: longitude,
            y: latitude,
        })
    }
}
