//! Fuel-stop and rest-break planning over a sequenced route.
//!
//! Both planners are pure functions of the step sequence and the
//! [`PlannerConfig`]: leg lengths come from the coordinates stored on each
//! [`RouteStep`], never from names or arrival times, so re-running them over
//! an existing plan's steps reproduces the same output.

use crate::config::PlannerConfig;
use crate::distance::great_circle_distance;
use crate::route::{ComplianceCheckpoint, FuelStop, RouteStep};
use crate::threshold::{Anchor, CumulativeThreshold, Trigger};

fn leg_meters(from: &RouteStep, to: &RouteStep) -> f64 {
    great_circle_distance(from.coordinate, to.coordinate)
}

/// Recommend fuel stops along `steps`.
///
/// Distance accumulates leg by leg. Once the total since the last stop is
/// strictly greater than [`PlannerConfig::refuel_threshold_meters`], a stop
/// is placed at the step the crossing leg departs from and the total resets.
/// At most `steps.len() - 1` stops are returned.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use haulplan_core::{PlannerConfig, RouteStep, plan_fuel_stops};
///
/// let step = |name: &str, x: f64| RouteStep {
///     position: 0,
///     location_name: name.into(),
///     coordinate: Coord { x, y: 0.0 },
///     arrival_time: None,
///     cargo_handling: serde_json::json!({}),
/// };
/// // Roughly 556 km along the equator.
/// let steps = [step("Depot", 0.0), step("Customer", 5.0)];
/// let stops = plan_fuel_stops(&steps, &PlannerConfig::default());
/// assert_eq!(stops.len(), 1);
/// assert_eq!(stops[0].location_name, "Depot");
/// ```
#[must_use]
pub fn plan_fuel_stops(steps: &[RouteStep], config: &PlannerConfig) -> Vec<FuelStop> {
    CumulativeThreshold {
        threshold: config.refuel_threshold_meters(),
        trigger: Trigger::Exceeds,
        anchor: Anchor::LegOrigin,
    }
    .emit(steps, leg_meters, |step, meters| FuelStop {
        location_name: step.location_name.clone(),
        distance_from_start_meters: meters,
    })
}

/// Insert mandatory rest breaks along `steps`.
///
/// Leg driving time is estimated from great-circle distance at
/// [`PlannerConfig::average_speed_kmh`]. When the time since the last break
/// reaches [`PlannerConfig::max_driving_time`], a rest break is placed at the
/// step just reached and the total resets.
#[must_use]
pub fn plan_compliance_checkpoints(
    steps: &[RouteStep],
    config: &PlannerConfig,
) -> Vec<ComplianceCheckpoint> {
    CumulativeThreshold {
        threshold: config.max_driving_time.as_secs_f64(),
        trigger: Trigger::Reaches,
        anchor: Anchor::LegDestination,
    }
    .emit(
        steps,
        |from, to| config.driving_seconds(leg_meters(from, to)),
        |step, _| ComplianceCheckpoint::rest_break(&step.location_name, config.rest_break_minutes),
    )
}
