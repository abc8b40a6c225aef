//! Planner configuration.
//!
//! Defaults reproduce the fleet rules the planner was built around: a
//! 500 km vehicle range with refuelling at 80%, an 8 hour duty-time ceiling
//! at an assumed 60 km/h, and 45 minute rest breaks.

use std::time::Duration;

/// Default vehicle range in meters.
pub const DEFAULT_VEHICLE_RANGE_METERS: f64 = 500_000.0;
/// Default share of the vehicle range after which a fuel stop is planned.
pub const DEFAULT_REFUEL_FRACTION: f64 = 0.8;
/// Default maximum driving time between rest breaks.
pub const DEFAULT_MAX_DRIVING_TIME: Duration = Duration::from_secs(8 * 60 * 60);
/// Default assumed average speed in km/h.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 60.0;
/// Default rest-break length in minutes.
pub const DEFAULT_REST_BREAK_MINUTES: u32 = 45;

/// How the planner treats locations the geocoder fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Drop every location whose lookup fails, whatever the cause.
    #[default]
    SkipUnresolved,
    /// Drop locations with no match but abort planning on any other
    /// geocoder error (network, timeout, HTTP status, parse).
    PropagateLookupErrors,
}

/// Configuration for [`RoutePlanner`](crate::RoutePlanner).
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use haulplan_core::{PlannerConfig, ResolutionPolicy};
///
/// let config = PlannerConfig::default()
///     .with_vehicle_range_meters(300_000.0)
///     .with_max_driving_time(Duration::from_secs(4 * 3600))
///     .with_resolution_policy(ResolutionPolicy::PropagateLookupErrors);
/// assert!((config.refuel_threshold_meters() - 240_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Distance the vehicle covers on a full tank, in meters.
    pub vehicle_range_meters: f64,
    /// Fraction of the range after which a fuel stop is recommended.
    pub refuel_fraction: f64,
    /// Driving time that triggers a mandatory rest break.
    pub max_driving_time: Duration,
    /// Assumed average speed used to estimate leg driving time, in km/h.
    pub average_speed_kmh: f64,
    /// Length of each rest break, in minutes.
    pub rest_break_minutes: u32,
    /// Treatment of failed geocoder lookups.
    pub resolution_policy: ResolutionPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vehicle_range_meters: DEFAULT_VEHICLE_RANGE_METERS,
            refuel_fraction: DEFAULT_REFUEL_FRACTION,
            max_driving_time: DEFAULT_MAX_DRIVING_TIME,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            rest_break_minutes: DEFAULT_REST_BREAK_MINUTES,
            resolution_policy: ResolutionPolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Set the vehicle range.
    #[must_use]
    pub const fn with_vehicle_range_meters(mut self, meters: f64) -> Self {
        self.vehicle_range_meters = meters;
        self
    }

    /// Set the refuelling fraction of the vehicle range.
    #[must_use]
    pub const fn with_refuel_fraction(mut self, fraction: f64) -> Self {
        self.refuel_fraction = fraction;
        self
    }

    /// Set the duty-time ceiling.
    #[must_use]
    pub const fn with_max_driving_time(mut self, limit: Duration) -> Self {
        self.max_driving_time = limit;
        self
    }

    /// Set the assumed average speed.
    #[must_use]
    pub const fn with_average_speed_kmh(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    /// Set the rest-break length.
    #[must_use]
    pub const fn with_rest_break_minutes(mut self, minutes: u32) -> Self {
        self.rest_break_minutes = minutes;
        self
    }

    /// Set the resolution policy.
    #[must_use]
    pub const fn with_resolution_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.resolution_policy = policy;
        self
    }

    /// Accumulated distance beyond which a fuel stop is emitted.
    #[must_use]
    pub fn refuel_threshold_meters(&self) -> f64 {
        self.vehicle_range_meters * self.refuel_fraction
    }

    /// Estimated driving time in seconds for `meters` at the average speed.
    #[must_use]
    pub fn driving_seconds(&self, meters: f64) -> f64 {
        meters / 1000.0 / self.average_speed_kmh * 3600.0
    }
}
