//! Route planning entry point.
//!
//! [`RoutePlanner`] resolves location names through an injected
//! [`Geocoder`], sequences the resolved stops with
//! [`nearest_neighbour_order`], and derives fuel stops and rest breaks from
//! the sequenced path.

use geo::Coord;
use log::{debug, warn};

use crate::cargo::CargoDetails;
use crate::config::{PlannerConfig, ResolutionPolicy};
use crate::distance::path_length;
use crate::geocode::{GeocodeError, Geocoder};
use crate::request::PlanRequest;
use crate::route::{ComplianceCheckpoint, FuelStop, RoutePlan, RouteStep};
use crate::sequencer::nearest_neighbour_order;
use crate::stops::{plan_compliance_checkpoints, plan_fuel_stops};

/// A location name bound to the coordinate chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Zero-based index of the name in the caller's input list.
    pub position: usize,
    /// Name as supplied by the caller.
    pub name: String,
    /// Resolved WGS84 coordinate.
    pub coordinate: Coord<f64>,
}

impl ResolvedLocation {
    /// Bind `name` at `position` to `coordinate`.
    pub fn new(position: usize, name: impl Into<String>, coordinate: Coord<f64>) -> Self {
        Self {
            position,
            name: name.into(),
            coordinate,
        }
    }
}

/// Plans multi-stop delivery routes.
///
/// The planner is generic over the geocoder so tests can inject a fixed
/// lookup table and services can share one HTTP client. It holds no mutable
/// state and may serve concurrent callers when `G` is `Sync`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use haulplan_core::{CargoDetails, GeocodeError, Geocoder, RoutePlanner};
///
/// struct Table;
///
/// impl Geocoder for Table {
///     fn resolve(&self, name: &str) -> Result<Coord<f64>, GeocodeError> {
///         match name {
///             "Depot" => Ok(Coord { x: 0.0, y: 0.0 }),
///             "Far" => Ok(Coord { x: 2.0, y: 0.0 }),
///             "Near" => Ok(Coord { x: 1.0, y: 0.0 }),
///             _ => Err(GeocodeError::NotFound { name: name.to_owned() }),
///         }
///     }
/// }
///
/// let planner = RoutePlanner::new(Table);
/// let plan = planner.plan(&["Depot", "Far", "Lost", "Near"], &CargoDetails::default())?;
/// assert_eq!(plan.location_names().collect::<Vec<_>>(), ["Depot", "Near", "Far"]);
/// # Ok::<(), GeocodeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<G> {
    geocoder: G,
    config: PlannerConfig,
}

impl<G: Geocoder> RoutePlanner<G> {
    /// Construct a planner using default configuration.
    pub fn new(geocoder: G) -> Self {
        Self::with_config(geocoder, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(geocoder: G, config: PlannerConfig) -> Self {
        Self { geocoder, config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Borrow the injected geocoder.
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolve `locations` in input order, one lookup per name.
    ///
    /// Names that fail to resolve are dropped. Under
    /// [`ResolutionPolicy::PropagateLookupErrors`] any failure other than
    /// [`GeocodeError::NotFound`] is returned instead.
    ///
    /// # Errors
    ///
    /// Returns the first non-`NotFound` geocoder error when the policy
    /// propagates lookup errors.
    pub fn resolve<S: AsRef<str>>(
        &self,
        locations: &[S],
    ) -> Result<Vec<ResolvedLocation>, GeocodeError> {
        let mut resolved = Vec::with_capacity(locations.len());
        for (position, name) in locations.iter().map(AsRef::as_ref).enumerate() {
            match self.geocoder.resolve(name) {
                Ok(coordinate) => resolved.push(ResolvedLocation::new(position, name, coordinate)),
                Err(err) if self.drops(&err) => {
                    warn!("Dropping location {name:?} at position {position}: {err}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(resolved)
    }

    fn drops(&self, err: &GeocodeError) -> bool {
        match self.config.resolution_policy {
            ResolutionPolicy::SkipUnresolved => true,
            ResolutionPolicy::PropagateLookupErrors => err.is_not_found(),
        }
    }

    /// Resolve and plan a route through `locations`.
    ///
    /// `cargo` payloads are looked up by each location's position in
    /// `locations`.
    ///
    /// # Errors
    ///
    /// Propagates geocoder errors as described for [`RoutePlanner::resolve`].
    pub fn plan<S: AsRef<str>>(
        &self,
        locations: &[S],
        cargo: &CargoDetails,
    ) -> Result<RoutePlan, GeocodeError> {
        let resolved = self.resolve(locations)?;
        if resolved.len() < locations.len() {
            debug!(
                "Resolved {} of {} locations",
                resolved.len(),
                locations.len()
            );
        }
        Ok(self.plan_resolved(resolved, cargo))
    }

    /// Plan the route described by `request`.
    ///
    /// # Errors
    ///
    /// Propagates geocoder errors as described for [`RoutePlanner::resolve`].
    pub fn plan_request(&self, request: &PlanRequest) -> Result<RoutePlan, GeocodeError> {
        self.plan(request.locations.as_slice(), &request.cargo_details)
    }

    /// Plan a route through locations the caller already resolved.
    ///
    /// Useful when lookups run concurrently outside the planner. Locations
    /// are ordered by `position` before sequencing, so the first position is
    /// the start and ties go to the lowest position.
    pub fn plan_resolved(
        &self,
        mut resolved: Vec<ResolvedLocation>,
        cargo: &CargoDetails,
    ) -> RoutePlan {
        resolved.sort_by_key(|location| location.position);
        if resolved.len() < 2 {
            return RoutePlan {
                steps: into_steps(resolved, cargo),
                ..RoutePlan::empty()
            };
        }

        let coords: Vec<Coord<f64>> = resolved.iter().map(|l| l.coordinate).collect();
        let order = nearest_neighbour_order(&coords);
        let mut slots: Vec<Option<ResolvedLocation>> = resolved.into_iter().map(Some).collect();
        let sequenced = order
            .into_iter()
            .filter_map(|index| slots.get_mut(index).and_then(Option::take))
            .collect();
        let steps = into_steps(sequenced, cargo);

        let total_distance_meters = path_length(steps.iter().map(|step| step.coordinate));
        let (fuel_stops, compliance_checkpoints) = self.plan_stops(&steps);
        debug!(
            "Planned {} steps over {total_distance_meters:.0} m with {} fuel stops and {} rest breaks",
            steps.len(),
            fuel_stops.len(),
            compliance_checkpoints.len()
        );
        RoutePlan {
            steps,
            total_distance_meters,
            fuel_stops,
            compliance_checkpoints,
        }
    }

    /// Derive fuel stops and rest breaks from an existing step sequence.
    ///
    /// Pure in `steps` and the configuration: re-running it over a plan's
    /// steps reproduces the plan's stop lists.
    #[must_use]
    pub fn plan_stops(&self, steps: &[RouteStep]) -> (Vec<FuelStop>, Vec<ComplianceCheckpoint>) {
        (
            plan_fuel_stops(steps, &self.config),
            plan_compliance_checkpoints(steps, &self.config),
        )
    }
}

fn into_steps(locations: Vec<ResolvedLocation>, cargo: &CargoDetails) -> Vec<RouteStep> {
    locations
        .into_iter()
        .map(|location| RouteStep {
            position: location.position,
            cargo_handling: cargo.handling_for(location.position),
            location_name: location.name,
            coordinate: location.coordinate,
            arrival_time: None,
        })
        .collect()
}
