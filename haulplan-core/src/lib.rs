//! Core domain types and planning logic for the Haulplan engine.
//!
//! Responsibilities:
//! - Resolve location names through an injected [`Geocoder`].
//! - Sequence resolved stops with a nearest-neighbour walk.
//! - Derive fuel stops and rest-break checkpoints from the sequenced route.
//!
//! Boundaries:
//! - No network, storage or rendering code lives here; adapters implement
//!   [`Geocoder`] in sibling crates and callers persist the [`RoutePlan`].
//!
//! Invariants:
//! - Planning is synchronous and holds no shared mutable state.
//! - Coordinates are WGS84 with `x = longitude` and `y = latitude`.

#![forbid(unsafe_code)]

pub mod cargo;
pub mod config;
pub mod distance;
pub mod geocode;
pub mod planner;
pub mod request;
pub mod route;
pub mod sequencer;
pub mod stops;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod threshold;

pub use cargo::CargoDetails;
pub use config::{PlannerConfig, ResolutionPolicy};
pub use distance::great_circle_distance;
pub use geocode::{CachedGeocoder, GeocodeError, Geocoder};
pub use planner::{ResolvedLocation, RoutePlanner};
pub use request::PlanRequest;
pub use route::{CheckpointKind, ComplianceCheckpoint, FuelStop, RoutePlan, RouteStep};
pub use sequencer::nearest_neighbour_order;
pub use stops::{plan_compliance_checkpoints, plan_fuel_stops};
