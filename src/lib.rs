//! Facade crate for the haulplan delivery route planner.
//!
//! This crate re-exports the core planning types and exposes the Nominatim
//! geocoder behind the `geocode-nominatim` feature flag.

#![forbid(unsafe_code)]

pub use haulplan_core::{
    CachedGeocoder, CargoDetails, CheckpointKind, ComplianceCheckpoint, FuelStop, GeocodeError,
    Geocoder, PlanRequest, PlannerConfig, ResolutionPolicy, ResolvedLocation, RoutePlan,
    RoutePlanner, RouteStep, great_circle_distance, nearest_neighbour_order,
    plan_compliance_checkpoints, plan_fuel_stops,
};

#[cfg(feature = "test-support")]
pub use haulplan_core::test_support;

#[cfg(feature = "geocode-nominatim")]
pub use haulplan_geocode::{GeocoderBuildError, NominatimGeocoder, NominatimGeocoderConfig};
