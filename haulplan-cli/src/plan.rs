//! Plan command implementation for the haulplan CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use haulplan_core::{
    CachedGeocoder, Geocoder, PlanRequest, PlannerConfig, ResolutionPolicy, RoutePlan,
    RoutePlanner,
};
use haulplan_geocode::{NominatimGeocoder, NominatimGeocoderConfig};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_PLAN_NOMINATIM_URL, ARG_PLAN_REQUEST, ARG_PLAN_STRICT_GEOCODING, ARG_PLAN_TIMEOUT_SECS,
    ARG_PLAN_USER_AGENT, CliError, ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a delivery route from a JSON request containing \
                 location names and optional cargo details. Locations are \
                 geocoded through a Nominatim-compatible search service, \
                 sequenced nearest-neighbour first and annotated with fuel \
                 stops and rest breaks.",
    about = "Plan a multi-stop delivery route"
)]
#[ortho_config(prefix = "HAULPLAN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL of the Nominatim service.
    #[arg(long = ARG_PLAN_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// User agent sent with geocoding requests.
    #[arg(long = ARG_PLAN_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
    /// Per-request geocoding timeout in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Abort on geocoder outages instead of dropping the affected locations.
    #[arg(
        long = ARG_PLAN_STRICT_GEOCODING,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) strict_geocoding: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Geocoder connection settings.
    pub(crate) geocoder: NominatimGeocoderConfig,
    /// How lookup failures affect planning.
    pub(crate) resolution_policy: ResolutionPolicy,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn planner_config(&self) -> PlannerConfig {
        PlannerConfig::default().with_resolution_policy(self.resolution_policy)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut geocoder = NominatimGeocoderConfig::default();
        if let Some(base_url) = args.nominatim_url {
            geocoder.base_url = base_url;
        }
        if let Some(user_agent) = args.user_agent {
            geocoder = geocoder.with_user_agent(user_agent);
        }
        if let Some(secs) = args.timeout_secs {
            geocoder = geocoder.with_timeout(Duration::from_secs(secs));
        }

        let resolution_policy = if args.strict_geocoding.unwrap_or(false) {
            ResolutionPolicy::PropagateLookupErrors
        } else {
            ResolutionPolicy::SkipUnresolved
        };

        Ok(Self {
            request_path,
            geocoder,
            resolution_policy,
        })
    }
}

/// Builds the geocoder for the current plan invocation.
pub(super) trait PlanGeocoderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(super) struct DefaultPlanGeocoderBuilder;

impl PlanGeocoderBuilder for DefaultPlanGeocoderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder =
            NominatimGeocoder::with_config(config.geocoder.clone()).map_err(|source| {
                CliError::BuildGeocoder {
                    base_url: config.geocoder.base_url.clone(),
                    source,
                }
            })?;
        Ok(Box::new(geocoder))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlanGeocoderBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanGeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = execute_plan(args, builder)?;
    write_plan(writer, &plan)
}

fn execute_plan(args: PlanArgs, builder: &dyn PlanGeocoderBuilder) -> Result<RoutePlan, CliError> {
    let config = resolve_plan_config(args)?;
    let request = load_plan_request(&config.request_path)?;
    debug!(
        "planning {} locations from {}",
        request.locations.len(),
        config.request_path
    );
    // Requests often repeat a depot name; resolve each distinct name once.
    let geocoder = CachedGeocoder::new(builder.build(&config)?);
    RoutePlanner::with_config(geocoder, config.planner_config())
        .plan_request(&request)
        .map_err(|source| CliError::Plan { source })
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan(writer: &mut dyn Write, plan: &RoutePlan) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(plan).map_err(CliError::SerialisePlan)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
