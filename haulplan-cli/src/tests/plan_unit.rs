//! Focused unit tests covering plan CLI configuration and request parsing.

use super::helpers::{StubGeocoderBuilder, request_workspace, write_utf8};
use super::*;
use crate::plan::{
    PlanArgs, PlanConfig, config_from_layers_for_test, load_plan_request, run_plan_with,
};
use camino::Utf8Path;
use haulplan_core::{CargoDetails, PlanRequest, ResolutionPolicy, RoutePlan};
use haulplan_geocode::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, NominatimGeocoderConfig};
use rstest::rstest;
use serde_json::json;
use std::time::Duration;

fn args_for(request_path: &Utf8Path) -> PlanArgs {
    PlanArgs {
        request_path: Some(request_path.to_path_buf()),
        ..PlanArgs::default()
    }
}

fn plan_via_stub(
    request_path: &Utf8Path,
    builder: &StubGeocoderBuilder,
    strict: bool,
) -> (Result<(), CliError>, Vec<u8>) {
    let args = PlanArgs {
        strict_geocoding: Some(strict),
        ..args_for(request_path)
    };
    let mut stdout = Vec::new();
    let outcome = run_plan_with(args, builder, &mut stdout);
    (outcome, stdout)
}

#[rstest]
fn converting_plan_without_request_errors() {
    let err = PlanConfig::try_from(PlanArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(env, ENV_PLAN_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn plan_config_defaults_geocoder_settings() {
    let (_tmp, request_path) = request_workspace();
    let config = PlanConfig::try_from(args_for(&request_path)).expect("config should build");

    assert_eq!(config.request_path, request_path);
    assert_eq!(config.geocoder.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.geocoder.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.geocoder.timeout, Duration::from_secs(30));
    assert_eq!(config.resolution_policy, ResolutionPolicy::SkipUnresolved);
}

#[rstest]
fn plan_config_applies_overrides() {
    let (_tmp, request_path) = request_workspace();
    let args = PlanArgs {
        request_path: Some(request_path.clone()),
        nominatim_url: Some("http://localhost:8080".to_owned()),
        user_agent: Some("depot-planner/2.0".to_owned()),
        timeout_secs: Some(5),
        strict_geocoding: Some(true),
    };

    let config = PlanConfig::try_from(args).expect("config should build");
    let expected = NominatimGeocoderConfig::new("http://localhost:8080")
        .with_user_agent("depot-planner/2.0")
        .with_timeout(Duration::from_secs(5));
    assert_eq!(config.geocoder, expected);
    assert_eq!(
        config.resolution_policy,
        ResolutionPolicy::PropagateLookupErrors
    );
    assert_eq!(
        config.planner_config().resolution_policy,
        ResolutionPolicy::PropagateLookupErrors
    );
}

#[rstest]
#[case::flag_after_path(&["request.json", "--strict-geocoding"], Some(true))]
#[case::flag_before_path(&["--strict-geocoding", "request.json"], Some(true))]
#[case::explicit_false(&["--strict-geocoding=false", "request.json"], Some(false))]
#[case::absent(&["request.json"], None)]
fn strict_geocoding_flag_leaves_request_path_alone(
    #[case] tail: &[&str],
    #[case] expected: Option<bool>,
) {
    let argv = ["haulplan", "plan"].iter().chain(tail).copied();
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");
    let Command::Plan(args) = cli.command;
    assert_eq!(args.strict_geocoding, expected);
    assert_eq!(args.request_path.as_deref(), Some(Utf8Path::new("request.json")));
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, request_path) = request_workspace();
    let config = PlanConfig::try_from(args_for(&request_path)).expect("config should build");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, request_path) = request_workspace();
    std::fs::create_dir(request_path.as_std_path()).expect("request directory");
    let config = PlanConfig::try_from(args_for(&request_path)).expect("config should build");

    let err = config
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_PLAN_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_plan_request_decodes_json() {
    let (_tmp, request_path) = request_workspace();
    let request = PlanRequest::new(["Depot", "Far"])
        .with_cargo_details(CargoDetails::default().with_entry(1, json!({"pallets": 4})));
    let payload = serde_json::to_string_pretty(&request).expect("serialise request");
    write_utf8(&request_path, payload.as_bytes());

    let decoded = load_plan_request(&request_path).expect("request should decode");
    assert_eq!(decoded, request);
}

#[rstest]
fn load_plan_request_rejects_invalid_json() {
    let (_tmp, request_path) = request_workspace();
    write_utf8(&request_path, b"{ not valid json");

    let err = load_plan_request(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParsePlanRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_plan_request_io_error_returns_open_error() {
    let (_tmp, request_path) = request_workspace();

    let err = load_plan_request(&request_path).expect_err("missing request should error");
    match err {
        CliError::OpenPlanRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected OpenPlanRequest, found {other:?}"),
    }
}

#[rstest]
fn run_plan_with_prints_sequenced_plan() {
    let (_tmp, request_path) = request_workspace();
    write_utf8(
        &request_path,
        br#"{"locations": ["Depot", "Far", "Atlantis", "Near"],
            "cargo_details": {"3": {"action": "drop"}}}"#,
    );

    let (outcome, stdout) = plan_via_stub(&request_path, &StubGeocoderBuilder::default(), false);
    outcome.expect("plan should succeed");

    let text = String::from_utf8(stdout).expect("stdout utf-8");
    assert!(text.ends_with('\n'));
    let plan: RoutePlan = serde_json::from_str(&text).expect("output should be a route plan");
    assert_eq!(
        plan.location_names().collect::<Vec<_>>(),
        ["Depot", "Near", "Far"]
    );
    let near = plan.steps.get(1).expect("near is second");
    assert_eq!(near.cargo_handling, json!({"action": "drop"}));
    assert!((plan.total_distance_meters - 300_000.0).abs() < 1.0);
    assert!(plan.fuel_stops.is_empty());
    assert!(plan.compliance_checkpoints.is_empty());
}

#[rstest]
#[case::lenient(false)]
#[case::strict(true)]
fn geocoder_outage_follows_resolution_policy(#[case] strict: bool) {
    let (_tmp, request_path) = request_workspace();
    write_utf8(&request_path, br#"{"locations": ["Depot", "Near", "Far"]}"#);
    let builder = StubGeocoderBuilder::with_outage("Near");

    let (outcome, stdout) = plan_via_stub(&request_path, &builder, strict);
    if strict {
        match outcome.expect_err("strict planning should abort") {
            CliError::Plan { source } => assert!(!source.is_not_found()),
            other => panic!("expected Plan, found {other:?}"),
        }
        assert!(stdout.is_empty());
    } else {
        outcome.expect("lenient planning should succeed");
        let plan: RoutePlan = serde_json::from_slice(&stdout).expect("route plan");
        assert_eq!(plan.location_names().collect::<Vec<_>>(), ["Depot", "Far"]);
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "timeout_secs": "soon" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;

    let (_tmp, request_path) = request_workspace();
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "nominatim_url": "http://from-file:8080",
            "user_agent": "from-file",
            "timeout_secs": 10,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": request_path.as_str(),
        "user_agent": "from-env",
    }));
    composer.push_cli(json!({ "timeout_secs": 3 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, request_path);
    assert_eq!(config.geocoder.base_url, "http://from-file:8080");
    assert_eq!(config.geocoder.user_agent, "from-env");
    assert_eq!(config.geocoder.timeout, Duration::from_secs(3));
    assert_eq!(config.resolution_policy, ResolutionPolicy::SkipUnresolved);
}
