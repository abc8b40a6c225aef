//! Test helpers for writing plan requests and stubbing the geocoder.

use super::*;
use crate::plan::{PlanConfig, PlanGeocoderBuilder};
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use haulplan_core::test_support::{MemoryGeocoder, east_of};
use haulplan_core::{GeocodeError, Geocoder};
use tempfile::TempDir;

pub(super) const DEPOT: Coord<f64> = Coord { x: 10.0, y: 0.0 };

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Create a temporary directory and the request path inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

/// Serves a fixed set of locations without touching the network.
#[derive(Debug, Default)]
pub(super) struct StubGeocoderBuilder {
    pub(super) outage: Option<String>,
}

impl StubGeocoderBuilder {
    pub(super) fn with_outage(name: &str) -> Self {
        Self {
            outage: Some(name.to_owned()),
        }
    }
}

impl PlanGeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let mut geocoder = MemoryGeocoder::with_locations([
            ("Depot", DEPOT),
            ("Near", east_of(DEPOT, 50_000.0)),
            ("Far", east_of(DEPOT, 300_000.0)),
        ]);
        if let Some(name) = &self.outage {
            geocoder = geocoder.with_failure(
                name.clone(),
                GeocodeError::Timeout {
                    url: "http://geocoder.test/search".to_owned(),
                    timeout_secs: 30,
                },
            );
        }
        Ok(Box::new(geocoder))
    }
}
