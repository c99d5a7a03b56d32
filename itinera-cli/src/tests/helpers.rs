//! Scratch workspaces and stub routing providers for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use itinera_core::test_support::{
    FixedTravelCostProvider, StraightLineDirections, sample_locations,
};
use itinera_core::user_distances::default_origin;
use itinera_core::{DirectionsProvider, TravelCost, TravelCostProvider, UserDistances};
use itinera_data::routing::MapboxProfile;
use itinera_data::write_user_distances;
use tempfile::TempDir;

use crate::CliError;
use crate::mapbox::{MapboxSettings, ProviderFactory};

pub(super) const TEST_TOKEN: &str = "pk.test-token";

/// Temporary directory holding the data files a command reads.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write the sample catalogue to `locations.json`.
    pub(super) fn write_catalogue(&self) -> Utf8PathBuf {
        let path = self.path("locations.json");
        let payload =
            serde_json::to_string_pretty(&sample_locations()).expect("serialise catalogue");
        write_utf8(&path, payload.as_bytes());
        path
    }

    /// Write user distances for the churches, museums and beaches samples.
    pub(super) fn write_user_distances(&self) -> Utf8PathBuf {
        let path = self.path("user-distances.json");
        let mut distances = UserDistances::new(default_origin());
        distances.insert("Paoay Church", TravelCost::new(2_100.0, 300.0));
        distances.insert("Museo Ilocos Norte", TravelCost::new(18_400.0, 1_500.0));
        distances.insert("Saud Beach", TravelCost::new(74_900.0, 4_800.0));
        write_user_distances(&path, &distances).expect("write user distances");
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

pub(super) fn no_env(_key: &str) -> Option<String> {
    None
}

pub(super) fn settings() -> MapboxSettings {
    MapboxSettings {
        token: TEST_TOKEN.to_owned(),
        base_url: "http://127.0.0.1:9".to_owned(),
        profile: MapboxProfile::Driving,
    }
}

/// Provider factory answering from the deterministic test providers.
#[derive(Debug, Default)]
pub(super) struct StubProviders {
    pub(super) unroutable: Vec<String>,
}

impl ProviderFactory for StubProviders {
    fn travel_costs(
        &self,
        _settings: &MapboxSettings,
    ) -> Result<Box<dyn TravelCostProvider>, CliError> {
        Ok(Box::new(FixedTravelCostProvider::new(TravelCost::new(
            1_000.0, 60.0,
        ))))
    }

    fn directions(
        &self,
        _settings: &MapboxSettings,
    ) -> Result<Box<dyn DirectionsProvider>, CliError> {
        let provider = self
            .unroutable
            .iter()
            .fold(StraightLineDirections::new(), |provider, title| {
                provider.without_route_to(title)
            });
        Ok(Box::new(provider))
    }
}

pub(super) fn output(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("stdout utf-8")
}
