//! Unit tests for option resolution shared by the routing-backed commands.

use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::NaiveTime;
use itinera_core::user_distances::{DEFAULT_ORIGIN_LATITUDE, DEFAULT_ORIGIN_TITLE};
use itinera_core::{Category, InterestSelection};
use itinera_data::routing::{DEFAULT_BASE_URL, MapboxProfile};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

use super::helpers::{TEST_TOKEN, no_env, settings};
use crate::graph::{GraphArgs, GraphConfig, config_from_layers_for_test};
use crate::mapbox::MapboxSettings;
use crate::places::{PlacesArgs, PlacesConfig, parse_interests};
use crate::tour::{TourArgs, TourConfig};
use crate::user_distances::{UserDistancesArgs, UserDistancesConfig};
use crate::{
    ARG_AT, ARG_INTERESTS, ARG_MAPBOX_TOKEN, ARG_ORIGIN_LAT, ARG_PROFILE, CliError,
    ENV_MAPBOX_TOKEN, ENV_PUBLIC_MAPBOX_TOKEN,
};

fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| {
        pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_owned())
    }
}

#[rstest]
fn explicit_token_wins_over_environment() {
    let lookup = lookup_from(&[(ENV_MAPBOX_TOKEN, "pk.from-env")]);
    let resolved =
        MapboxSettings::resolve(Some("pk.from-flag".to_owned()), None, None, &lookup)
            .expect("token should resolve");
    assert_eq!(resolved.token, "pk.from-flag");
    assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
    assert_eq!(resolved.profile, MapboxProfile::Driving);
}

#[rstest]
#[case::primary(&[(ENV_MAPBOX_TOKEN, "pk.primary"), (ENV_PUBLIC_MAPBOX_TOKEN, "pk.public")], "pk.primary")]
#[case::public_only(&[(ENV_PUBLIC_MAPBOX_TOKEN, "pk.public")], "pk.public")]
fn token_falls_back_through_environment(
    #[case] pairs: &'static [(&'static str, &'static str)],
    #[case] expected: &str,
) {
    let lookup = lookup_from(pairs);
    let resolved = MapboxSettings::resolve(Some("  ".to_owned()), None, None, &lookup)
        .expect("token should resolve");
    assert_eq!(resolved.token, expected);
}

#[rstest]
fn missing_token_names_flag_and_variable() {
    let err = MapboxSettings::resolve(None, None, None, &no_env).expect_err("no token");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_MAPBOX_TOKEN);
            assert_eq!(env, ENV_MAPBOX_TOKEN);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn unknown_profile_is_rejected() {
    let err = MapboxSettings::resolve(Some(TEST_TOKEN.to_owned()), None, Some("boat"), &no_env)
        .expect_err("bad profile");
    match err {
        CliError::InvalidArgument { field, value, .. } => {
            assert_eq!(field, ARG_PROFILE);
            assert_eq!(value, "boat");
        }
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
fn settings_debug_hides_token() {
    let rendered = format!("{:?}", settings());
    assert!(!rendered.contains(TEST_TOKEN), "{rendered}");
    assert!(rendered.contains("REDACTED"));
}

#[rstest]
fn graph_config_applies_defaults() {
    let args = GraphArgs {
        mapbox_token: Some(TEST_TOKEN.to_owned()),
        profile: Some("walking".to_owned()),
        ..GraphArgs::default()
    };

    let config = GraphConfig::from_args(args, &no_env).expect("config should build");

    assert_eq!(config.locations, Utf8PathBuf::from("data/locations.json"));
    assert_eq!(config.output, Utf8PathBuf::from("data/distance-graph.json"));
    assert_eq!(config.options.delay, Duration::from_millis(100));
    assert_eq!(config.mapbox.profile, MapboxProfile::Walking);
}

#[rstest]
fn graph_config_honours_layer_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "locations": "from-file/locations.json",
            "delay_ms": 5,
            "mapbox_token": "pk.from-file",
        }),
        None,
    );
    composer.push_environment(json!({ "locations": "from-env/locations.json" }));
    composer.push_cli(json!({ "output": "from-cli/graph.json" }));

    let config =
        config_from_layers_for_test(composer.layers(), &no_env).expect("merged config");

    assert_eq!(config.locations, Utf8PathBuf::from("from-env/locations.json"));
    assert_eq!(config.output, Utf8PathBuf::from("from-cli/graph.json"));
    assert_eq!(config.options.delay, Duration::from_millis(5));
    assert_eq!(config.mapbox.token, "pk.from-file");
}

#[rstest]
fn invalid_layer_maps_to_configuration_error() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "delay_ms": "soon" }));

    let err = config_from_layers_for_test(composer.layers(), &no_env)
        .expect_err("invalid layer should fail");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected Configuration, found {other:?}"),
    }
}

#[rstest]
fn user_distances_config_defaults_to_campus_origin() {
    let args = UserDistancesArgs {
        mapbox_token: Some(TEST_TOKEN.to_owned()),
        ..UserDistancesArgs::default()
    };

    let config = UserDistancesConfig::from_args(args, &no_env).expect("config should build");

    assert_eq!(config.origin.title, DEFAULT_ORIGIN_TITLE);
    assert_eq!(config.origin.latitude, DEFAULT_ORIGIN_LATITUDE);
    assert_eq!(config.output, Utf8PathBuf::from("data/user-distances.json"));
    assert_eq!(config.options.delay, Duration::from_millis(150));
}

#[rstest]
fn user_distances_config_rejects_out_of_range_latitude() {
    let args = UserDistancesArgs {
        origin_lat: Some(91.0),
        mapbox_token: Some(TEST_TOKEN.to_owned()),
        ..UserDistancesArgs::default()
    };

    let err = UserDistancesConfig::from_args(args, &no_env).expect_err("bad latitude");
    match err {
        CliError::InvalidArgument { field, .. } => assert_eq!(field, ARG_ORIGIN_LAT),
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
fn tour_without_directions_needs_no_token() {
    let args = TourArgs {
        no_directions: true,
        limit: Some(2),
        ..TourArgs::default()
    };

    let config = TourConfig::from_args(args, &no_env).expect("config should build");

    assert!(config.mapbox.is_none());
    assert_eq!(config.limit, Some(2));
}

#[rstest]
fn tour_with_directions_requires_token() {
    let err = TourConfig::from_args(TourArgs::default(), &no_env).expect_err("no token");
    assert!(matches!(err, CliError::MissingArgument { .. }));
}

#[rstest]
fn interests_and_query_are_combined() {
    let selection = parse_interests(Some("churches, Beaches"), Some("museums=true&nature=false"))
        .expect("known ids");
    let expected = InterestSelection::new()
        .with(Category::Churches)
        .with(Category::Beaches)
        .with(Category::Museums);
    assert_eq!(selection, expected);
}

#[rstest]
fn unknown_interest_is_rejected() {
    let err = parse_interests(Some("churches,karaoke"), None).expect_err("unknown id");
    match err {
        CliError::InvalidArgument { field, value, .. } => {
            assert_eq!(field, ARG_INTERESTS);
            assert_eq!(value, "karaoke");
        }
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}

#[rstest]
#[case("20:00", NaiveTime::from_hms_opt(20, 0, 0))]
#[case(" 06:30 ", NaiveTime::from_hms_opt(6, 30, 0))]
fn places_config_parses_clock_time(#[case] raw: &str, #[case] expected: Option<NaiveTime>) {
    let args = PlacesArgs {
        at: Some(raw.to_owned()),
        ..PlacesArgs::default()
    };
    let config = PlacesConfig::try_from(args).expect("valid time");
    assert_eq!(Some(config.at), expected);
}

#[rstest]
fn places_config_rejects_bad_time() {
    let args = PlacesArgs {
        at: Some("8pm".to_owned()),
        ..PlacesArgs::default()
    };
    let err = PlacesConfig::try_from(args).expect_err("bad time");
    match err {
        CliError::InvalidArgument { field, value, .. } => {
            assert_eq!(field, ARG_AT);
            assert_eq!(value, "8pm");
        }
        other => panic!("expected InvalidArgument, found {other:?}"),
    }
}
