//! `user-distances` command: precompute travel costs from the user origin.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use itinera_core::user_distances::{
    DEFAULT_ORIGIN_LATITUDE, DEFAULT_ORIGIN_LONGITUDE, DEFAULT_ORIGIN_TITLE,
};
use itinera_core::{DEFAULT_CLOSEST_LIMIT, Waypoint};
use itinera_data::builders::{BuildOptions, DEFAULT_USER_DISTANCE_DELAY};
use itinera_data::{build_user_distances, summarise_closest, write_user_distances};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::mapbox::{
    EnvLookup, MapboxProviderFactory, MapboxSettings, ProviderFactory, process_env, request_delay,
};
use crate::{
    ARG_BASE_URL, ARG_DELAY_MS, ARG_LOCATIONS, ARG_MAPBOX_TOKEN, ARG_ORIGIN_LAT, ARG_ORIGIN_LON,
    ARG_ORIGIN_TITLE, ARG_OUTPUT, ARG_PROFILE, CliError, DEFAULT_LOCATIONS,
    DEFAULT_USER_DISTANCES, load_source_catalogue,
};

/// CLI arguments for the `user-distances` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "user-distances",
    long_about = "Call the Mapbox Matrix API once per catalogue location, \
                 measuring from a fixed origin, and save the table used to \
                 order tours closest-first.",
    about = "Build the distances from the user origin"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct UserDistancesArgs {
    /// Path to the location catalogue.
    #[arg(long = ARG_LOCATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) locations: Option<Utf8PathBuf>,
    /// Where to write the user-distance table.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Display name of the origin.
    #[arg(long = ARG_ORIGIN_TITLE, value_name = "title")]
    #[serde(default)]
    pub(crate) origin_title: Option<String>,
    /// Origin latitude in degrees.
    #[arg(long = ARG_ORIGIN_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) origin_lat: Option<f64>,
    /// Origin longitude in degrees.
    #[arg(long = ARG_ORIGIN_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) origin_lon: Option<f64>,
    /// Mapbox access token.
    #[arg(long = ARG_MAPBOX_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) mapbox_token: Option<String>,
    /// Mapbox API origin.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Routing profile: driving, driving-traffic, walking or cycling.
    #[arg(long = ARG_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Pause after each request, in milliseconds.
    #[arg(long = ARG_DELAY_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) delay_ms: Option<u64>,
}

impl UserDistancesArgs {
    pub(crate) fn into_config(self) -> Result<UserDistancesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        UserDistancesConfig::from_args(merged, &process_env)
    }
}

/// Resolved `user-distances` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UserDistancesConfig {
    pub(crate) locations: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
    pub(crate) origin: Waypoint,
    pub(crate) mapbox: MapboxSettings,
    pub(crate) options: BuildOptions,
}

impl UserDistancesConfig {
    pub(crate) fn from_args(
        args: UserDistancesArgs,
        lookup: EnvLookup<'_>,
    ) -> Result<Self, CliError> {
        let origin = origin_from_args(&args)?;
        let mapbox = MapboxSettings::resolve(
            args.mapbox_token,
            args.base_url,
            args.profile.as_deref(),
            lookup,
        )?;
        let delay = request_delay(args.delay_ms, DEFAULT_USER_DISTANCE_DELAY);
        Ok(Self {
            locations: args
                .locations
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOCATIONS)),
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_USER_DISTANCES)),
            origin,
            mapbox,
            options: BuildOptions::user_distances().with_delay(delay),
        })
    }
}

fn origin_from_args(args: &UserDistancesArgs) -> Result<Waypoint, CliError> {
    let latitude = args.origin_lat.unwrap_or(DEFAULT_ORIGIN_LATITUDE);
    let longitude = args.origin_lon.unwrap_or(DEFAULT_ORIGIN_LONGITUDE);
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(CliError::InvalidArgument {
            field: ARG_ORIGIN_LAT,
            value: latitude.to_string(),
            reason: "latitude must lie between -90 and 90".to_owned(),
        });
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(CliError::InvalidArgument {
            field: ARG_ORIGIN_LON,
            value: longitude.to_string(),
            reason: "longitude must lie between -180 and 180".to_owned(),
        });
    }
    let title = args
        .origin_title
        .clone()
        .unwrap_or_else(|| DEFAULT_ORIGIN_TITLE.to_owned());
    Ok(Waypoint::new(
        title,
        Coord {
            x: longitude,
            y: latitude,
        },
    ))
}

pub(crate) fn run_user_distances(args: UserDistancesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_user_distances_with(args, &MapboxProviderFactory, &mut stdout)
}

pub(crate) fn run_user_distances_with(
    args: UserDistancesArgs,
    factory: &dyn ProviderFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    execute_user_distances(args.into_config()?, factory, writer)
}

pub(crate) fn execute_user_distances(
    config: UserDistancesConfig,
    factory: &dyn ProviderFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalogue = load_source_catalogue(&config.locations)?;
    let provider = factory.travel_costs(&config.mapbox)?;

    let (distances, report) =
        build_user_distances(&config.origin, &catalogue, provider.as_ref(), &config.options);
    write_user_distances(&config.output, &distances)?;

    writeln!(
        writer,
        "Calculated {} of {} distances from {}",
        report.succeeded, report.attempted, config.origin.title
    )?;
    writeln!(writer, "User distances saved to {}", config.output)?;
    let closest = summarise_closest(&distances, DEFAULT_CLOSEST_LIMIT);
    if !closest.is_empty() {
        writeln!(writer, "Closest {DEFAULT_CLOSEST_LIMIT} destinations:")?;
        for line in closest {
            writeln!(writer, "  {line}")?;
        }
    }
    Ok(())
}
