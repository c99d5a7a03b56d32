//! `tour` command: walk a closest-first tour with directions for each leg.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use itinera_core::{
    DirectionsProvider, InterestSelection, Leg, ManeuverIcon, RouteDirections, Tour,
    UserDistances, format_distance, format_duration, format_step_instruction, sort_by_closest,
    total_route_info,
};
use itinera_data::{load_catalogue, load_user_distances};
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::mapbox::{
    EnvLookup, MapboxProviderFactory, MapboxSettings, ProviderFactory, process_env,
};
use crate::places::parse_interests;
use crate::{
    ARG_BASE_URL, ARG_INTERESTS, ARG_LIMIT, ARG_LOCATIONS, ARG_MAPBOX_TOKEN, ARG_NO_DIRECTIONS,
    ARG_PROFILE, ARG_QUERY, ARG_USER_DISTANCES, CliError, DEFAULT_LOCATIONS,
    DEFAULT_USER_DISTANCES, require_existing,
};

/// CLI arguments for the `tour` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "tour",
    long_about = "Order the selected places by their precomputed distance \
                 from the user origin and step through them one leg at a \
                 time, fetching fresh driving directions for every leg.",
    about = "Walk a closest-first tour"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct TourArgs {
    /// Path to the location catalogue.
    #[arg(long = ARG_LOCATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) locations: Option<Utf8PathBuf>,
    /// Path to the precomputed user-distance table.
    #[arg(long = ARG_USER_DISTANCES, value_name = "path")]
    #[serde(default)]
    pub(crate) user_distances: Option<Utf8PathBuf>,
    /// Comma-separated category ids, e.g. `churches,beaches`.
    #[arg(long = ARG_INTERESTS, value_name = "ids")]
    #[serde(default)]
    pub(crate) interests: Option<String>,
    /// Onboarding query string, e.g. `churches=true&beaches=true`.
    #[arg(long = ARG_QUERY, value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Visit at most this many stops.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Print precomputed distances instead of fetching directions.
    #[arg(long = ARG_NO_DIRECTIONS)]
    #[serde(default)]
    pub(crate) no_directions: bool,
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
}

impl TourArgs {
    pub(crate) fn into_config(self) -> Result<TourConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TourConfig::from_args(merged, &process_env)
    }
}

/// Resolved `tour` command configuration.
///
/// `mapbox` is `None` when directions are disabled, so no token is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TourConfig {
    pub(crate) locations: Utf8PathBuf,
    pub(crate) user_distances: Utf8PathBuf,
    pub(crate) selection: InterestSelection,
    pub(crate) limit: Option<usize>,
    pub(crate) mapbox: Option<MapboxSettings>,
}

impl TourConfig {
    pub(crate) fn from_args(args: TourArgs, lookup: EnvLookup<'_>) -> Result<Self, CliError> {
        let selection = parse_interests(args.interests.as_deref(), args.query.as_deref())?;
        let mapbox = if args.no_directions {
            None
        } else {
            Some(MapboxSettings::resolve(
                args.mapbox_token,
                args.base_url,
                args.profile.as_deref(),
                lookup,
            )?)
        };
        Ok(Self {
            locations: args
                .locations
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOCATIONS)),
            user_distances: args
                .user_distances
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_USER_DISTANCES)),
            selection,
            limit: args.limit,
            mapbox,
        })
    }
}

pub(crate) fn run_tour(args: TourArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_tour_with(args, &MapboxProviderFactory, &mut stdout)
}

pub(crate) fn run_tour_with(
    args: TourArgs,
    factory: &dyn ProviderFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    execute_tour(&args.into_config()?, factory, writer)
}

pub(crate) fn execute_tour(
    config: &TourConfig,
    factory: &dyn ProviderFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.locations, ARG_LOCATIONS)?;
    require_existing(&config.user_distances, ARG_USER_DISTANCES)?;
    let catalogue = load_catalogue(&config.locations)?;
    let distances = load_user_distances(&config.user_distances)?;

    let mut stops = sort_by_closest(&config.selection.filter(&catalogue), &distances);
    if let Some(limit) = config.limit {
        stops.truncate(limit);
    }
    if stops.is_empty() {
        writeln!(writer, "No destinations match the selected interests.")?;
        return Ok(());
    }

    let directions = config
        .mapbox
        .as_ref()
        .map(|settings| factory.directions(settings))
        .transpose()?;
    let mut tour = Tour::new(distances.origin().clone(), stops);
    let (_, total) = tour.progress();
    info!("walking {total} stops from {}", tour.origin().title);
    writeln!(writer, "Tour from {}: {total} stops", tour.origin().title)?;

    for _ in 0..total {
        let Some(leg) = tour.next() else { break };
        let (position, _) = tour.progress();
        writeln!(writer)?;
        writeln!(
            writer,
            "Leg {position}/{total}: {} → {}",
            leg.from.title, leg.to.title
        )?;
        match directions.as_deref() {
            Some(provider) => write_directions(writer, provider, &leg)?,
            None => write_precomputed(writer, &distances, &leg)?,
        }
    }
    Ok(())
}

fn write_directions(
    writer: &mut dyn Write,
    provider: &dyn DirectionsProvider,
    leg: &Leg,
) -> Result<(), CliError> {
    match provider.route(&leg.from, &leg.to) {
        Ok(route) => write_route(writer, &route),
        Err(err) => {
            warn!(
                "directions for {} → {} failed: {err}",
                leg.from.title, leg.to.title
            );
            writeln!(writer, "  directions unavailable: {err}")?;
            Ok(())
        }
    }
}

fn write_route(writer: &mut dyn Write, route: &RouteDirections) -> Result<(), CliError> {
    let totals = total_route_info(&route.steps);
    writeln!(
        writer,
        "  Total: {} · {}",
        format_distance(totals.distance),
        format_duration(totals.duration)
    )?;
    for step in route.steps.iter().filter(|step| step.maneuver.kind != "arrive") {
        let icon = ManeuverIcon::from_maneuver(&step.maneuver);
        writeln!(writer, "  {} {}", icon.glyph(), format_step_instruction(step))?;
    }
    Ok(())
}

fn write_precomputed(
    writer: &mut dyn Write,
    distances: &UserDistances,
    leg: &Leg,
) -> Result<(), CliError> {
    match distances.distance_to(&leg.to.title) {
        Some(cost) => writeln!(
            writer,
            "  From {}: {} · {}",
            distances.origin().title,
            format_distance(cost.distance),
            format_duration(cost.duration)
        )?,
        None => writeln!(writer, "  No precomputed distance")?,
    }
    Ok(())
}
