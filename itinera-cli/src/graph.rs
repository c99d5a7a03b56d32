//! `graph` command: precompute travel costs between every catalogue pair.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use itinera_data::builders::{BuildOptions, DEFAULT_GRAPH_DELAY};
use itinera_data::{build_distance_graph, summarise_edges, write_distance_graph};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::mapbox::{
    EnvLookup, MapboxProviderFactory, MapboxSettings, ProviderFactory, process_env, request_delay,
};
use crate::{
    ARG_BASE_URL, ARG_DELAY_MS, ARG_LOCATIONS, ARG_MAPBOX_TOKEN, ARG_OUTPUT, ARG_PROFILE, CliError,
    DEFAULT_DISTANCE_GRAPH, DEFAULT_LOCATIONS, load_source_catalogue,
};

const SAMPLE_EDGES: usize = 3;

/// CLI arguments for the `graph` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "graph",
    long_about = "Call the Mapbox Matrix API once for every ordered pair of \
                 catalogue locations and save the distance graph. Failed \
                 pairs are logged and left out.",
    about = "Build the all-pairs distance graph"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct GraphArgs {
    /// Path to the location catalogue.
    #[arg(long = ARG_LOCATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) locations: Option<Utf8PathBuf>,
    /// Where to write the distance graph.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
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

impl GraphArgs {
    pub(crate) fn into_config(self) -> Result<GraphConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GraphConfig::from_args(merged, &process_env)
    }
}

/// Resolved `graph` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GraphConfig {
    pub(crate) locations: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
    pub(crate) mapbox: MapboxSettings,
    pub(crate) options: BuildOptions,
}

impl GraphConfig {
    pub(crate) fn from_args(args: GraphArgs, lookup: EnvLookup<'_>) -> Result<Self, CliError> {
        let mapbox = MapboxSettings::resolve(
            args.mapbox_token,
            args.base_url,
            args.profile.as_deref(),
            lookup,
        )?;
        let delay = request_delay(args.delay_ms, DEFAULT_GRAPH_DELAY);
        Ok(Self {
            locations: args
                .locations
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOCATIONS)),
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DISTANCE_GRAPH)),
            mapbox,
            options: BuildOptions::distance_graph().with_delay(delay),
        })
    }
}

pub(crate) fn run_graph(args: GraphArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_graph_with(args, &MapboxProviderFactory, &mut stdout)
}

pub(crate) fn run_graph_with(
    args: GraphArgs,
    factory: &dyn ProviderFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    execute_graph(args.into_config()?, factory, writer)
}

pub(crate) fn execute_graph(
    config: GraphConfig,
    factory: &dyn ProviderFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalogue = load_source_catalogue(&config.locations)?;
    info!(
        "loaded {} locations from {}",
        catalogue.len(),
        config.locations
    );
    let provider = factory.travel_costs(&config.mapbox)?;

    let (graph, report) = build_distance_graph(&catalogue, provider.as_ref(), &config.options);
    write_distance_graph(&config.output, &graph)?;

    writeln!(writer, "Distance graph saved to {}", config.output)?;
    writeln!(
        writer,
        "Locations: {}, edges: {}, failed requests: {}",
        graph.node_count(),
        graph.edge_count(),
        report.failed
    )?;
    if let Some(first) = catalogue.iter().next() {
        let samples = summarise_edges(&graph, &catalogue, &first.title, SAMPLE_EDGES);
        if !samples.is_empty() {
            writeln!(writer, "Sample distances:")?;
            for line in samples {
                writeln!(writer, "  {line}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
    lookup: EnvLookup<'_>,
) -> Result<GraphConfig, CliError> {
    let merged = GraphArgs::merge_from_layers(layers).map_err(CliError::from)?;
    GraphConfig::from_args(merged, lookup)
}
