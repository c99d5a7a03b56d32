//! `places` command: list catalogue entries for the selected interests.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use chrono::{Local, NaiveTime};
use clap::Parser;
use itinera_core::{Category, InterestSelection, Location, is_open, order_by_open_status};
use itinera_data::load_catalogue;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_AT, ARG_INTERESTS, ARG_LOCATIONS, ARG_QUERY, CliError, DEFAULT_LOCATIONS,
    require_existing,
};

/// CLI arguments for the `places` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "places",
    long_about = "Filter the catalogue by interest category and print the \
                 matches as JSON, with places open at the given time \
                 listed first. With no interests selected every place is \
                 shown.",
    about = "List places for the selected interests"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct PlacesArgs {
    /// Path to the location catalogue.
    #[arg(long = ARG_LOCATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) locations: Option<Utf8PathBuf>,
    /// Comma-separated category ids, e.g. `churches,beaches`.
    #[arg(long = ARG_INTERESTS, value_name = "ids")]
    #[serde(default)]
    pub(crate) interests: Option<String>,
    /// Onboarding query string, e.g. `churches=true&beaches=true`.
    #[arg(long = ARG_QUERY, value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Local time used for the open check, as `HH:MM`.
    #[arg(long = ARG_AT, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) at: Option<String>,
}

impl PlacesArgs {
    pub(crate) fn into_config(self) -> Result<PlacesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlacesConfig::try_from(merged)
    }
}

/// Resolved `places` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlacesConfig {
    pub(crate) locations: Utf8PathBuf,
    pub(crate) selection: InterestSelection,
    pub(crate) at: NaiveTime,
}

impl TryFrom<PlacesArgs> for PlacesConfig {
    type Error = CliError;

    fn try_from(args: PlacesArgs) -> Result<Self, Self::Error> {
        let selection = parse_interests(args.interests.as_deref(), args.query.as_deref())?;
        let at = match args.at.as_deref() {
            Some(raw) => parse_time(raw)?,
            None => Local::now().time(),
        };
        Ok(Self {
            locations: args
                .locations
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_LOCATIONS)),
            selection,
            at,
        })
    }
}

/// Combine `--interests` ids with an onboarding `--query` string.
pub(crate) fn parse_interests(
    interests: Option<&str>,
    query: Option<&str>,
) -> Result<InterestSelection, CliError> {
    let mut selection = query.map(InterestSelection::from_query).unwrap_or_default();
    for id in interests
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        let category = Category::from_str(id).map_err(|reason| CliError::InvalidArgument {
            field: ARG_INTERESTS,
            value: id.to_owned(),
            reason,
        })?;
        selection.select(category);
    }
    Ok(selection)
}

fn parse_time(raw: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|err| CliError::InvalidArgument {
        field: ARG_AT,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}

/// One line of `places` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceEntry<'a> {
    pub(crate) title: &'a str,
    #[serde(rename = "type")]
    pub(crate) category: &'a Category,
    pub(crate) time_range: Option<&'a str>,
    pub(crate) open: bool,
    pub(crate) rating: Option<f64>,
    pub(crate) description: Option<&'a str>,
}

impl<'a> PlaceEntry<'a> {
    fn new(location: &'a Location, at: NaiveTime) -> Self {
        Self {
            title: &location.title,
            category: &location.category,
            time_range: location.time_range.as_deref(),
            open: is_open(location, at),
            rating: location.rating,
            description: location.description.as_deref(),
        }
    }
}

pub(crate) fn run_places(args: PlacesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_places_with(args, &mut stdout)
}

pub(crate) fn run_places_with(args: PlacesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    execute_places(&args.into_config()?, writer)
}

pub(crate) fn execute_places(
    config: &PlacesConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.locations, ARG_LOCATIONS)?;
    let catalogue = load_catalogue(&config.locations)?;
    let shown = config.selection.filter(&catalogue);
    let ordered = order_by_open_status(&shown, config.at);
    let entries: Vec<PlaceEntry<'_>> = ordered
        .iter()
        .map(|location| PlaceEntry::new(location, config.at))
        .collect();

    let payload = serde_json::to_string_pretty(&entries).map_err(CliError::SerialiseOutput)?;
    writer.write_all(payload.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}
