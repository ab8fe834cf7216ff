//! `waypoints` command: pick routing waypoints from a recommendation payload.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{Coordinate, DEFAULT_MAX_WAYPOINTS, select_waypoints};
use wayfarer_data::recommendation::parse_recommendation_str;

use crate::{
    ARG_MAX_WAYPOINTS, ARG_PLACES, CliError, ENV_WAYPOINTS_PLACES, require_existing, write_json,
};

/// CLI arguments for the `waypoints` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a recommender reply (a JSON array of places, or an \
                 object holding one under places, recommendations or pois) \
                 and print the usable [lon, lat] waypoints in ranking order.",
    about = "Select waypoints from recommended places"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct WaypointsArgs {
    /// Path to a JSON recommendation payload.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) places_path: Option<Utf8PathBuf>,
    /// Maximum number of waypoints to keep (default 23).
    #[arg(long = ARG_MAX_WAYPOINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_waypoints: Option<usize>,
}

impl WaypointsArgs {
    pub(crate) fn into_config(self) -> Result<WaypointsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        WaypointsConfig::try_from(merged)
    }
}

/// Resolved `waypoints` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WaypointsConfig {
    /// Path to the recommendation payload.
    pub(crate) places_path: Utf8PathBuf,
    /// Waypoint cap.
    pub(crate) max_waypoints: usize,
}

impl TryFrom<WaypointsArgs> for WaypointsConfig {
    type Error = CliError;

    fn try_from(args: WaypointsArgs) -> Result<Self, Self::Error> {
        let places_path = args.places_path.ok_or(CliError::MissingArgument {
            field: ARG_PLACES,
            env: ENV_WAYPOINTS_PLACES,
        })?;
        let max_waypoints = resolve_max_waypoints(args.max_waypoints)?;
        Ok(Self {
            places_path,
            max_waypoints,
        })
    }
}

/// Apply the default cap and reject caps the router cannot honour.
pub(crate) fn resolve_max_waypoints(requested: Option<usize>) -> Result<usize, CliError> {
    match requested {
        None => Ok(DEFAULT_MAX_WAYPOINTS),
        Some(count) if count <= DEFAULT_MAX_WAYPOINTS => Ok(count),
        Some(count) => Err(CliError::TooManyWaypoints {
            requested: count,
            max: DEFAULT_MAX_WAYPOINTS,
        }),
    }
}

pub(crate) fn run_waypoints(args: WaypointsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_waypoints_with(args, &mut stdout)
}

pub(crate) fn run_waypoints_with(
    args: WaypointsArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let waypoints = execute_waypoints(&config)?;
    write_json(writer, &waypoints)
}

fn execute_waypoints(config: &WaypointsConfig) -> Result<Vec<Coordinate>, CliError> {
    require_existing(&config.places_path, ARG_PLACES)?;
    let text = wayfarer_fs::read_utf8_to_string(&config.places_path).map_err(|source| {
        CliError::OpenInput {
            field: ARG_PLACES,
            path: config.places_path.clone(),
            source,
        }
    })?;
    let places = parse_recommendation_str(&text).map_err(|source| CliError::Recommendations {
        path: config.places_path.clone(),
        source,
    })?;
    Ok(select_waypoints(&places, config.max_waypoints))
}
