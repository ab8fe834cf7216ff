//! Command-line interface for the Wayfarer trip planner.
#![forbid(unsafe_code)]

use std::io::{BufReader, Write};

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wayfarer_core::TargetDuration;
use wayfarer_fs::open_utf8_file;

mod error;
mod plan;
mod segment;
mod waypoints;

pub use error::CliError;

use plan::{PlanArgs, run_plan};
use segment::{SegmentArgs, run_segment};
use waypoints::{WaypointsArgs, run_waypoints};

const ARG_ROUTE: &str = "route";
const ARG_PLACES: &str = "places";
const ARG_TARGET_HOURS: &str = "target-hours";
const ARG_MAX_WAYPOINTS: &str = "max-waypoints";
const ARG_ORIGIN: &str = "origin";
const ARG_DESTINATION: &str = "destination";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_NOMINATIM_BASE_URL: &str = "nominatim-base-url";
const ENV_SEGMENT_ROUTE: &str = "WAYFARER_CMDS_SEGMENT_ROUTE_PATH";
const ENV_WAYPOINTS_PLACES: &str = "WAYFARER_CMDS_WAYPOINTS_PLACES_PATH";
const ENV_PLAN_ORIGIN: &str = "WAYFARER_CMDS_PLAN_ORIGIN";
const ENV_PLAN_DESTINATION: &str = "WAYFARER_CMDS_PLAN_DESTINATION";

/// Run the Wayfarer CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Segment(args) => run_segment(args),
        Command::Waypoints(args) => run_waypoints(args),
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Plan road trips split into bounded driving segments",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a route into segments of bounded driving time.
    Segment(SegmentArgs),
    /// Select routing waypoints from a recommendation payload.
    Waypoints(WaypointsArgs),
    /// Geocode, route and segment a trip between two places.
    Plan(PlanArgs),
}

fn resolve_target(hours: Option<f64>) -> Result<TargetDuration, CliError> {
    hours.map_or_else(
        || Ok(TargetDuration::default()),
        |hours| TargetDuration::from_hours(hours).map_err(CliError::InvalidTarget),
    )
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match wayfarer_fs::file_is_file(path) {
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

/// Loads a JSON document from disk.
fn load_json<T: DeserializeOwned>(path: &Utf8Path, field: &'static str) -> Result<T, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        field,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
