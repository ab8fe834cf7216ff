//! `segment` command: split a stored route into driving legs.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::warn;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{Route, RouteSegment, TargetDuration, segment_route};

use crate::{
    ARG_ROUTE, ARG_TARGET_HOURS, CliError, ENV_SEGMENT_ROUTE, load_json, require_existing,
    resolve_target, write_json,
};

/// CLI arguments for the `segment` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a route as JSON ({\"coordinates\": [[lon, lat], ...], \
                 \"distance\": metres, \"duration\": seconds}) and print the \
                 segments whose estimated driving time approaches the target.",
    about = "Split a route into driving segments"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct SegmentArgs {
    /// Path to a JSON file containing a route.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) route_path: Option<Utf8PathBuf>,
    /// Target driving hours per segment (default 5).
    #[arg(long = ARG_TARGET_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) target_hours: Option<f64>,
}

impl SegmentArgs {
    pub(crate) fn into_config(self) -> Result<SegmentConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SegmentConfig::try_from(merged)
    }
}

/// Resolved `segment` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SegmentConfig {
    /// Path to the JSON route.
    pub(crate) route_path: Utf8PathBuf,
    /// Target driving time per segment.
    pub(crate) target: TargetDuration,
}

impl TryFrom<SegmentArgs> for SegmentConfig {
    type Error = CliError;

    fn try_from(args: SegmentArgs) -> Result<Self, Self::Error> {
        let route_path = args.route_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE,
            env: ENV_SEGMENT_ROUTE,
        })?;
        let target = resolve_target(args.target_hours)?;
        Ok(Self { route_path, target })
    }
}

pub(crate) fn run_segment(args: SegmentArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_segment_with(args, &mut stdout)
}

pub(crate) fn run_segment_with(args: SegmentArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let segments = execute_segment(&config)?;
    write_json(writer, &segments)
}

pub(crate) fn execute_segment(config: &SegmentConfig) -> Result<Vec<RouteSegment>, CliError> {
    require_existing(&config.route_path, ARG_ROUTE)?;
    let route = load_route(&config.route_path)?;
    if let Err(err) = route.validate() {
        warn!("route in {} cannot be segmented: {err}", config.route_path);
    }
    Ok(segment_route(&route, config.target))
}

/// Loads a JSON-encoded [`Route`] from disk.
pub(crate) fn load_route(path: &Utf8Path) -> Result<Route, CliError> {
    load_json(path, ARG_ROUTE)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SegmentConfig, CliError> {
    let merged = SegmentArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SegmentConfig::try_from(merged)
}
