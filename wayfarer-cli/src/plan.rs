//! `plan` command: geocode, route and segment a trip.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{
    Coordinate, GeocodeError, Geocoder, Location, PlannerConfig, RecommendError,
    RecommendationContext, RecommendedPlace, Recommender, Router, TargetDuration, TripPlan,
    TripPlanner,
};
use wayfarer_data::geocoding::{HttpGeocoder, HttpGeocoderConfig};
use wayfarer_data::recommendation::FileRecommender;
use wayfarer_data::routing::{HttpRouter, HttpRouterConfig};

use crate::waypoints::resolve_max_waypoints;
use crate::{
    ARG_DESTINATION, ARG_MAX_WAYPOINTS, ARG_NOMINATIM_BASE_URL, ARG_ORIGIN, ARG_OSRM_BASE_URL,
    ARG_PLACES, ARG_TARGET_HOURS, CliError, ENV_PLAN_DESTINATION, ENV_PLAN_ORIGIN,
    require_existing, resolve_target, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a road trip between two places. Origin and destination \
                 are either \"lon,lat\" pairs or free-text queries resolved \
                 through Nominatim. Recommended stops are read from a JSON \
                 payload, routed through OSRM as waypoints, and the route is \
                 split into segments of bounded driving time.",
    about = "Plan a trip between two places"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct PlanArgs {
    /// Trip origin as "lon,lat" or a place name.
    #[arg(long = ARG_ORIGIN, value_name = "place", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Trip destination as "lon,lat" or a place name.
    #[arg(long = ARG_DESTINATION, value_name = "place", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// JSON recommendation payload supplying stops and destination POIs.
    #[arg(long = ARG_PLACES, value_name = "path")]
    #[serde(default)]
    pub(crate) places: Option<Utf8PathBuf>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Base URL for the Nominatim server.
    #[arg(long = ARG_NOMINATIM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_base_url: Option<String>,
    /// Target driving hours per segment (default 5).
    #[arg(long = ARG_TARGET_HOURS, value_name = "hours")]
    #[serde(default)]
    pub(crate) target_hours: Option<f64>,
    /// Maximum number of recommended waypoints (default 23).
    #[arg(long = ARG_MAX_WAYPOINTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_waypoints: Option<usize>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Origin query.
    pub(crate) origin: String,
    /// Destination query.
    pub(crate) destination: String,
    /// Optional recommendation payload.
    pub(crate) places: Option<Utf8PathBuf>,
    /// OSRM endpoint.
    pub(crate) osrm_base_url: String,
    /// Nominatim endpoint.
    pub(crate) nominatim_base_url: String,
    /// Target driving time per segment.
    pub(crate) target: TargetDuration,
    /// Waypoint cap.
    pub(crate) max_waypoints: usize,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if let Some(places) = &self.places {
            require_existing(places, ARG_PLACES)?;
        }
        Ok(())
    }

    /// Planner limits. Without a recommendation source nothing is requested.
    pub(crate) fn planner_config(&self) -> PlannerConfig {
        let config = PlannerConfig::default()
            .with_target(self.target)
            .with_max_waypoints(self.max_waypoints);
        if self.places.is_some() {
            config
        } else {
            config.with_max_waypoints(0).with_max_destination_pois(0)
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let origin = args.origin.ok_or(CliError::MissingArgument {
            field: ARG_ORIGIN,
            env: ENV_PLAN_ORIGIN,
        })?;
        let destination = args.destination.ok_or(CliError::MissingArgument {
            field: ARG_DESTINATION,
            env: ENV_PLAN_DESTINATION,
        })?;
        let target = resolve_target(args.target_hours)?;
        let max_waypoints = resolve_max_waypoints(args.max_waypoints)?;
        let osrm_base_url = args
            .osrm_base_url
            .unwrap_or_else(|| HttpRouterConfig::default().base_url);
        let nominatim_base_url = args
            .nominatim_base_url
            .unwrap_or_else(|| HttpGeocoderConfig::default().base_url);
        Ok(Self {
            origin,
            destination,
            places: args.places,
            osrm_base_url,
            nominatim_base_url,
            target,
            max_waypoints,
        })
    }
}

/// Collaborators used by one `plan` invocation.
pub(crate) struct PlanServices {
    pub(crate) router: Box<dyn Router>,
    pub(crate) geocoder: Box<dyn Geocoder>,
    pub(crate) recommender: Box<dyn Recommender>,
}

/// Builds the collaborators for the current plan invocation.
pub(crate) trait PlanServicesBuilder {
    fn build(&self, config: &PlanConfig) -> Result<PlanServices, CliError>;
}

pub(crate) struct DefaultPlanServicesBuilder;

impl PlanServicesBuilder for DefaultPlanServicesBuilder {
    fn build(&self, config: &PlanConfig) -> Result<PlanServices, CliError> {
        let router = HttpRouter::new(config.osrm_base_url.clone()).map_err(|source| {
            CliError::BuildClient {
                service: "routing",
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        let geocoder = HttpGeocoder::new(config.nominatim_base_url.clone()).map_err(|source| {
            CliError::BuildClient {
                service: "geocoding",
                base_url: config.nominatim_base_url.clone(),
                source,
            }
        })?;
        let recommender: Box<dyn Recommender> = match &config.places {
            Some(path) => Box::new(FileRecommender::new(path.clone())),
            None => Box::new(NoRecommendations),
        };
        Ok(PlanServices {
            router: Box::new(router),
            geocoder: Box::new(geocoder),
            recommender,
        })
    }
}

/// Recommender used when no payload is configured.
struct NoRecommendations;

impl Recommender for NoRecommendations {
    fn recommend(
        &self,
        _context: &RecommendationContext,
    ) -> Result<Vec<RecommendedPlace>, RecommendError> {
        Ok(Vec::new())
    }
}

/// Geocoder that resolves `lon,lat` literals locally and defers the rest.
pub(crate) struct LiteralCoordinates<'a> {
    inner: &'a dyn Geocoder,
}

impl<'a> LiteralCoordinates<'a> {
    pub(crate) const fn new(inner: &'a dyn Geocoder) -> Self {
        Self { inner }
    }
}

/// Parse `"lon,lat"`, ignoring surrounding whitespace.
pub(crate) fn parse_lon_lat(query: &str) -> Option<Coordinate> {
    let (longitude, latitude) = query.split_once(',')?;
    let longitude = longitude.trim().parse().ok()?;
    let latitude = latitude.trim().parse().ok()?;
    Coordinate::new(longitude, latitude).ok()
}

impl Geocoder for LiteralCoordinates<'_> {
    fn search(&self, query: &str) -> Result<Vec<Location>, GeocodeError> {
        match parse_lon_lat(query) {
            Some(coordinate) => {
                debug!("using literal coordinate {query:?}");
                let label = query.trim();
                Ok(vec![Location::new(label, label, coordinate)])
            }
            None => self.inner.search(query),
        }
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanServicesBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanServicesBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let plan = execute_plan(args, builder)?;
    write_json(writer, &plan)
}

fn execute_plan(args: PlanArgs, builder: &dyn PlanServicesBuilder) -> Result<TripPlan, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let services = builder.build(&config)?;
    let planner = TripPlanner::new(
        &*services.router,
        &*services.recommender,
        config.planner_config(),
    );
    let geocoder = LiteralCoordinates::new(&*services.geocoder);
    Ok(planner.plan_from_queries(&geocoder, &config.origin, &config.destination)?)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
