//! Recommendation payloads and a file-backed recommender.
//!
//! Recommenders are typically language models asked for JSON. Their output
//! is untrusted: entries may be missing fields, carry the wrong types or be
//! wrapped in an object. [`parse_recommendations`] keeps whatever can be
//! used and drops the rest, leaving coordinate validation to
//! [`RecommendedPlace::waypoint`].

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde_json::{Map, Value};
use wayfarer_core::{
    RecommendError, RecommendationContext, RecommendationKind, RecommendedPlace, Recommender,
};

/// Object keys that may wrap the list of places, in lookup order.
const LIST_KEYS: [&str; 3] = ["places", "recommendations", "pois"];

/// Object key holding destination points of interest in a file payload.
const DESTINATION_KEY: &str = "destination_pois";

/// Extract recommended places from an untrusted JSON document.
///
/// Accepts a bare array or an object holding the array under `places`,
/// `recommendations` or `pois`. Each entry must be an object with a
/// non-empty string `name`. `description` defaults to empty, `category` is
/// kept only when it is a string, and `coordinate` (or `coordinates`) is kept
/// only when it is an array of numbers. Other entries are skipped.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wayfarer_data::recommendation::parse_recommendations;
///
/// let payload = json!({
///     "places": [
///         {"name": "Arches", "description": "Sandstone arches", "coordinates": [-109.59, 38.73]},
///         {"description": "nameless"},
///         {"name": "Dead Horse Point", "category": 7, "coordinate": ["x", 38.5]}
///     ]
/// });
/// let places = parse_recommendations(&payload);
/// assert_eq!(places.len(), 2);
/// assert!(places[0].waypoint().is_some());
/// assert!(places[1].category.is_none());
/// assert!(places[1].coordinate.is_none());
/// ```
#[must_use]
pub fn parse_recommendations(payload: &Value) -> Vec<RecommendedPlace> {
    entries(payload).map_or_else(Vec::new, parse_entries)
}

/// Parse a recommender reply given as JSON text.
///
/// # Errors
/// Returns [`RecommendError::Parse`] when `text` is not JSON.
pub fn parse_recommendation_str(text: &str) -> Result<Vec<RecommendedPlace>, RecommendError> {
    let payload: Value = serde_json::from_str(text).map_err(|err| RecommendError::Parse {
        message: err.to_string(),
    })?;
    Ok(parse_recommendations(&payload))
}

fn entries(payload: &Value) -> Option<&[Value]> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(object) => list_in(object, &LIST_KEYS),
        _ => {
            warn!("recommendation payload is neither an array nor an object");
            None
        }
    }
}

fn list_in<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
}

fn parse_entries(items: &[Value]) -> Vec<RecommendedPlace> {
    let places: Vec<_> = items.iter().filter_map(parse_entry).collect();
    if places.len() < items.len() {
        warn!(
            "skipped {} of {} recommendation entries without a usable name",
            items.len() - places.len(),
            items.len()
        );
    }
    places
}

fn parse_entry(item: &Value) -> Option<RecommendedPlace> {
    let object = item.as_object()?;
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())?;
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut place = RecommendedPlace::new(name, description);
    if let Some(category) = object.get("category").and_then(Value::as_str) {
        place = place.with_category(category);
    }
    if let Some(coordinate) = ["coordinate", "coordinates"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(numeric_array)
    {
        place = place.with_raw_coordinate(coordinate);
    }
    Some(place)
}

fn numeric_array(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

/// Recommender serving a JSON payload stored on disk.
///
/// The file is read on every call so edits take effect without a restart.
/// Along-route requests use the same lists [`parse_recommendations`]
/// accepts; destination requests prefer a top-level `destination_pois` array
/// when the payload is an object. Destination results are truncated to the
/// context's limit. Along-route results are returned whole: entries without a
/// usable coordinate must not take waypoint slots, so the cap is left to
/// [`wayfarer_core::select_waypoint_places`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecommender {
    path: Utf8PathBuf,
}

impl FileRecommender {
    /// Serve recommendations from `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the payload.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> Result<Value, RecommendError> {
        let text = wayfarer_fs::read_utf8_to_string(&self.path).map_err(|err| {
            let message = match err.kind() {
                io::ErrorKind::NotFound => format!("{} does not exist", self.path),
                _ => format!("failed to read {}: {err}", self.path),
            };
            RecommendError::Unavailable { message }
        })?;
        serde_json::from_str(&text).map_err(|err| RecommendError::Parse {
            message: format!("{}: {err}", self.path),
        })
    }
}

impl Recommender for FileRecommender {
    fn recommend(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<RecommendedPlace>, RecommendError> {
        let payload = self.load()?;
        let destination_list = match (&payload, context.kind) {
            (Value::Object(object), RecommendationKind::AtDestination) => {
                list_in(object, &[DESTINATION_KEY])
            }
            _ => None,
        };
        let mut places = destination_list
            .map_or_else(|| parse_recommendations(&payload), parse_entries);
        if context.kind == RecommendationKind::AtDestination {
            places.truncate(context.limit);
        }
        debug!("loaded {} recommendations from {}", places.len(), self.path);
        Ok(places)
    }
}
