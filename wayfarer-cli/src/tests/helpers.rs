//! Fixtures shared by the CLI unit and behaviour tests.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Four points one degree apart along the equator, three hours end to end.
pub(super) const EQUATOR_ROUTE: &str = r#"{
    "coordinates": [[10.0, 0.0], [11.0, 0.0], [12.0, 0.0], [13.0, 0.0]],
    "distance": 333585.0,
    "duration": 10800.0
}"#;

/// Recommender reply with one usable stop and one destination POI.
pub(super) const MOAB_RECOMMENDATIONS: &str = r#"{
    "places": [
        {"name": "Grand Junction", "description": "Colorado River town", "coordinates": [-108.55, 39.06]},
        {"name": "Null Island", "description": "Unplaced", "coordinates": [0, 0]}
    ],
    "destination_pois": [
        {"name": "Arches National Park", "description": "Sandstone arches", "category": "park"}
    ]
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}
