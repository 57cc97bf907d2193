use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeZone};

use super::feature::{Feature, FeatureCollection};

/// Name of an export file for the given moment, e.g. `polygons_20240131_235959.geojson`.
///
/// Two exports within the same second get the same name and the later one overwrites the
/// earlier.
pub fn export_filename<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("polygons_{}.geojson", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Serialize `features` as a pretty-printed FeatureCollection.
pub fn feature_collection_bytes(features: Vec<Feature>) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(&FeatureCollection::from(features))
}

/// Write the contents as a file named `filename` inside `output_dir`, creating the directory
/// if needed. Returns the path of the written file.
pub fn write_geojson_file(
    contents: &[u8],
    output_dir: &Path,
    filename: &str,
) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let output_filepath = output_dir.join(filename);
    fs::write(&output_filepath, contents)?;
    Ok(output_filepath)
}
