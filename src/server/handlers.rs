use std::{io, path::PathBuf, sync::Arc};

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::error::ApiError;
use crate::{
    geofile::{
        feature::{Feature, FeatureCollection, FeatureValidation},
        geojson::{export_filename, feature_collection_bytes, write_geojson_file},
    },
    store::shape_store::ShapeStore,
};

const INDEX_HTML: &str = include_str!("index.html");
const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// State shared by all request handlers.
pub struct AppState {
    pub store: ShapeStore,
    pub output_dir: PathBuf,
    pub validation: FeatureValidation,
}

impl AppState {
    pub fn new(output_dir: PathBuf, validation: FeatureValidation) -> Self {
        Self {
            store: ShapeStore::new(),
            output_dir,
            validation,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppendResponse {
    pub success: bool,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn list_polygons(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    Json(FeatureCollection::from(state.store.list()))
}

pub async fn add_polygon(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AppendResponse>, ApiError> {
    let body = body.map_err(|rejection| ApiError::UnreadableBody(rejection.body_text()))?;
    let feature: Feature = serde_json::from_slice(&body)
        .map_err(|err| ApiError::MalformedFeature(format!("invalid JSON: {}", err)))?;
    state
        .validation
        .check(&feature)
        .map_err(ApiError::MalformedFeature)?;

    let count = state.store.append(feature);
    log::info!("Stored polygon, {} in total", count);
    Ok(Json(AppendResponse {
        success: true,
        count,
    }))
}

pub async fn clear_polygons(State(state): State<Arc<AppState>>) -> Json<ClearResponse> {
    state.store.clear();
    log::info!("Cleared all polygons");
    Json(ClearResponse { success: true })
}

/// Write the current polygons to a timestamped file in the output dir and send it back as a
/// download.
pub async fn export_geojson(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let features = state.store.list();
    if features.is_empty() {
        return Err(ApiError::EmptyExport);
    }
    let num_features = features.len();
    let filename = export_filename(&chrono::Local::now());
    let output_dir = state.output_dir.clone();

    let write_result = {
        let filename = filename.clone();
        let output_dir = output_dir.clone();
        tokio::task::spawn_blocking(move || -> io::Result<(PathBuf, Vec<u8>)> {
            let contents = feature_collection_bytes(features)?;
            let output_filepath = write_geojson_file(&contents, &output_dir, &filename)?;
            Ok((output_filepath, contents))
        })
        .await
        .unwrap_or_else(|err| Err(io::Error::new(io::ErrorKind::Other, err)))
    };
    let (output_filepath, contents) = write_result.map_err(|source| ApiError::FileWrite {
        path: output_dir.join(&filename),
        source,
    })?;

    log::info!(
        "Exported {} polygons to {:?}",
        num_features,
        output_filepath
    );
    let headers = [
        (header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, contents).into_response())
}
