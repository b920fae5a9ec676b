use axum::{routing::post, Json, Router};
use observatory::views::{
    inferences::{inference_rows, InferenceByIdRow, InferencesTable},
    tags::{tag_rows, TagsTable},
};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct TagsRequest {
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct InferencesRequest {
    #[serde(default)]
    inferences: Vec<InferenceByIdRow>,
}

async fn tags_handler(Json(request): Json<TagsRequest>) -> Json<TagsTable> {
    Json(tag_rows(&request.tags))
}

async fn inferences_handler(Json(request): Json<InferencesRequest>) -> Json<InferencesTable> {
    Json(inference_rows(&request.inferences))
}

pub fn routes() -> Router {
    Router::new()
        .route("/views/tags", post(tags_handler))
        .route("/views/inferences", post(inferences_handler))
}
