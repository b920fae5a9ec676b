use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use observatory::models::message::{Input, ModelInferenceInput, ResolvedInput};

async fn resolve_input(
    State(state): State<AppState>,
    Json(input): Json<Input>,
) -> Json<ResolvedInput> {
    tracing::debug!(messages = input.messages.len(), "resolving input");
    Json(state.resolver.resolve_input(input).await)
}

async fn resolve_model_inference_input(
    State(state): State<AppState>,
    Json(input): Json<ModelInferenceInput>,
) -> Json<ResolvedInput> {
    tracing::debug!(
        messages = input.messages.len(),
        "resolving model inference input"
    );
    Json(state.resolver.resolve_model_inference_input(input).await)
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/resolve/input", post(resolve_input))
        .route(
            "/resolve/model_inference_input",
            post(resolve_model_inference_input),
        )
        .with_state(state)
}
