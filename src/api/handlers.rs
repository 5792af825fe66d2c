use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::MovieRecord, services::ViewState,
};

use super::{views, AppState};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub query: String,
    pub view: ViewState,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub loaded: bool,
    pub movies: Vec<MovieRecord>,
}

fn snapshot(state: &AppState) -> StateResponse {
    StateResponse {
        query: state.controller.query(),
        view: state.controller.view_state(),
    }
}

fn render(state: &AppState) -> AppResult<Html<String>> {
    let page = views::render_page(
        &state.controller.query(),
        &state.controller.view_state(),
        state.recommendations.get(),
        &state.imdb_title_url,
    )?;
    Ok(Html(page))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Renders the interface for the current state
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state)
}

/// Search form submission
pub async fn search_form(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<QueryRequest>,
) -> AppResult<Html<String>> {
    tracing::info!(request_id = %request_id, query = %form.query, "Search submitted");

    state.controller.set_query(form.query);
    state.controller.submit_search().await;
    render(&state)
}

/// Recommendation tile click
pub async fn select_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(imdb_id): Path<String>,
) -> AppResult<Html<String>> {
    tracing::info!(request_id = %request_id, imdb_id = %imdb_id, "Recommendation selected");

    state.controller.lookup_by_id(&imdb_id).await;
    render(&state)
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(snapshot(&state))
}

/// Updates the query without searching
pub async fn set_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<StateResponse> {
    state.controller.set_query(request.query);
    Json(snapshot(&state))
}

pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<QueryRequest>,
) -> Json<StateResponse> {
    tracing::info!(request_id = %request_id, query = %request.query, "Search requested");

    state.controller.set_query(request.query);
    state.controller.submit_search().await;
    Json(snapshot(&state))
}

pub async fn select(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(imdb_id): Path<String>,
) -> Json<StateResponse> {
    tracing::info!(request_id = %request_id, imdb_id = %imdb_id, "Detail requested");

    state.controller.lookup_by_id(&imdb_id).await;
    Json(snapshot(&state))
}

pub async fn get_recommendations(State(state): State<AppState>) -> Json<RecommendationsResponse> {
    Json(RecommendationsResponse {
        loaded: state.recommendations.is_loaded(),
        movies: state.recommendations.get().to_vec(),
    })
}
