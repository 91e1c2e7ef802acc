use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::auto_dto::{AutoFilters, AutoResponse, AutoWithVentasResponse};
use crate::models::{AutoCreate, AutoUpdate};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_autos_router() -> Router<AppState> {
    Router::new()
        .route("/autos", get(list_autos).post(create_auto))
        .route("/autos/", get(list_autos).post(create_auto))
        .route("/autos/chasis/:numero_chasis", get(get_auto_by_chasis))
        .route(
            "/autos/:id",
            get(get_auto).put(update_auto).delete(delete_auto),
        )
        .route("/autos/:id/with-ventas", get(get_auto_with_ventas))
}

async fn create_auto(
    State(state): State<AppState>,
    Json(request): Json<AutoCreate>,
) -> Result<(StatusCode, Json<AutoResponse>), AppError> {
    let response = state.auto_controller().create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_autos(
    State(state): State<AppState>,
    Query(filters): Query<AutoFilters>,
) -> Result<Json<Vec<AutoResponse>>, AppError> {
    let response = state.auto_controller().list(filters).await?;
    Ok(Json(response))
}

async fn get_auto(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AutoResponse>, AppError> {
    let response = state.auto_controller().get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_auto(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AutoUpdate>,
) -> Result<Json<AutoResponse>, AppError> {
    let response = state.auto_controller().update(id, request).await?;
    Ok(Json(response))
}

async fn delete_auto(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.auto_controller().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_auto_by_chasis(
    State(state): State<AppState>,
    Path(numero_chasis): Path<String>,
) -> Result<Json<AutoResponse>, AppError> {
    let response = state.auto_controller().get_by_chasis(&numero_chasis).await?;
    Ok(Json(response))
}

async fn get_auto_with_ventas(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AutoWithVentasResponse>, AppError> {
    let response = state.auto_controller().get_with_ventas(id).await?;
    Ok(Json(response))
}
