use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::venta_dto::{VentaFilters, VentaResponse, VentaWithAutoResponse};
use crate::models::{VentaCreate, VentaUpdate};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ventas_router() -> Router<AppState> {
    Router::new()
        .route("/ventas", get(list_ventas).post(create_venta))
        .route("/ventas/", get(list_ventas).post(create_venta))
        .route("/ventas/auto/:auto_id", get(list_ventas_by_auto))
        .route("/ventas/comprador/:nombre", get(list_ventas_by_comprador))
        .route(
            "/ventas/:id",
            get(get_venta).put(update_venta).delete(delete_venta),
        )
        .route("/ventas/:id/with-auto", get(get_venta_with_auto))
}

async fn create_venta(
    State(state): State<AppState>,
    Json(request): Json<VentaCreate>,
) -> Result<(StatusCode, Json<VentaResponse>), AppError> {
    let response = state.venta_controller().create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_ventas(
    State(state): State<AppState>,
    Query(filters): Query<VentaFilters>,
) -> Result<Json<Vec<VentaResponse>>, AppError> {
    let response = state.venta_controller().list(filters).await?;
    Ok(Json(response))
}

async fn get_venta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VentaResponse>, AppError> {
    let response = state.venta_controller().get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_venta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<VentaUpdate>,
) -> Result<Json<VentaResponse>, AppError> {
    let response = state.venta_controller().update(id, request).await?;
    Ok(Json(response))
}

async fn delete_venta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.venta_controller().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_ventas_by_auto(
    State(state): State<AppState>,
    Path(auto_id): Path<i64>,
) -> Result<Json<Vec<VentaResponse>>, AppError> {
    let response = state.venta_controller().list_by_auto(auto_id).await?;
    Ok(Json(response))
}

async fn list_ventas_by_comprador(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<Json<Vec<VentaResponse>>, AppError> {
    let response = state.venta_controller().list_by_comprador(&nombre).await?;
    Ok(Json(response))
}

async fn get_venta_with_auto(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VentaWithAutoResponse>, AppError> {
    let response = state.venta_controller().get_with_auto(id).await?;
    Ok(Json(response))
}
