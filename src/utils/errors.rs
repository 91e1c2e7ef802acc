//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Error de base de datos: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Error de migración: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Error de validación: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("No encontrado: {0}")]
    NotFound(String),

    /// Violación de unicidad, de integridad referencial o fallo al escribir
    #[error("Error de integridad: {0}")]
    Integrity(String),

    #[error("Error interno del servidor: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!(error = %e, "Error de base de datos");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Error de base de datos".to_string(),
                        message: "Ocurrió un error al acceder a la base de datos".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Migration(e) => {
                error!(error = %e, "Error de migración");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Error de migración".to_string(),
                        message: "No se pudo preparar el esquema de la base de datos".to_string(),
                        details: Some(json!({ "migration_error": e.to_string() })),
                        code: Some("MIGRATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                warn!(error = %e, "Error de validación");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Error de validación".to_string(),
                        message: "Los datos enviados no son válidos".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                warn!(message = %msg, "Recurso no encontrado");
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "No encontrado".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Integrity(msg) => {
                warn!(message = %msg, "Error de integridad");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse {
                        error: "Error de integridad".to_string(),
                        message: msg,
                        details: None,
                        code: Some("INTEGRITY_ERROR".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                error!(message = %msg, "Error interno");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Error interno del servidor".to_string(),
                        message: "Ocurrió un error inesperado".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} con ID {} no encontrado", resource, id))
}

/// Función helper para crear errores de chasis duplicado
pub fn chasis_duplicado_error(numero_chasis: &str) -> AppError {
    AppError::Integrity(format!(
        "Ya existe un auto con el número de chasis: {}",
        numero_chasis
    ))
}

/// Función helper para envolver un fallo de escritura en la base de datos
pub fn write_error(operation: &str, e: sqlx::Error) -> AppError {
    AppError::Integrity(format!("Error al {}: {}", operation, e))
}
