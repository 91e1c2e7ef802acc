//! DTOs de la API
//!
//! Respuestas serializadas y filtros de listado para autos y ventas.

pub mod auto_dto;
pub mod venta_dto;

/// Registros omitidos por defecto en los listados
pub const DEFAULT_SKIP: i64 = 0;

/// Tamaño de página por defecto en los listados
pub const DEFAULT_LIMIT: i64 = 100;

/// Tamaño de página máximo aceptado
pub const MAX_LIMIT: i64 = 1000;
