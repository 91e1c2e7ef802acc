//! Repositorios de acceso a datos
//!
//! Los contratos `AutoRepository` y `VentaRepository` tienen una única
//! implementación sobre SQLite. Toda escritura corre dentro de una
//! transacción que se revierte ante cualquier error.

pub mod auto_repository;
pub mod venta_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};
use tracing::warn;

use crate::models::{Auto, AutoCreate, AutoUpdate, Venta, VentaCreate, VentaUpdate};
use crate::utils::errors::{write_error, AppResult};

pub use auto_repository::SqliteAutoRepository;
pub use venta_repository::SqliteVentaRepository;

/// Operaciones de persistencia de autos
#[async_trait]
pub trait AutoRepository: Send + Sync {
    /// Falla con `Integrity` si el número de chasis ya existe.
    async fn create(&self, auto: AutoCreate) -> AppResult<Auto>;

    /// Falla con `NotFound` si no existe.
    async fn get_by_id(&self, id: i64) -> AppResult<Auto>;

    /// Página de autos; `marca` y `modelo` filtran por coincidencia parcial
    /// sin distinguir mayúsculas.
    async fn get_all(
        &self,
        skip: i64,
        limit: i64,
        marca: Option<String>,
        modelo: Option<String>,
    ) -> AppResult<Vec<Auto>>;

    /// Aplica solo los campos enviados. Revalida la unicidad del chasis
    /// únicamente si cambia.
    async fn update(&self, id: i64, update: AutoUpdate) -> AppResult<Auto>;

    /// `false` si no existe. Elimina también las ventas del auto.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn get_by_chasis(&self, numero_chasis: &str) -> AppResult<Option<Auto>>;
}

/// Operaciones de persistencia de ventas
#[async_trait]
pub trait VentaRepository: Send + Sync {
    /// Falla con `NotFound` si el `auto_id` no existe; no se guarda nada.
    async fn create(&self, venta: VentaCreate) -> AppResult<Venta>;

    async fn get_by_id(&self, id: i64) -> AppResult<Venta>;

    /// Página de ventas; los filtros enviados se combinan y son inclusivos.
    async fn get_all(
        &self,
        skip: i64,
        limit: i64,
        min_precio: Option<f64>,
        max_precio: Option<f64>,
        fecha_inicio: Option<DateTime<Utc>>,
        fecha_fin: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Venta>>;

    async fn update(&self, id: i64, update: VentaUpdate) -> AppResult<Venta>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn get_by_auto_id(&self, auto_id: i64) -> AppResult<Vec<Venta>>;

    async fn get_by_comprador(&self, nombre: &str) -> AppResult<Vec<Venta>>;
}

/// Forma normalizada de un texto para búsquedas sin distinguir mayúsculas
///
/// Se pliega en Rust porque `LOWER` de SQLite solo convierte ASCII.
pub(crate) fn texto_busqueda(texto: &str) -> String {
    texto.to_lowercase()
}

/// Confirmar la transacción si la operación tuvo éxito, revertirla si no
pub(crate) async fn finish<T>(
    tx: Transaction<'static, Sqlite>,
    result: AppResult<T>,
    operation: &str,
) -> AppResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(|e| write_error(operation, e))?;
            Ok(value)
        }
        Err(error) => {
            if let Err(e) = tx.rollback().await {
                warn!(operation = %operation, error = %e, "Rollback fallido");
            }
            Err(error)
        }
    }
}
