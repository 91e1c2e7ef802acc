use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::auto_repository::find_by_id as find_auto_by_id;
use super::{finish, texto_busqueda, VentaRepository};
use crate::models::{Venta, VentaCreate, VentaUpdate};
use crate::utils::errors::{write_error, AppError, AppResult};

const VENTA_COLUMNS: &str = "id, nombre_comprador, precio, fecha_venta, auto_id";

pub struct SqliteVentaRepository {
    pool: SqlitePool,
}

impl SqliteVentaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn venta_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Venta con ID {} no encontrada", id))
}

async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Venta>, sqlx::Error> {
    sqlx::query_as::<_, Venta>(&format!("SELECT {} FROM venta WHERE id = ?1", VENTA_COLUMNS))
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn insert_venta(conn: &mut SqliteConnection, venta: &VentaCreate) -> AppResult<Venta> {
    let auto = find_auto_by_id(&mut *conn, venta.auto_id)
        .await
        .map_err(|e| write_error("crear la venta", e))?;
    if auto.is_none() {
        return Err(AppError::NotFound(format!(
            "No se puede crear la venta: Auto con ID {} no encontrado.",
            venta.auto_id
        )));
    }

    let fecha_venta = venta.fecha_venta.unwrap_or_else(Utc::now);

    sqlx::query_as::<_, Venta>(&format!(
        r#"
        INSERT INTO venta (nombre_comprador, precio, fecha_venta, auto_id, nombre_comprador_busqueda)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING {}
        "#,
        VENTA_COLUMNS
    ))
    .bind(&venta.nombre_comprador)
    .bind(venta.precio)
    .bind(fecha_venta)
    .bind(venta.auto_id)
    .bind(texto_busqueda(&venta.nombre_comprador))
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| write_error("crear la venta", e))
}

async fn update_venta(
    conn: &mut SqliteConnection,
    id: i64,
    update: &VentaUpdate,
) -> AppResult<Venta> {
    let mut venta = find_by_id(&mut *conn, id)
        .await
        .map_err(|e| write_error("actualizar la venta", e))?
        .ok_or_else(|| venta_not_found(id))?;

    update.apply_to(&mut venta);

    sqlx::query_as::<_, Venta>(&format!(
        r#"
        UPDATE venta
        SET nombre_comprador = ?2, precio = ?3, fecha_venta = ?4,
            nombre_comprador_busqueda = ?5
        WHERE id = ?1
        RETURNING {}
        "#,
        VENTA_COLUMNS
    ))
    .bind(venta.id)
    .bind(&venta.nombre_comprador)
    .bind(venta.precio)
    .bind(venta.fecha_venta)
    .bind(texto_busqueda(&venta.nombre_comprador))
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| write_error("actualizar la venta", e))
}

async fn delete_venta(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM venta WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error("eliminar la venta", e))?;

    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl VentaRepository for SqliteVentaRepository {
    async fn create(&self, venta: VentaCreate) -> AppResult<Venta> {
        debug!(auto_id = venta.auto_id, "Registrando venta");

        let mut tx = self.pool.begin().await?;
        let result = insert_venta(&mut tx, &venta).await;
        let created = finish(tx, result, "crear la venta").await?;

        info!(id = created.id, auto_id = created.auto_id, "Venta registrada");
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Venta> {
        let mut conn = self.pool.acquire().await?;
        find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| venta_not_found(id))
    }

    async fn get_all(
        &self,
        skip: i64,
        limit: i64,
        min_precio: Option<f64>,
        max_precio: Option<f64>,
        fecha_inicio: Option<DateTime<Utc>>,
        fecha_fin: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Venta>> {
        debug!(
            skip,
            limit,
            ?min_precio,
            ?max_precio,
            ?fecha_inicio,
            ?fecha_fin,
            "Listando ventas"
        );

        let ventas = sqlx::query_as::<_, Venta>(&format!(
            r#"
            SELECT {}
            FROM venta
            WHERE (?1 IS NULL OR precio >= ?1)
              AND (?2 IS NULL OR precio <= ?2)
              AND (?3 IS NULL OR fecha_venta >= ?3)
              AND (?4 IS NULL OR fecha_venta <= ?4)
            ORDER BY id
            LIMIT ?5 OFFSET ?6
            "#,
            VENTA_COLUMNS
        ))
        .bind(min_precio)
        .bind(max_precio)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(ventas)
    }

    async fn update(&self, id: i64, update: VentaUpdate) -> AppResult<Venta> {
        debug!(id, "Actualizando venta");

        let mut tx = self.pool.begin().await?;
        let result = update_venta(&mut tx, id, &update).await;
        let updated = finish(tx, result, "actualizar la venta").await?;

        info!(id, "Venta actualizada");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let result = delete_venta(&mut tx, id).await;
        let deleted = finish(tx, result, "eliminar la venta").await?;

        if deleted {
            info!(id, "Venta eliminada");
        }
        Ok(deleted)
    }

    async fn get_by_auto_id(&self, auto_id: i64) -> AppResult<Vec<Venta>> {
        let ventas = sqlx::query_as::<_, Venta>(&format!(
            "SELECT {} FROM venta WHERE auto_id = ?1 ORDER BY id",
            VENTA_COLUMNS
        ))
        .bind(auto_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ventas)
    }

    async fn get_by_comprador(&self, nombre: &str) -> AppResult<Vec<Venta>> {
        let ventas = sqlx::query_as::<_, Venta>(&format!(
            r#"
            SELECT {}
            FROM venta
            WHERE instr(nombre_comprador_busqueda, ?1) > 0
            ORDER BY id
            "#,
            VENTA_COLUMNS
        ))
        .bind(texto_busqueda(nombre))
        .fetch_all(&self.pool)
        .await?;

        Ok(ventas)
    }
}
