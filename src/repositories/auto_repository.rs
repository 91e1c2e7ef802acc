use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::{finish, texto_busqueda, AutoRepository};
use crate::models::{Auto, AutoCreate, AutoUpdate};
use crate::utils::errors::{chasis_duplicado_error, not_found_error, write_error, AppResult};

const AUTO_COLUMNS: &str = "id, marca, modelo, anio, numero_chasis";

pub struct SqliteAutoRepository {
    pool: SqlitePool,
}

impl SqliteAutoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Auto>, sqlx::Error> {
    sqlx::query_as::<_, Auto>(&format!("SELECT {} FROM auto WHERE id = ?1", AUTO_COLUMNS))
        .bind(id)
        .fetch_optional(conn)
        .await
}

async fn find_by_chasis(
    conn: &mut SqliteConnection,
    numero_chasis: &str,
) -> Result<Option<Auto>, sqlx::Error> {
    sqlx::query_as::<_, Auto>(&format!(
        "SELECT {} FROM auto WHERE numero_chasis = ?1",
        AUTO_COLUMNS
    ))
    .bind(numero_chasis)
    .fetch_optional(conn)
    .await
}

async fn insert_auto(conn: &mut SqliteConnection, auto: &AutoCreate) -> AppResult<Auto> {
    let existing = find_by_chasis(&mut *conn, &auto.numero_chasis)
        .await
        .map_err(|e| write_error("crear el auto", e))?;
    if existing.is_some() {
        return Err(chasis_duplicado_error(&auto.numero_chasis));
    }

    sqlx::query_as::<_, Auto>(&format!(
        r#"
        INSERT INTO auto (marca, modelo, anio, numero_chasis, marca_busqueda, modelo_busqueda)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING {}
        "#,
        AUTO_COLUMNS
    ))
    .bind(&auto.marca)
    .bind(&auto.modelo)
    .bind(auto.anio)
    .bind(&auto.numero_chasis)
    .bind(texto_busqueda(&auto.marca))
    .bind(texto_busqueda(&auto.modelo))
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| write_error("crear el auto", e))
}

async fn update_auto(
    conn: &mut SqliteConnection,
    id: i64,
    update: &AutoUpdate,
) -> AppResult<Auto> {
    let mut auto = find_by_id(&mut *conn, id)
        .await
        .map_err(|e| write_error("actualizar el auto", e))?
        .ok_or_else(|| not_found_error("Auto", id))?;

    if let Some(numero_chasis) = update.chasis_change(&auto) {
        let taken = find_by_chasis(&mut *conn, numero_chasis)
            .await
            .map_err(|e| write_error("actualizar el auto", e))?;
        if taken.is_some() {
            return Err(chasis_duplicado_error(numero_chasis));
        }
    }

    update.apply_to(&mut auto);

    sqlx::query_as::<_, Auto>(&format!(
        r#"
        UPDATE auto
        SET marca = ?2, modelo = ?3, anio = ?4, numero_chasis = ?5,
            marca_busqueda = ?6, modelo_busqueda = ?7
        WHERE id = ?1
        RETURNING {}
        "#,
        AUTO_COLUMNS
    ))
    .bind(auto.id)
    .bind(&auto.marca)
    .bind(&auto.modelo)
    .bind(auto.anio)
    .bind(&auto.numero_chasis)
    .bind(texto_busqueda(&auto.marca))
    .bind(texto_busqueda(&auto.modelo))
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| write_error("actualizar el auto", e))
}

// Borrado en cascada explícito: primero las ventas, luego el auto
async fn delete_auto(conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
    let exists = find_by_id(&mut *conn, id)
        .await
        .map_err(|e| write_error("eliminar el auto", e))?
        .is_some();
    if !exists {
        return Ok(false);
    }

    let ventas = sqlx::query("DELETE FROM venta WHERE auto_id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error("eliminar el auto", e))?;

    sqlx::query("DELETE FROM auto WHERE id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(|e| write_error("eliminar el auto", e))?;

    debug!(id, ventas = ventas.rows_affected(), "Ventas eliminadas en cascada");
    Ok(true)
}

#[async_trait]
impl AutoRepository for SqliteAutoRepository {
    async fn create(&self, auto: AutoCreate) -> AppResult<Auto> {
        debug!(numero_chasis = %auto.numero_chasis, "Creando auto");

        let mut tx = self.pool.begin().await?;
        let result = insert_auto(&mut tx, &auto).await;
        let created = finish(tx, result, "crear el auto").await?;

        info!(id = created.id, numero_chasis = %created.numero_chasis, "Auto creado");
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Auto> {
        let mut conn = self.pool.acquire().await?;
        find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found_error("Auto", id))
    }

    async fn get_all(
        &self,
        skip: i64,
        limit: i64,
        marca: Option<String>,
        modelo: Option<String>,
    ) -> AppResult<Vec<Auto>> {
        debug!(skip, limit, ?marca, ?modelo, "Listando autos");

        let autos = sqlx::query_as::<_, Auto>(&format!(
            r#"
            SELECT {}
            FROM auto
            WHERE (?1 IS NULL OR instr(marca_busqueda, ?1) > 0)
              AND (?2 IS NULL OR instr(modelo_busqueda, ?2) > 0)
            ORDER BY id
            LIMIT ?3 OFFSET ?4
            "#,
            AUTO_COLUMNS
        ))
        .bind(marca.as_deref().map(texto_busqueda))
        .bind(modelo.as_deref().map(texto_busqueda))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(autos)
    }

    async fn update(&self, id: i64, update: AutoUpdate) -> AppResult<Auto> {
        debug!(id, "Actualizando auto");

        let mut tx = self.pool.begin().await?;
        let result = update_auto(&mut tx, id, &update).await;
        let updated = finish(tx, result, "actualizar el auto").await?;

        info!(id, "Auto actualizado");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let result = delete_auto(&mut tx, id).await;
        let deleted = finish(tx, result, "eliminar el auto").await?;

        if deleted {
            info!(id, "Auto eliminado");
        }
        Ok(deleted)
    }

    async fn get_by_chasis(&self, numero_chasis: &str) -> AppResult<Option<Auto>> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_by_chasis(&mut conn, numero_chasis).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::utils::errors::AppError;

    async fn repo() -> SqliteAutoRepository {
        let db = Database::in_memory().await.unwrap();
        SqliteAutoRepository::new(db.pool().clone())
    }

    fn nuevo(marca: &str, modelo: &str, chasis: &str) -> AutoCreate {
        AutoCreate {
            marca: marca.to_string(),
            modelo: modelo.to_string(),
            anio: 2020,
            numero_chasis: chasis.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = repo().await;
        let auto = repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();

        assert!(auto.id > 0);
        assert_eq!(auto.marca, "Toyota");
        assert_eq!(repo.get_by_id(auto.id).await.unwrap(), auto);
    }

    #[tokio::test]
    async fn test_duplicate_chasis_is_rejected_and_store_unchanged() {
        let repo = repo().await;
        repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();

        let err = repo
            .create(nuevo("Honda", "Civic", "ABC123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Integrity(_)));

        let all = repo.get_all(0, 100, None, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].marca, "Toyota");
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let repo = repo().await;
        let err = repo.get_by_id(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_all_filters_case_insensitive() {
        let repo = repo().await;
        repo.create(nuevo("Toyota", "Corolla", "T1")).await.unwrap();
        repo.create(nuevo("Toyota", "Hilux", "T2")).await.unwrap();
        repo.create(nuevo("Ford", "Focus", "F1")).await.unwrap();

        let toyotas = repo
            .get_all(0, 100, Some("toy".to_string()), None)
            .await
            .unwrap();
        assert_eq!(toyotas.len(), 2);

        let hilux = repo
            .get_all(0, 100, Some("TOYOTA".to_string()), Some("lux".to_string()))
            .await
            .unwrap();
        assert_eq!(hilux.len(), 1);
        assert_eq!(hilux[0].numero_chasis, "T2");

        let none = repo
            .get_all(0, 100, Some("fiat".to_string()), None)
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_all_filters_fold_accented_letters() {
        let repo = repo().await;
        repo.create(nuevo("Škoda", "Octavia", "SK1")).await.unwrap();
        repo.create(nuevo("CITROËN", "ÉLYSÉE", "CI1")).await.unwrap();

        let skoda = repo
            .get_all(0, 100, Some("škoda".to_string()), None)
            .await
            .unwrap();
        assert_eq!(skoda.len(), 1);
        assert_eq!(skoda[0].marca, "Škoda");

        let citroen = repo
            .get_all(0, 100, Some("citroë".to_string()), Some("élysée".to_string()))
            .await
            .unwrap();
        assert_eq!(citroen.len(), 1);
        assert_eq!(citroen[0].numero_chasis, "CI1");
    }

    #[tokio::test]
    async fn test_update_refreshes_search_text() {
        let repo = repo().await;
        let auto = repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();

        repo.update(
            auto.id,
            AutoUpdate {
                marca: Some("ŠKODA".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let found = repo
            .get_all(0, 100, Some("škoda".to_string()), None)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(repo
            .get_all(0, 100, Some("toyota".to_string()), None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_get_all_paginates() {
        let repo = repo().await;
        for i in 0..5 {
            repo.create(nuevo("Fiat", "Uno", &format!("UNO{}", i)))
                .await
                .unwrap();
        }

        let page = repo.get_all(1, 2, None, None).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].numero_chasis, "UNO1");
        assert_eq!(page[1].numero_chasis, "UNO2");

        let tail = repo.get_all(4, 100, None, None).await.unwrap();
        assert_eq!(tail.len(), 1);
    }

    #[tokio::test]
    async fn test_update_without_chasis_keeps_it() {
        let repo = repo().await;
        let auto = repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();

        let updated = repo
            .update(
                auto.id,
                AutoUpdate {
                    modelo: Some("Yaris".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.modelo, "Yaris");
        assert_eq!(updated.numero_chasis, "ABC123");
        assert_eq!(updated.marca, "Toyota");
        assert_eq!(updated.anio, 2020);
    }

    #[tokio::test]
    async fn test_update_with_same_chasis_is_not_a_conflict() {
        let repo = repo().await;
        let auto = repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();

        let updated = repo
            .update(
                auto.id,
                AutoUpdate {
                    numero_chasis: Some("ABC123".to_string()),
                    anio: Some(2021),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.anio, 2021);
    }

    #[tokio::test]
    async fn test_update_to_taken_chasis_is_rejected() {
        let repo = repo().await;
        repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();
        let other = repo.create(nuevo("Ford", "Focus", "XYZ789")).await.unwrap();

        let err = repo
            .update(
                other.id,
                AutoUpdate {
                    numero_chasis: Some("ABC123".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Integrity(_)));

        let unchanged = repo.get_by_id(other.id).await.unwrap();
        assert_eq!(unchanged.numero_chasis, "XYZ789");
    }

    #[tokio::test]
    async fn test_update_missing_auto() {
        let repo = repo().await;
        let err = repo.update(77, AutoUpdate::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_false_when_missing() {
        let repo = repo().await;
        assert!(!repo.delete(1).await.unwrap());

        let auto = repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();
        assert!(repo.delete(auto.id).await.unwrap());
        assert!(!repo.delete(auto.id).await.unwrap());
        assert!(repo.get_by_chasis("ABC123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_chasis_exact_match() {
        let repo = repo().await;
        let auto = repo.create(nuevo("Toyota", "Corolla", "ABC123")).await.unwrap();

        assert_eq!(repo.get_by_chasis("ABC123").await.unwrap(), Some(auto));
        assert!(repo.get_by_chasis("ABC12").await.unwrap().is_none());
        assert!(repo.get_by_chasis("abc123").await.unwrap().is_none());
    }
}
