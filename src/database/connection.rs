//! Configuración de conexión a SQLite
//!
//! Este módulo crea el pool de conexiones, aplica las migraciones embebidas
//! y entrega los repositorios de autos y ventas.

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::repositories::{SqliteAutoRepository, SqliteVentaRepository};
use crate::utils::errors::AppResult;

/// Migraciones embebidas desde `migrations/`
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Handle principal de la base de datos
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Crear el pool de conexiones y aplicar las migraciones pendientes
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(url = %mask_database_url(&config.url), "Conectando a la base de datos");

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .foreign_keys(true)
            .create_if_missing(true);
        if !config.is_in_memory() {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await?;

        debug!(max_connections = config.max_connections, "Pool de conexiones creado");

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Base de datos en memoria, aislada por instancia
    pub async fn in_memory() -> AppResult<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Aplicar las migraciones pendientes (idempotente)
    pub async fn run_migrations(&self) -> AppResult<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("Tablas de la base de datos listas");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn autos(&self) -> SqliteAutoRepository {
        SqliteAutoRepository::new(self.pool.clone())
    }

    pub fn ventas(&self) -> SqliteVentaRepository {
        SqliteVentaRepository::new(self.pool.clone())
    }

    /// Verificar que la base responde
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Cerrar el pool al apagar el servidor
    pub async fn close(&self) {
        info!("Cerrando pool de conexiones");
        self.pool.close().await;
    }
}

/// Función helper para enmascarar credenciales de la URL en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(scheme_end) = url.find("://") {
            let protocol = &url[..scheme_end + 3];
            let host = &url[at_pos + 1..];
            return format!("{}***:***@{}", protocol, host);
        }
    }
    url.to_string()
}
