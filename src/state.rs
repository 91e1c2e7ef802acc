//! Estado compartido de la aplicación
//!
//! Este módulo define el estado que se pasa a través del router de Axum.

use crate::config::EnvironmentConfig;
use crate::controllers::{AutoController, VentaController};
use crate::database::Database;
use crate::repositories::{SqliteAutoRepository, SqliteVentaRepository};

#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(database: Database, config: EnvironmentConfig) -> Self {
        Self { database, config }
    }

    pub fn auto_controller(&self) -> AutoController<SqliteAutoRepository, SqliteVentaRepository> {
        AutoController::new(self.database.autos(), self.database.ventas())
    }

    pub fn venta_controller(&self) -> VentaController<SqliteVentaRepository, SqliteAutoRepository> {
        VentaController::new(self.database.ventas(), self.database.autos())
    }
}
