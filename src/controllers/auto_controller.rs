use validator::Validate;

use crate::dto::auto_dto::{AutoFilters, AutoResponse, AutoWithVentasResponse};
use crate::models::{AutoCreate, AutoUpdate};
use crate::repositories::{AutoRepository, VentaRepository};
use crate::utils::errors::{AppError, AppResult};

pub struct AutoController<A, V> {
    autos: A,
    ventas: V,
}

impl<A: AutoRepository, V: VentaRepository> AutoController<A, V> {
    pub fn new(autos: A, ventas: V) -> Self {
        Self { autos, ventas }
    }

    pub async fn create(&self, request: AutoCreate) -> AppResult<AutoResponse> {
        request.validate()?;
        let auto = self.autos.create(request).await?;
        Ok(AutoResponse::from(auto))
    }

    pub async fn list(&self, filters: AutoFilters) -> AppResult<Vec<AutoResponse>> {
        filters.validate()?;
        let skip = filters.skip();
        let limit = filters.limit();
        let autos = self
            .autos
            .get_all(skip, limit, filters.marca, filters.modelo)
            .await?;
        Ok(autos.into_iter().map(AutoResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<AutoResponse> {
        let auto = self.autos.get_by_id(id).await?;
        Ok(AutoResponse::from(auto))
    }

    pub async fn update(&self, id: i64, request: AutoUpdate) -> AppResult<AutoResponse> {
        request.validate()?;
        let auto = self.autos.update(id, request).await?;
        Ok(AutoResponse::from(auto))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.autos.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Auto con ID {} no encontrado para eliminar",
                id
            )));
        }
        Ok(())
    }

    pub async fn get_by_chasis(&self, numero_chasis: &str) -> AppResult<AutoResponse> {
        let auto = self
            .autos
            .get_by_chasis(numero_chasis)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Auto con chasis {} no encontrado", numero_chasis))
            })?;
        Ok(AutoResponse::from(auto))
    }

    /// Auto junto con su historial completo de ventas
    pub async fn get_with_ventas(&self, id: i64) -> AppResult<AutoWithVentasResponse> {
        let auto = self.autos.get_by_id(id).await?;
        let ventas = self.ventas.get_by_auto_id(auto.id).await?;
        Ok(AutoWithVentasResponse::new(auto, ventas))
    }
}
