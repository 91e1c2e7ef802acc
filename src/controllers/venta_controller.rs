use validator::Validate;

use crate::dto::venta_dto::{VentaFilters, VentaResponse, VentaWithAutoResponse};
use crate::models::{VentaCreate, VentaUpdate};
use crate::repositories::{AutoRepository, VentaRepository};
use crate::utils::errors::{AppError, AppResult};

pub struct VentaController<V, A> {
    ventas: V,
    autos: A,
}

impl<V: VentaRepository, A: AutoRepository> VentaController<V, A> {
    pub fn new(ventas: V, autos: A) -> Self {
        Self { ventas, autos }
    }

    pub async fn create(&self, request: VentaCreate) -> AppResult<VentaResponse> {
        request.validate()?;
        let venta = self.ventas.create(request).await?;
        Ok(VentaResponse::from(venta))
    }

    pub async fn list(&self, filters: VentaFilters) -> AppResult<Vec<VentaResponse>> {
        filters.validate()?;
        let ventas = self
            .ventas
            .get_all(
                filters.skip(),
                filters.limit(),
                filters.min_precio,
                filters.max_precio,
                filters.fecha_inicio,
                filters.fecha_fin,
            )
            .await?;
        Ok(ventas.into_iter().map(VentaResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VentaResponse> {
        let venta = self.ventas.get_by_id(id).await?;
        Ok(VentaResponse::from(venta))
    }

    pub async fn update(&self, id: i64, request: VentaUpdate) -> AppResult<VentaResponse> {
        request.validate()?;
        let venta = self.ventas.update(id, request).await?;
        Ok(VentaResponse::from(venta))
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.ventas.delete(id).await? {
            return Err(AppError::NotFound(format!(
                "Venta con ID {} no encontrada para eliminar",
                id
            )));
        }
        Ok(())
    }

    pub async fn list_by_auto(&self, auto_id: i64) -> AppResult<Vec<VentaResponse>> {
        let ventas = self.ventas.get_by_auto_id(auto_id).await?;
        Ok(ventas.into_iter().map(VentaResponse::from).collect())
    }

    pub async fn list_by_comprador(&self, nombre: &str) -> AppResult<Vec<VentaResponse>> {
        let ventas = self.ventas.get_by_comprador(nombre).await?;
        Ok(ventas.into_iter().map(VentaResponse::from).collect())
    }

    /// Venta junto con la información completa del auto vendido
    pub async fn get_with_auto(&self, id: i64) -> AppResult<VentaWithAutoResponse> {
        let venta = self.ventas.get_by_id(id).await?;
        let auto = self.autos.get_by_id(venta.auto_id).await?;
        Ok(VentaWithAutoResponse::new(venta, auto))
    }
}
