use serde::{Deserialize, Serialize};
use validator::Validate;

use super::venta_dto::VentaResponse;
use super::{DEFAULT_LIMIT, DEFAULT_SKIP, MAX_LIMIT};
use crate::models::{Auto, Venta};

// Response de auto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoResponse {
    pub id: i64,
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub numero_chasis: String,
}

// Response de auto con su historial de ventas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoWithVentasResponse {
    #[serde(flatten)]
    pub auto: AutoResponse,
    pub ventas: Vec<VentaResponse>,
}

/// Filtros para el listado de autos
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AutoFilters {
    #[validate(range(min = 0))]
    pub skip: Option<i64>,

    #[validate(range(min = 0, max = 1000))]
    pub limit: Option<i64>,

    /// Búsqueda parcial por marca
    pub marca: Option<String>,

    /// Búsqueda parcial por modelo
    pub modelo: Option<String>,
}

impl AutoFilters {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(DEFAULT_SKIP)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }
}

impl From<Auto> for AutoResponse {
    fn from(auto: Auto) -> Self {
        Self {
            id: auto.id,
            marca: auto.marca,
            modelo: auto.modelo,
            anio: auto.anio,
            numero_chasis: auto.numero_chasis,
        }
    }
}

impl AutoWithVentasResponse {
    pub fn new(auto: Auto, ventas: Vec<Venta>) -> Self {
        Self {
            auto: AutoResponse::from(auto),
            ventas: ventas.into_iter().map(VentaResponse::from).collect(),
        }
    }
}
