use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::auto_dto::AutoResponse;
use super::{DEFAULT_LIMIT, DEFAULT_SKIP, MAX_LIMIT};
use crate::models::{Auto, Venta};
use crate::utils::validation::{deserialize_fecha_opcional, validate_non_negative};

// Response de venta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentaResponse {
    pub id: i64,
    pub nombre_comprador: String,
    pub precio: f64,
    pub fecha_venta: DateTime<Utc>,
    pub auto_id: i64,
}

// Response de venta con la información del auto vendido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VentaWithAutoResponse {
    #[serde(flatten)]
    pub venta: VentaResponse,
    pub auto: AutoResponse,
}

/// Filtros para el listado de ventas
///
/// Todos los filtros enviados se combinan; los rangos son inclusivos.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_precio_bounds"))]
pub struct VentaFilters {
    #[validate(range(min = 0))]
    pub skip: Option<i64>,

    #[validate(range(min = 0, max = 1000))]
    pub limit: Option<i64>,

    pub min_precio: Option<f64>,
    pub max_precio: Option<f64>,

    /// Inicio del rango de fechas
    #[serde(default, deserialize_with = "deserialize_fecha_opcional")]
    pub fecha_inicio: Option<DateTime<Utc>>,

    /// Fin del rango de fechas
    #[serde(default, deserialize_with = "deserialize_fecha_opcional")]
    pub fecha_fin: Option<DateTime<Utc>>,
}

impl VentaFilters {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(DEFAULT_SKIP)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }
}

fn validate_precio_bounds(filters: &VentaFilters) -> Result<(), ValidationError> {
    for precio in [filters.min_precio, filters.max_precio].into_iter().flatten() {
        validate_non_negative(precio)?;
    }
    Ok(())
}

impl From<Venta> for VentaResponse {
    fn from(venta: Venta) -> Self {
        Self {
            id: venta.id,
            nombre_comprador: venta.nombre_comprador,
            precio: venta.precio,
            fecha_venta: venta.fecha_venta,
            auto_id: venta.auto_id,
        }
    }
}

impl VentaWithAutoResponse {
    pub fn new(venta: Venta, auto: Auto) -> Self {
        Self {
            venta: VentaResponse::from(venta),
            auto: AutoResponse::from(auto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_defaults() {
        let filters = VentaFilters::default();
        assert_eq!(filters.skip(), 0);
        assert_eq!(filters.limit(), 100);
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_negative_precio_bounds_rejected() {
        let filters = VentaFilters {
            min_precio: Some(-10.0),
            ..Default::default()
        };
        assert!(filters.validate().is_err());

        let filters = VentaFilters {
            min_precio: Some(0.0),
            max_precio: Some(20000.0),
            ..Default::default()
        };
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_with_auto_serializes_nested() {
        let venta = Venta {
            id: 2,
            nombre_comprador: "Ana".to_string(),
            precio: 12000.0,
            fecha_venta: Utc::now(),
            auto_id: 7,
        };
        let auto = Auto {
            id: 7,
            marca: "Ford".to_string(),
            modelo: "Ka".to_string(),
            anio: 2010,
            numero_chasis: "KA2010".to_string(),
        };

        let value = serde_json::to_value(VentaWithAutoResponse::new(venta, auto)).unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["auto"]["id"], 7);
        assert_eq!(value["auto"]["modelo"], "Ka");
    }
}
