//! Modelo de Venta
//!
//! Una venta pertenece a exactamente un auto (`auto_id`) y se elimina
//! junto con él.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::utils::validation::{
    deserialize_fecha_opcional, validate_not_empty, validate_not_future, validate_positive,
};

/// Venta principal - mapea exactamente a la tabla venta
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Venta {
    pub id: i64,
    pub nombre_comprador: String,
    pub precio: f64,
    pub fecha_venta: DateTime<Utc>,
    pub auto_id: i64,
}

/// Request para registrar una venta
///
/// Si `fecha_venta` no se envía, se usa el momento de la creación.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_venta_create"))]
pub struct VentaCreate {
    #[validate(custom = "validate_not_empty")]
    pub nombre_comprador: String,

    pub precio: f64,

    #[serde(default, deserialize_with = "deserialize_fecha_opcional")]
    pub fecha_venta: Option<DateTime<Utc>>,

    pub auto_id: i64,
}

/// Request para actualizar una venta existente
///
/// `auto_id` no es modificable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_venta_update"))]
pub struct VentaUpdate {
    #[serde(default)]
    #[validate(custom = "validate_not_empty")]
    pub nombre_comprador: Option<String>,

    #[serde(default)]
    pub precio: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_fecha_opcional")]
    pub fecha_venta: Option<DateTime<Utc>>,
}

impl VentaUpdate {
    /// Aplicar los campos enviados sobre la venta actual
    pub fn apply_to(&self, venta: &mut Venta) {
        if let Some(nombre) = &self.nombre_comprador {
            venta.nombre_comprador = nombre.clone();
        }
        if let Some(precio) = self.precio {
            venta.precio = precio;
        }
        if let Some(fecha) = self.fecha_venta {
            venta.fecha_venta = fecha;
        }
    }
}

fn precio_y_fecha(precio: Option<f64>, fecha: Option<&DateTime<Utc>>) -> Result<(), ValidationError> {
    if let Some(precio) = precio {
        validate_positive(precio).map_err(|mut error| {
            error.code = "precio".into();
            error
        })?;
    }
    if let Some(fecha) = fecha {
        validate_not_future(fecha).map_err(|mut error| {
            error.code = "fecha_venta".into();
            error
        })?;
    }
    Ok(())
}

fn validate_venta_create(venta: &VentaCreate) -> Result<(), ValidationError> {
    precio_y_fecha(Some(venta.precio), venta.fecha_venta.as_ref())
}

fn validate_venta_update(venta: &VentaUpdate) -> Result<(), ValidationError> {
    precio_y_fecha(venta.precio, venta.fecha_venta.as_ref())
}
