//! Modelo de Auto
//!
//! Este módulo contiene el struct Auto y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `auto` con primary key 'id'.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_anio, validate_not_empty, validate_numero_chasis};

/// Auto principal - mapea exactamente a la tabla auto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Auto {
    pub id: i64,
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub numero_chasis: String,
}

/// Request para crear un nuevo auto
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_auto_create"))]
pub struct AutoCreate {
    #[validate(custom = "validate_not_empty")]
    pub marca: String,

    #[validate(custom = "validate_not_empty")]
    pub modelo: String,

    pub anio: i32,

    #[validate(custom = "validate_numero_chasis")]
    pub numero_chasis: String,
}

/// Request para actualizar un auto existente
///
/// Solo se modifican los campos presentes; `None` significa "no enviado".
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_auto_update"))]
pub struct AutoUpdate {
    #[serde(default)]
    #[validate(custom = "validate_not_empty")]
    pub marca: Option<String>,

    #[serde(default)]
    #[validate(custom = "validate_not_empty")]
    pub modelo: Option<String>,

    #[serde(default)]
    pub anio: Option<i32>,

    #[serde(default)]
    #[validate(custom = "validate_numero_chasis")]
    pub numero_chasis: Option<String>,
}

impl AutoUpdate {
    /// Aplicar los campos enviados sobre el auto actual
    pub fn apply_to(&self, auto: &mut Auto) {
        if let Some(marca) = &self.marca {
            auto.marca = marca.clone();
        }
        if let Some(modelo) = &self.modelo {
            auto.modelo = modelo.clone();
        }
        if let Some(anio) = self.anio {
            auto.anio = anio;
        }
        if let Some(numero_chasis) = &self.numero_chasis {
            auto.numero_chasis = numero_chasis.clone();
        }
    }

    /// Nuevo chasis solicitado, solo si difiere del actual
    pub fn chasis_change<'a>(&'a self, current: &Auto) -> Option<&'a str> {
        self.numero_chasis
            .as_deref()
            .filter(|chasis| *chasis != current.numero_chasis)
    }
}

fn validate_auto_create(auto: &AutoCreate) -> Result<(), ValidationError> {
    validate_anio(auto.anio)
}

fn validate_auto_update(auto: &AutoUpdate) -> Result<(), ValidationError> {
    match auto.anio {
        Some(anio) => validate_anio(anio),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::{anio_actual, ANIO_MINIMO};

    fn corolla() -> AutoCreate {
        AutoCreate {
            marca: "Toyota".to_string(),
            modelo: "Corolla".to_string(),
            anio: 2020,
            numero_chasis: "ABC123".to_string(),
        }
    }

    #[test]
    fn test_valid_auto_create() {
        assert!(corolla().validate().is_ok());
    }

    #[test]
    fn test_alphanumeric_chasis_accepted() {
        for chasis in ["A", "abc", "123", "Zx9Yw8", "1HGCM82633A004352"] {
            let auto = AutoCreate {
                numero_chasis: chasis.to_string(),
                ..corolla()
            };
            assert!(auto.validate().is_ok(), "chasis {} debería ser válido", chasis);
        }
    }

    #[test]
    fn test_non_alphanumeric_chasis_rejected() {
        for chasis in ["", "ABC-123", "ABC 123", "abc.1", "#1", "ÁBC1"] {
            let auto = AutoCreate {
                numero_chasis: chasis.to_string(),
                ..corolla()
            };
            let errors = auto.validate().unwrap_err();
            let chasis_errors = errors.field_errors()["numero_chasis"];
            assert_eq!(chasis_errors[0].code, "numero_chasis");
        }
    }

    #[test]
    fn test_anio_out_of_range_rejected() {
        for anio in [ANIO_MINIMO - 1, 0, -2020, anio_actual() + 1, 3000] {
            let auto = AutoCreate { anio, ..corolla() };
            assert!(auto.validate().is_err(), "anio {} debería ser inválido", anio);
        }
        for anio in [ANIO_MINIMO, anio_actual()] {
            let auto = AutoCreate { anio, ..corolla() };
            assert!(auto.validate().is_ok());
        }
    }

    #[test]
    fn test_blank_marca_rejected() {
        let auto = AutoCreate {
            marca: "  ".to_string(),
            ..corolla()
        };
        let errors = auto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("marca"));
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(AutoUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_update_revalidates_supplied_fields() {
        let bad_chasis = AutoUpdate {
            numero_chasis: Some("AB/12".to_string()),
            ..Default::default()
        };
        assert!(bad_chasis.validate().is_err());

        let bad_anio = AutoUpdate {
            anio: Some(1989),
            ..Default::default()
        };
        assert!(bad_anio.validate().is_err());
    }

    #[test]
    fn test_update_deserializes_missing_fields_as_none() {
        let update: AutoUpdate = serde_json::from_str(r#"{"modelo": "Yaris"}"#).unwrap();
        assert_eq!(update.modelo.as_deref(), Some("Yaris"));
        assert!(update.marca.is_none());
        assert!(update.anio.is_none());
        assert!(update.numero_chasis.is_none());
    }

    #[test]
    fn test_apply_to_only_touches_supplied_fields() {
        let mut auto = Auto {
            id: 1,
            marca: "Toyota".to_string(),
            modelo: "Corolla".to_string(),
            anio: 2020,
            numero_chasis: "ABC123".to_string(),
        };
        let update = AutoUpdate {
            anio: Some(2021),
            ..Default::default()
        };
        update.apply_to(&mut auto);

        assert_eq!(auto.anio, 2021);
        assert_eq!(auto.marca, "Toyota");
        assert_eq!(auto.numero_chasis, "ABC123");
    }

    #[test]
    fn test_chasis_change_ignores_same_value() {
        let auto = Auto {
            id: 1,
            marca: "Ford".to_string(),
            modelo: "Focus".to_string(),
            anio: 2015,
            numero_chasis: "F0CUS".to_string(),
        };
        let same = AutoUpdate {
            numero_chasis: Some("F0CUS".to_string()),
            ..Default::default()
        };
        let other = AutoUpdate {
            numero_chasis: Some("F0CUS2".to_string()),
            ..Default::default()
        };

        assert_eq!(same.chasis_change(&auto), None);
        assert_eq!(other.chasis_change(&auto), Some("F0CUS2"));
        assert_eq!(AutoUpdate::default().chasis_change(&auto), None);
    }
}
