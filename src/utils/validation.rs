//! Utilidades de validación
//!
//! Este módulo contiene las reglas de validación compartidas entre autos
//! y ventas: formato del chasis, rango de años, precios y fechas.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::ValidationError;

/// Primer año de fabricación aceptado en el inventario
pub const ANIO_MINIMO: i32 = 1990;

/// Formatos aceptados para fechas sin zona horaria
const FORMATOS_FECHA_SIN_ZONA: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

lazy_static! {
    /// Número de chasis: estrictamente alfanumérico
    static ref RE_NUMERO_CHASIS: Regex = Regex::new(r"^[A-Za-z0-9]+$").unwrap();
}

/// Año calendario actual según el reloj del servidor
pub fn anio_actual() -> i32 {
    Utc::now().year()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some("El valor no puede estar vacío.".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de número de chasis
pub fn validate_numero_chasis(value: &str) -> Result<(), ValidationError> {
    if !RE_NUMERO_CHASIS.is_match(value) {
        let mut error = ValidationError::new("numero_chasis");
        error.message = Some(
            "El número de chasis debe ser estrictamente alfanumérico (solo letras y números)."
                .into(),
        );
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar el año de fabricación: entre 1990 y el año en curso
pub fn validate_anio(anio: i32) -> Result<(), ValidationError> {
    validate_range(anio, ANIO_MINIMO, anio_actual()).map_err(|mut error| {
        error.code = "anio".into();
        error.message = Some(
            format!("El año debe estar entre {} y {}.", ANIO_MINIMO, anio_actual()).into(),
        );
        error
    })
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.message = Some("El valor debe ser mayor a 0.".into());
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("El valor no puede ser negativo.".into());
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que una fecha no sea posterior al momento actual
pub fn validate_not_future(fecha: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *fecha > Utc::now() {
        let mut error = ValidationError::new("not_future");
        error.message = Some("La fecha de venta no puede ser mayor al día de hoy.".into());
        error.add_param("value".into(), &fecha.to_rfc3339());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a datetime
///
/// Acepta RFC 3339. Una fecha sin zona horaria se interpreta en UTC.
pub fn validate_datetime(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();
    if let Ok(fecha) = DateTime::parse_from_rfc3339(value) {
        return Ok(fecha.with_timezone(&Utc));
    }

    FORMATOS_FECHA_SIN_ZONA
        .iter()
        .find_map(|formato| NaiveDateTime::parse_from_str(value, formato).ok())
        .map(|fecha| Utc.from_utc_datetime(&fecha))
        .ok_or_else(|| {
            let mut error = ValidationError::new("datetime");
            error.message = Some("La fecha no tiene un formato válido.".into());
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"RFC3339".to_string());
            error
        })
}

/// Deserializar una fecha opcional aceptando los formatos de `validate_datetime`
pub fn deserialize_fecha_opcional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|value| {
        validate_datetime(&value)
            .map_err(|_| serde::de::Error::custom(format!("fecha inválida '{}'", value)))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Juan Perez").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   \t").is_err());
    }

    #[test]
    fn test_validate_numero_chasis() {
        assert!(validate_numero_chasis("ABC123").is_ok());
        assert!(validate_numero_chasis("abc").is_ok());
        assert!(validate_numero_chasis("9").is_ok());

        assert!(validate_numero_chasis("").is_err());
        assert!(validate_numero_chasis("ABC-123").is_err());
        assert!(validate_numero_chasis("ABC 123").is_err());
        assert!(validate_numero_chasis("ABC_123").is_err());
        assert!(validate_numero_chasis("ÑANDU1").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_anio_bounds() {
        assert!(validate_anio(ANIO_MINIMO).is_ok());
        assert!(validate_anio(anio_actual()).is_ok());
        assert!(validate_anio(2005).is_ok());

        assert!(validate_anio(ANIO_MINIMO - 1).is_err());
        assert!(validate_anio(anio_actual() + 1).is_err());

        let error = validate_anio(1900).unwrap_err();
        assert_eq!(error.code, "anio");
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(15000.0).is_ok());
        assert!(validate_positive(0.01).is_ok());
        assert!(validate_positive(0.0).is_err());
        assert!(validate_positive(-5.0).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(10.5).is_ok());
        assert!(validate_non_negative(-0.5).is_err());
    }

    #[test]
    fn test_validate_not_future() {
        assert!(validate_not_future(&Utc::now()).is_ok());
        assert!(validate_not_future(&(Utc::now() - Duration::days(30))).is_ok());
        assert!(validate_not_future(&(Utc::now() + Duration::days(1))).is_err());
    }

    #[test]
    fn test_validate_datetime_accepts_naive_as_utc() {
        let esperada = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        assert_eq!(validate_datetime("2024-05-01T10:00:00").unwrap(), esperada);
        assert_eq!(validate_datetime("2024-05-01 10:00:00").unwrap(), esperada);
        assert_eq!(validate_datetime("2024-05-01T10:00:00Z").unwrap(), esperada);
        assert_eq!(validate_datetime("2024-05-01T12:00:00+02:00").unwrap(), esperada);
        assert_eq!(
            validate_datetime("2024-05-01T10:00:00.250").unwrap(),
            esperada + Duration::milliseconds(250)
        );

        let error = validate_datetime("01/05/2024").unwrap_err();
        assert_eq!(error.code, "datetime");
    }
}
