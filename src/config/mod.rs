//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos y las variables
//! de entorno del servidor.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;

use thiserror::Error;

/// Error al leer la configuración desde el entorno
#[derive(Error, Debug)]
#[error("Valor inválido para {var}: '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Leer una variable de entorno con valor por defecto
pub(crate) fn env_or(var: &'static str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

/// Leer y parsear una variable de entorno con valor por defecto
pub(crate) fn parse_env_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value }),
        Err(_) => Ok(default),
    }
}
