//! Módulo de base de datos
//!
//! Maneja la conexión con SQLite y las migraciones del esquema.

pub mod connection;

pub use connection::Database;
