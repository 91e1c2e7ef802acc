//! Controladores
//!
//! Validan los requests, delegan en los repositorios y convierten los
//! registros en DTOs de respuesta.

pub mod auto_controller;
pub mod venta_controller;

pub use auto_controller::AutoController;
pub use venta_controller::VentaController;
