//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a las tablas `auto` y `venta`, junto con sus requests de creación
//! y actualización parcial.

pub mod auto;
pub mod venta;

pub use auto::{Auto, AutoCreate, AutoUpdate};
pub use venta::{Venta, VentaCreate, VentaUpdate};
