pub mod autos_routes;
pub mod ventas_routes;
