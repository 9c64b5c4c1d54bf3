pub mod models;
pub mod routes;

pub use models::{Fecha, FechaFilter, FechaResponse, NuevaFecha, UpdateFecha};
