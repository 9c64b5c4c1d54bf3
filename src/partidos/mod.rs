pub mod models;
pub mod routes;

pub use models::{NuevoPartido, NuevoResultado, Partido, Resultado, UpdatePartido};
