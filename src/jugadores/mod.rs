pub mod models;
pub mod routes;

pub use models::{Jugador, JugadorFilter, NuevoJugador, UpdateJugador};
