//! The standings engine: turns raw per-match resultado rows into the
//! ranked league table and the resumen facts shown on the dashboard.

pub mod models;
pub mod routes;
pub mod standings;

pub use models::{EstadisticasGenerales, ResultadoRow, StatsFilter};
