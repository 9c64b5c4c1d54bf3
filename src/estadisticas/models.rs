use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db;
use crate::errors::ServiceError;
use crate::jugadores::Jugador;
use crate::schema::{fechas, jugadores, partidos, resultados_partidos};

/// One resultado joined up to its fecha, the raw material of the
/// standings aggregation
#[derive(Debug, Clone, Queryable)]
pub struct ResultadoRow {
    pub jugador_id: i32,
    pub partido_id: i32,
    pub fecha_id: i32,
    pub goles: i32,
    pub puntos: i32,
    pub posicion: i32,
}

/// Typed filter for the standings queries; values are always bound,
/// never concatenated into the query text
#[derive(Debug, Default, Deserialize)]
pub struct StatsFilter {
    /// only count fechas on or after this date
    pub desde: Option<NaiveDate>,
    /// only count fechas on or before this date
    pub hasta: Option<NaiveDate>,
}

/// Per-player aggregates over the selected resultados
#[derive(Debug, Serialize)]
pub struct EstadisticasGenerales {
    pub jugador_id: i32,
    pub partidos_jugados: i64,
    pub goles_totales: i64,
    pub puntos_totales: i64,
    pub primeros_puestos: i64,
    pub segundos_puestos: i64,
    pub terceros_puestos: i64,
    pub fechas_jugadas: i64,
    pub promedio_goles: f64,
    pub promedio_puntos: f64,
    pub jugador: Jugador,
}

impl ResultadoRow {
    /// Load the resultado rows of active players, joined through partido
    /// and fecha so the optional date range can be applied.
    pub fn load(filter: &StatsFilter, conn: &db::Conn) -> Result<Vec<ResultadoRow>, ServiceError> {
        let mut query = resultados_partidos::table
            .inner_join(partidos::table.inner_join(fechas::table))
            .inner_join(jugadores::table)
            .filter(jugadores::activo.eq(true))
            .select((
                resultados_partidos::jugador_id,
                resultados_partidos::partido_id,
                partidos::fecha_id,
                resultados_partidos::goles,
                resultados_partidos::puntos,
                resultados_partidos::posicion,
            ))
            .into_boxed::<Pg>();

        if let Some(desde) = filter.desde {
            query = query.filter(fechas::fecha.ge(desde));
        }

        if let Some(hasta) = filter.hasta {
            query = query.filter(fechas::fecha.le(hasta));
        }

        let rows = query.load(conn)?;

        Ok(rows)
    }
}

/// Numero and fecha details of a partido, for the resumen superlative
#[derive(Debug, Queryable)]
pub struct PartidoInfo {
    pub numero: i32,
    pub fecha: NaiveDate,
    pub nombre: Option<String>,
}

impl PartidoInfo {
    pub fn find(partido_id: i32, conn: &db::Conn) -> Result<PartidoInfo, ServiceError> {
        let info = partidos::table
            .inner_join(fechas::table)
            .filter(partidos::id.eq(partido_id))
            .select((partidos::numero, fechas::fecha, fechas::nombre))
            .first(conn)?;

        Ok(info)
    }
}

/// total goals scored across every resultado ever recorded
pub fn total_goles(conn: &db::Conn) -> Result<i64, ServiceError> {
    let total: Option<i64> = resultados_partidos::table
        .select(diesel::dsl::sum(resultados_partidos::goles))
        .first(conn)?;

    Ok(total.unwrap_or(0))
}

/// The resumen facts shown on the public dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resumen {
    pub total_jugadores: i64,
    pub total_fechas: i64,
    pub total_partidos: i64,
    pub total_goles: i64,
    pub jugador_mas_goles: Option<JugadorDestacado>,
    pub jugador_mas_puntos: Option<JugadorDestacado>,
    pub partido_mas_goles: Option<PartidoDestacado>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JugadorDestacado {
    pub jugador: JugadorResumen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_goles: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_puntos: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct JugadorResumen {
    pub nombre: String,
    pub equipo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartidoDestacado {
    pub partido: PartidoResumen,
    pub fecha: FechaResumen,
    pub total_goles: i64,
}

#[derive(Debug, Serialize)]
pub struct PartidoResumen {
    pub numero: i32,
}

#[derive(Debug, Serialize)]
pub struct FechaResumen {
    pub fecha: NaiveDate,
    pub nombre: Option<String>,
}

impl JugadorDestacado {
    pub fn goleador(estadisticas: &EstadisticasGenerales) -> JugadorDestacado {
        JugadorDestacado {
            jugador: JugadorResumen {
                nombre: estadisticas.jugador.nombre.clone(),
                equipo: estadisticas.jugador.equipo.clone(),
            },
            total_goles: Some(estadisticas.goles_totales),
            total_puntos: None,
        }
    }

    pub fn puntero(estadisticas: &EstadisticasGenerales) -> JugadorDestacado {
        JugadorDestacado {
            jugador: JugadorResumen {
                nombre: estadisticas.jugador.nombre.clone(),
                equipo: estadisticas.jugador.equipo.clone(),
            },
            total_goles: None,
            total_puntos: Some(estadisticas.puntos_totales),
        }
    }
}
