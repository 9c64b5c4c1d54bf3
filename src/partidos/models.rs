use chrono::{DateTime, Utc};
use std::convert::TryFrom;
use diesel::prelude::*;

use crate::db;
use crate::errors::ServiceError;
use crate::schema::{jugadores, partidos, resultados_partidos};

/// A single match within a fecha, identified by its sequence number
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable)]
#[table_name = "partidos"]
pub struct Partido {
    pub id: i32,
    pub fecha_id: i32,
    pub numero: i32,
    pub completado: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Insertable)]
#[table_name = "partidos"]
pub struct NuevoPartido {
    #[serde(alias = "fechaId")]
    pub fecha_id: i32,
    pub numero: i32,
}

#[derive(Debug, Deserialize, AsChangeset)]
#[table_name = "partidos"]
pub struct UpdatePartido {
    pub numero: Option<i32>,
    pub completado: Option<bool>,
}

/// One player's outcome in one partido
#[derive(Debug, Clone, Serialize, Queryable, Identifiable)]
#[table_name = "resultados_partidos"]
pub struct Resultado {
    pub id: i32,
    pub partido_id: i32,
    pub jugador_id: i32,
    pub goles: i32,
    pub puntos: i32,
    pub posicion: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Entry of a result sheet upload. Puntos may be omitted, in which case
/// they are taken from the configured scoring table for the posicion.
#[derive(Debug, Deserialize)]
pub struct NuevoResultado {
    #[serde(alias = "jugadorId")]
    pub jugador_id: i32,
    #[serde(default)]
    pub goles: i32,
    pub puntos: Option<i32>,
    /// 0 means unplaced: no podium count and no points from the table
    #[serde(default)]
    pub posicion: i32,
}

#[derive(Insertable)]
#[table_name = "resultados_partidos"]
struct ResultadoInsert {
    partido_id: i32,
    jugador_id: i32,
    goles: i32,
    puntos: i32,
    posicion: i32,
}

#[derive(Debug, Serialize)]
pub struct ResultadoResponse {
    pub id: i32,
    pub partido_id: i32,
    pub jugador_id: i32,
    pub goles: i32,
    pub puntos: i32,
    pub posicion: i32,
    pub jugador: JugadorSnapshot,
}

/// the slice of the jugador embedded in nested responses
#[derive(Debug, Serialize, Queryable)]
pub struct JugadorSnapshot {
    pub id: i32,
    pub nombre: String,
    pub equipo: String,
}

#[derive(Debug, Serialize)]
pub struct PartidoResponse {
    #[serde(flatten)]
    pub partido: Partido,
    pub resultados: Vec<ResultadoResponse>,
}

/// Points awarded for a finishing position when the sheet does not
/// supply them. Positions start at 1, anything beyond the table scores 0.
pub fn puntos_por_posicion(scoring_table: &[i32], posicion: i32) -> i32 {
    usize::try_from(posicion)
        .ok()
        .and_then(|posicion| posicion.checked_sub(1))
        .and_then(|index| scoring_table.get(index))
        .copied()
        .unwrap_or(0)
}

impl Partido {
    pub fn find_by_id(id: i32, conn: &db::Conn) -> Result<Partido, ServiceError> {
        let partido = partidos::table.filter(partidos::id.eq(id)).first(conn)?;

        Ok(partido)
    }

    pub fn find_by_fecha(fecha_id: i32, conn: &db::Conn) -> Result<Vec<Partido>, ServiceError> {
        let partidos = partidos::table
            .filter(partidos::fecha_id.eq(fecha_id))
            .order(partidos::numero.asc())
            .load(conn)?;

        Ok(partidos)
    }

    pub fn count(conn: &db::Conn) -> Result<i64, ServiceError> {
        let count = partidos::table.count().get_result(conn)?;

        Ok(count)
    }

    pub fn create(partido: NuevoPartido, conn: &db::Conn) -> Result<Partido, ServiceError> {
        // surfaces 404 for a missing fecha instead of a bare FK violation
        crate::fechas::Fecha::find_by_id(partido.fecha_id, conn)?;

        let partido = diesel::insert_into(partidos::table)
            .values(&partido)
            .get_result(conn)?;

        Ok(partido)
    }

    pub fn update(
        id: i32,
        changes: UpdatePartido,
        conn: &db::Conn,
    ) -> Result<Partido, ServiceError> {
        let partido = diesel::update(partidos::table.filter(partidos::id.eq(id)))
            .set((&changes, partidos::updated_at.eq(diesel::dsl::now)))
            .get_result(conn)?;

        Ok(partido)
    }

    /// Hard delete, cascades to the partido's resultados
    pub fn delete_by_id(id: i32, conn: &db::Conn) -> Result<(), ServiceError> {
        let deleted = diesel::delete(partidos::table.filter(partidos::id.eq(id))).execute(conn)?;

        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }

        Ok(())
    }

    /// Replace the whole result sheet of this partido in one transaction
    /// and mark it completed. Either every row lands or none does.
    pub fn replace_resultados(
        &self,
        resultados: Vec<NuevoResultado>,
        scoring_table: &[i32],
        conn: &db::Conn,
    ) -> Result<Vec<Resultado>, ServiceError> {
        let rows: Vec<ResultadoInsert> = resultados
            .into_iter()
            .map(|resultado| ResultadoInsert {
                partido_id: self.id,
                jugador_id: resultado.jugador_id,
                goles: resultado.goles,
                puntos: resultado
                    .puntos
                    .unwrap_or_else(|| puntos_por_posicion(scoring_table, resultado.posicion)),
                posicion: resultado.posicion,
            })
            .collect();

        let resultados = conn.transaction::<Vec<Resultado>, diesel::result::Error, _>(|| {
            diesel::delete(
                resultados_partidos::table.filter(resultados_partidos::partido_id.eq(self.id)),
            )
            .execute(conn)?;

            let resultados = diesel::insert_into(resultados_partidos::table)
                .values(&rows)
                .get_results(conn)?;

            diesel::update(partidos::table.filter(partidos::id.eq(self.id)))
                .set((
                    partidos::completado.eq(true),
                    partidos::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            Ok(resultados)
        })?;

        Ok(resultados)
    }

    pub fn with_resultados(self, conn: &db::Conn) -> Result<PartidoResponse, ServiceError> {
        let resultados = resultados_partidos::table
            .inner_join(jugadores::table)
            .filter(resultados_partidos::partido_id.eq(self.id))
            .order(resultados_partidos::posicion.asc())
            .select((
                resultados_partidos::id,
                resultados_partidos::partido_id,
                resultados_partidos::jugador_id,
                resultados_partidos::goles,
                resultados_partidos::puntos,
                resultados_partidos::posicion,
                (jugadores::id, jugadores::nombre, jugadores::equipo),
            ))
            .load::<(i32, i32, i32, i32, i32, i32, JugadorSnapshot)>(conn)?
            .into_iter()
            .map(
                |(id, partido_id, jugador_id, goles, puntos, posicion, jugador)| {
                    ResultadoResponse {
                        id,
                        partido_id,
                        jugador_id,
                        goles,
                        puntos,
                        posicion,
                        jugador,
                    }
                },
            )
            .collect();

        Ok(PartidoResponse {
            partido: self,
            resultados,
        })
    }
}

impl NuevoPartido {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.numero < 1 {
            bad_request!("El número de partido debe ser mayor que 0");
        }

        Ok(())
    }
}

impl UpdatePartido {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.numero.is_none() && self.completado.is_none() {
            bad_request!("No hay campos para actualizar");
        }

        if let Some(numero) = self.numero {
            if numero < 1 {
                bad_request!("El número de partido debe ser mayor que 0");
            }
        }

        Ok(())
    }
}

impl NuevoResultado {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.goles < 0 {
            bad_request!("Los goles no pueden ser negativos");
        }

        if let Some(puntos) = self.puntos {
            if puntos < 0 {
                bad_request!("Los puntos no pueden ser negativos");
            }
        }

        if self.posicion < 0 {
            bad_request!("La posición no puede ser negativa");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn podium_scores_from_the_table() {
        let table = [3, 2, 1];

        assert_eq!(puntos_por_posicion(&table, 1), 3);
        assert_eq!(puntos_por_posicion(&table, 2), 2);
        assert_eq!(puntos_por_posicion(&table, 3), 1);
        assert_eq!(puntos_por_posicion(&table, 4), 0);
        assert_eq!(puntos_por_posicion(&table, 12), 0);
    }

    #[test]
    fn alternative_two_one_zero_table() {
        let table = [2, 1];

        assert_eq!(puntos_por_posicion(&table, 1), 2);
        assert_eq!(puntos_por_posicion(&table, 2), 1);
        assert_eq!(puntos_por_posicion(&table, 3), 0);
    }

    #[test]
    fn nonsense_positions_score_zero() {
        assert_eq!(puntos_por_posicion(&[3, 2, 1], 0), 0);
        assert_eq!(puntos_por_posicion(&[3, 2, 1], -4), 0);
    }

    #[test]
    fn manual_puntos_beat_the_table() {
        let resultado: NuevoResultado =
            serde_json::from_str(r#"{"jugador_id":1,"goles":2,"puntos":7,"posicion":1}"#).unwrap();

        assert!(resultado.validate().is_ok());
        assert_eq!(
            resultado
                .puntos
                .unwrap_or_else(|| puntos_por_posicion(&[3, 2, 1], resultado.posicion)),
            7
        );
    }

    #[test]
    fn camel_case_sheet_entries_are_accepted() {
        let resultado: NuevoResultado =
            serde_json::from_str(r#"{"jugadorId":4,"goles":3}"#).unwrap();

        assert_eq!(resultado.jugador_id, 4);
        assert_eq!(resultado.posicion, 0);
        assert!(resultado.validate().is_ok());
    }

    #[test]
    fn goles_default_to_zero() {
        let resultado: NuevoResultado =
            serde_json::from_str(r#"{"jugador_id":1,"posicion":2}"#).unwrap();

        assert_eq!(resultado.goles, 0);
        assert_eq!(resultado.puntos, None);
        assert!(resultado.validate().is_ok());
    }

    #[test]
    fn invalid_sheet_entries() {
        let resultado: NuevoResultado =
            serde_json::from_str(r#"{"jugador_id":1,"goles":-1,"posicion":1}"#).unwrap();
        assert!(resultado.validate().is_err());

        let resultado: NuevoResultado =
            serde_json::from_str(r#"{"jugador_id":1,"goles":0,"posicion":-2}"#).unwrap();
        assert!(resultado.validate().is_err());
    }
}
