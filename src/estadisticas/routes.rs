use actix_web::web::{Data, Query};
use actix_web::{get, web};

use crate::auth::AuthUser;
use crate::db;
use crate::errors::ServiceError;
use crate::estadisticas::models::{
    EstadisticasGenerales, FechaResumen, JugadorDestacado, PartidoDestacado, PartidoInfo,
    PartidoResumen, Resumen, ResultadoRow, StatsFilter,
};
use crate::estadisticas::standings;
use crate::fechas::Fecha;
use crate::jugadores::Jugador;
use crate::partidos::Partido;
use crate::server::Response;

#[get("/estadisticas/generales")]
async fn generales(filter: Query<StatsFilter>, pool: Data<db::Pool>, _user: AuthUser) -> Response {
    let filter = filter.into_inner();

    let tabla = web::block(
        move || -> Result<Vec<EstadisticasGenerales>, ServiceError> {
            let conn = pool.get()?;

            let jugadores = Jugador::find_active(&conn)?;
            let rows = ResultadoRow::load(&filter, &conn)?;

            Ok(standings::generales(jugadores, &rows))
        },
    )
    .await?;

    http_ok_json!(tabla);
}

#[get("/estadisticas/resumen")]
async fn resumen(pool: Data<db::Pool>, _user: AuthUser) -> Response {
    let resumen = web::block(move || -> Result<Resumen, ServiceError> {
        let conn = pool.get()?;

        let rows = ResultadoRow::load(&StatsFilter::default(), &conn)?;
        let tabla = standings::generales(Jugador::find_active(&conn)?, &rows);

        let partido_mas_goles = match standings::partido_mas_goles(&rows) {
            Some((partido_id, total_goles)) => {
                let info = PartidoInfo::find(partido_id, &conn)?;

                Some(PartidoDestacado {
                    partido: PartidoResumen {
                        numero: info.numero,
                    },
                    fecha: FechaResumen {
                        fecha: info.fecha,
                        nombre: info.nombre,
                    },
                    total_goles,
                })
            }
            None => None,
        };

        Ok(Resumen {
            total_jugadores: Jugador::count_active(&conn)?,
            total_fechas: Fecha::count_active(&conn)?,
            total_partidos: Partido::count(&conn)?,
            total_goles: crate::estadisticas::models::total_goles(&conn)?,
            jugador_mas_goles: standings::jugador_mas_goles(&tabla)
                .map(JugadorDestacado::goleador),
            jugador_mas_puntos: standings::jugador_mas_puntos(&tabla)
                .map(JugadorDestacado::puntero),
            partido_mas_goles,
        })
    })
    .await?;

    http_ok_json!(resumen);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(generales);
    cfg.service(resumen);
}
