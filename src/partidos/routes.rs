use actix_web::web::{Data, Json, Path};
use actix_web::{delete, post, put, web};

use crate::auth::{self, AuthUser};
use crate::config::Config;
use crate::db;
use crate::errors::ServiceError;
use crate::partidos::models::{NuevoPartido, NuevoResultado, Partido, Resultado, UpdatePartido};
use crate::server::Response;

#[post("/partidos")]
async fn create(partido: Json<NuevoPartido>, pool: Data<db::Pool>, user: AuthUser) -> Response {
    auth::verify_admin(&user)?;

    let partido = partido.into_inner();
    partido.validate()?;

    let partido = web::block(move || Partido::create(partido, &pool.get()?)).await?;

    http_created_json!("Partido creado exitosamente", partido);
}

#[put("/partidos/{id}")]
async fn update(
    partido_id: Path<i32>,
    changes: Json<UpdatePartido>,
    pool: Data<db::Pool>,
    user: AuthUser,
) -> Response {
    auth::verify_admin(&user)?;

    let changes = changes.into_inner();
    changes.validate()?;

    let partido = web::block(move || Partido::update(*partido_id, changes, &pool.get()?)).await?;

    http_ok_json!("Partido actualizado exitosamente", partido);
}

#[put("/partidos/{id}/resultados")]
async fn replace_resultados(
    partido_id: Path<i32>,
    resultados: Json<Vec<NuevoResultado>>,
    pool: Data<db::Pool>,
    user: AuthUser,
) -> Response {
    auth::verify_admin(&user)?;

    let resultados = resultados.into_inner();
    for resultado in &resultados {
        resultado.validate()?;
    }

    let resultados = web::block(move || -> Result<Vec<Resultado>, ServiceError> {
        let conn = pool.get()?;
        let partido = Partido::find_by_id(*partido_id, &conn)?;

        partido.replace_resultados(resultados, &Config::scoring_table(), &conn)
    })
    .await?;

    http_ok_json!("Resultados actualizados exitosamente", resultados);
}

#[delete("/partidos/{id}")]
async fn delete(partido_id: Path<i32>, pool: Data<db::Pool>, user: AuthUser) -> Response {
    auth::verify_admin(&user)?;

    web::block(move || Partido::delete_by_id(*partido_id, &pool.get()?)).await?;

    http_message_json!("Partido eliminado exitosamente");
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(create);
    cfg.service(update);
    cfg.service(replace_resultados);
    cfg.service(delete);
}
