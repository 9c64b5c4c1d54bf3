use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, put, web};

use crate::auth::{self, AuthUser};
use crate::db;
use crate::jugadores::models::{Jugador, JugadorFilter, NuevoJugador, UpdateJugador};
use crate::models::PaginatedResponse;
use crate::server::Response;

#[get("/jugadores")]
async fn find_all(filter: Query<JugadorFilter>, pool: Data<db::Pool>, _user: AuthUser) -> Response {
    let filter = filter.into_inner();

    let response = web::block(
        move || -> Result<PaginatedResponse<Jugador>, crate::errors::ServiceError> {
            let conn = pool.get()?;

            let total = Jugador::count(&filter, &conn)?;
            let jugadores = Jugador::find_all(&filter, &conn)?;

            Ok(PaginatedResponse::new(
                jugadores,
                total,
                filter.page(),
                filter.limit(),
            ))
        },
    )
    .await?;

    http_ok_json!(response);
}

#[get("/jugadores/{id}")]
async fn find(jugador_id: Path<i32>, pool: Data<db::Pool>, _user: AuthUser) -> Response {
    let jugador = web::block(move || Jugador::find_by_id(*jugador_id, &pool.get()?)).await?;

    http_ok_json!(jugador);
}

#[post("/jugadores")]
async fn create(jugador: Json<NuevoJugador>, pool: Data<db::Pool>, user: AuthUser) -> Response {
    auth::verify_admin(&user)?;

    let jugador = jugador.into_inner();
    jugador.validate()?;

    let jugador = web::block(move || Jugador::create(jugador, &pool.get()?)).await?;

    http_created_json!("Jugador creado exitosamente", jugador);
}

#[put("/jugadores/{id}")]
async fn update(
    jugador_id: Path<i32>,
    changes: Json<UpdateJugador>,
    pool: Data<db::Pool>,
    user: AuthUser,
) -> Response {
    auth::verify_admin(&user)?;

    let changes = changes.into_inner();
    changes.validate()?;

    let jugador = web::block(move || Jugador::update(*jugador_id, changes, &pool.get()?)).await?;

    http_ok_json!("Jugador actualizado exitosamente", jugador);
}

#[delete("/jugadores/{id}")]
async fn delete(jugador_id: Path<i32>, pool: Data<db::Pool>, user: AuthUser) -> Response {
    auth::verify_admin(&user)?;

    web::block(move || Jugador::soft_delete(*jugador_id, &pool.get()?)).await?;

    http_message_json!("Jugador eliminado exitosamente");
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
    cfg.service(update);
    cfg.service(delete);
}
