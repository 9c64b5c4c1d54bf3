use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, put, web};

use crate::db;
use crate::auth::{self, AuthUser};
use crate::errors::ServiceError;
use crate::fechas::models::{Fecha, FechaFilter, FechaResponse, NuevaFecha, UpdateFecha};
use crate::models::PaginatedResponse;
use crate::server::Response;

#[get("/fechas")]
async fn find_all(filter: Query<FechaFilter>, pool: Data<db::Pool>, _user: AuthUser) -> Response {
    let filter = filter.into_inner();

    let response = web::block(
        move || -> Result<PaginatedResponse<FechaResponse>, ServiceError> {
            let conn = pool.get()?;

            let total = Fecha::count(&filter, &conn)?;
            let fechas = Fecha::find_all(&filter, &conn)?;

            let fechas = fechas
                .into_iter()
                .map(|fecha| {
                    if filter.include_partidos() {
                        fecha.with_partidos(&conn)
                    } else {
                        Ok(FechaResponse::from(fecha))
                    }
                })
                .collect::<Result<Vec<FechaResponse>, ServiceError>>()?;

            Ok(PaginatedResponse::new(
                fechas,
                total,
                filter.page(),
                filter.limit(),
            ))
        },
    )
    .await?;

    http_ok_json!(response);
}

#[get("/fechas/{id}")]
async fn find(fecha_id: Path<i32>, pool: Data<db::Pool>, _user: AuthUser) -> Response {
    let fecha = web::block(move || {
        let conn = pool.get()?;
        Fecha::find_by_id(*fecha_id, &conn)?.with_partidos(&conn)
    })
    .await?;

    http_ok_json!(fecha);
}

#[post("/fechas")]
async fn create(fecha: Json<NuevaFecha>, pool: Data<db::Pool>, user: AuthUser) -> Response {
    auth::verify_admin(&user)?;

    let fecha = web::block(move || Fecha::create(fecha.into_inner(), &pool.get()?)).await?;

    http_created_json!("Fecha creada exitosamente", fecha);
}

#[put("/fechas/{id}")]
async fn update(
    fecha_id: Path<i32>,
    changes: Json<UpdateFecha>,
    pool: Data<db::Pool>,
    user: AuthUser,
) -> Response {
    auth::verify_admin(&user)?;

    let changes = changes.into_inner();
    changes.validate()?;

    let fecha = web::block(move || Fecha::update(*fecha_id, changes, &pool.get()?)).await?;

    http_ok_json!("Fecha actualizada exitosamente", fecha);
}

#[delete("/fechas/{id}")]
async fn delete(fecha_id: Path<i32>, pool: Data<db::Pool>, user: AuthUser) -> Response {
    auth::verify_admin(&user)?;

    web::block(move || Fecha::delete_by_id(*fecha_id, &pool.get()?)).await?;

    http_message_json!("Fecha eliminada exitosamente");
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(find);
    cfg.service(create);
    cfg.service(update);
    cfg.service(delete);
}
