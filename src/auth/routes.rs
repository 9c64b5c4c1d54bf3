use actix_web::web::{Data, Json};
use actix_web::{get, post, web};
use serde_json::json;

use crate::auth::{token, AuthUser};
use crate::db;
use crate::errors::ServiceError;
use crate::server::Response;
use crate::usuarios::{Usuario, UsuarioResponse};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[post("/auth/login")]
async fn login(credentials: Json<Credentials>, pool: Data<db::Pool>) -> Response {
    let credentials = credentials.into_inner();

    if credentials.username.trim().is_empty() || credentials.password.is_empty() {
        bad_request!("Username y password son requeridos");
    }

    let user = web::block(move || -> Result<Usuario, ServiceError> {
        let conn = pool.get()?;

        let user = Usuario::find_active_by_username(&credentials.username, &conn).map_err(
            |error| match error {
                ServiceError::NotFound => ServiceError::Unauthorized,
                error => error,
            },
        )?;

        user.verify_password(credentials.password.as_bytes())?;

        Usuario::record_login(user.id, &conn)?;

        Ok(user)
    })
    .await?;

    let token = token::issue(&user)?;

    http_ok_json!(
        "Login exitoso",
        json!({
            "token": token,
            "user": UsuarioResponse::from(user),
        })
    );
}

#[get("/auth/profile")]
async fn profile(user: AuthUser, pool: Data<db::Pool>) -> Response {
    let user = web::block(move || Usuario::find_active(user.id, &pool.get()?)).await?;

    http_ok_json!(json!({ "user": user }));
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(login);
    cfg.service(profile);
}
