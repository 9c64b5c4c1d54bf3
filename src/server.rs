use actix_web::{get, middleware, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::auth;
use crate::config::Config;
use crate::db;
use crate::errors::ServiceError;
use crate::estadisticas;
use crate::fechas;
use crate::jugadores;
use crate::partidos;

pub type Response = Result<HttpResponse, ServiceError>;

#[get("/health")]
async fn health(_: HttpRequest) -> &'static str {
    "ok"
}

pub async fn launch(db_pool: db::Pool) -> std::io::Result<()> {
    HttpServer::new(move || {
        App::new()
            .data(db_pool.clone())
            .wrap(middleware::DefaultHeaders::new().header("X-Version", env!("CARGO_PKG_VERSION")))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::default())
            .data(web::JsonConfig::default().limit(262_144))
            .data(web::PayloadConfig::default().limit(262_144))
            .service(
                web::scope("/api")
                    .configure(auth::routes::register)
                    .configure(jugadores::routes::register)
                    .configure(fechas::routes::register)
                    .configure(partidos::routes::register)
                    .configure(estadisticas::routes::register)
                    .service(health),
            )
    })
    .bind(format!("{}:{}", Config::api_host(), Config::api_port()))?
    .run()
    .await
}
