#![warn(missing_debug_implementations, rust_2018_idioms)]

#[macro_use]
extern crate diesel;

#[macro_use]
extern crate diesel_migrations;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

use anyhow::Error;
use dotenv::dotenv;

#[macro_use]
mod macros;

mod auth;
mod config;
mod db;
mod errors;
mod estadisticas;
mod fechas;
mod jugadores;
mod models;
mod partidos;
mod schema;
mod server;
mod usuarios;

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    init().await?;

    Ok(())
}

async fn init() -> anyhow::Result<(), Error> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .expect("unable to initialize the tracer");

    let database_url = config::Config::database_url();

    db::migrate(database_url)?;

    let pool = db::build_connection_pool(database_url, config::Config::database_pool_size())?;

    usuarios::seed_admin(&pool)?;

    debug!("launching the actix webserver");
    server::launch(pool).await?;

    Ok(())
}
