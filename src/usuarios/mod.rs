mod models;

pub use models::{Role, Usuario, UsuarioResponse};

use crate::db;

/// Create the configured admin account when the user table is empty.
///
/// Replaces the unauthenticated bootstrap endpoint of earlier versions:
/// seeding only happens at process start, from environment credentials.
pub fn seed_admin(pool: &db::Pool) -> anyhow::Result<()> {
    let (username, password) = match crate::config::Config::admin_account() {
        Some(account) => account,
        None => {
            debug!("no admin account configured, skipping seed");
            return Ok(());
        }
    };

    let conn = pool.get()?;

    if Usuario::count(&conn)? > 0 {
        return Ok(());
    }

    Usuario::create(username, password, Role::Admin, &conn)?;
    info!("seeded admin account '{}'", username);

    Ok(())
}
