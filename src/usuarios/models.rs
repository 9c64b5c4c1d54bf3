use argon2::Config;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rand::Rng;
use regex::Regex;

use crate::db;
use crate::errors::ServiceError;
use crate::schema::usuarios;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

#[derive(Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Debug, Clone)]
#[table_name = "usuarios"]
pub struct Usuario {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, skip_deserializing)]
    pub password: String,
    pub role: String,
    pub activo: bool,
    pub ultimo_login: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Trimmed user representation returned by the login endpoint
#[derive(Serialize, Debug)]
pub struct UsuarioResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

#[derive(Insertable)]
#[table_name = "usuarios"]
struct NuevoUsuario {
    username: String,
    password: String,
    role: String,
}

impl Usuario {
    pub fn find_active(id: i32, conn: &db::Conn) -> Result<Usuario, ServiceError> {
        let user = usuarios::table
            .filter(usuarios::id.eq(id))
            .filter(usuarios::activo.eq(true))
            .first(conn)?;

        Ok(user)
    }

    pub fn find_active_by_username(username: &str, conn: &db::Conn) -> Result<Usuario, ServiceError> {
        let user = usuarios::table
            .filter(usuarios::username.eq(username))
            .filter(usuarios::activo.eq(true))
            .first(conn)?;

        Ok(user)
    }

    pub fn count(conn: &db::Conn) -> Result<i64, ServiceError> {
        let count = usuarios::table.count().get_result(conn)?;

        Ok(count)
    }

    pub fn create(
        username: &str,
        password: &str,
        role: Role,
        conn: &db::Conn,
    ) -> Result<Usuario, ServiceError> {
        validate_credentials(username, password)?;

        let user = NuevoUsuario {
            username: username.to_string(),
            password: hash_password(password)?,
            role: role.to_string(),
        };

        let user = diesel::insert_into(usuarios::table)
            .values(&user)
            .get_result(conn)?;

        Ok(user)
    }

    pub fn record_login(id: i32, conn: &db::Conn) -> Result<(), ServiceError> {
        diesel::update(usuarios::table.filter(usuarios::id.eq(id)))
            .set(usuarios::ultimo_login.eq(diesel::dsl::now))
            .execute(conn)?;

        Ok(())
    }

    pub fn verify_password(&self, password: &[u8]) -> Result<(), ServiceError> {
        let is_match = argon2::verify_encoded(&self.password, password)?;

        if !is_match {
            return Err(ServiceError::Unauthorized);
        }

        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.to_string()
    }
}

impl From<Usuario> for UsuarioResponse {
    fn from(user: Usuario) -> UsuarioResponse {
        UsuarioResponse {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt: [u8; 32] = rand::thread_rng().gen();
    let config = Config::default();

    let hash = argon2::hash_encoded(password.as_bytes(), &salt, &config)?;

    Ok(hash)
}

fn validate_credentials(username: &str, password: &str) -> Result<(), ServiceError> {
    if username.trim().is_empty() {
        bad_request!("username is too short");
    }

    if username.trim().len() > 50 {
        bad_request!("username is too long, max 50 characters");
    }

    let pattern: Regex = Regex::new(r"^[0-9A-Za-z-_]+$").unwrap();

    if !pattern.is_match(username) {
        bad_request!("username can only contain letters, numbers, '-' and '_'");
    }

    if password.len() < 8 {
        bad_request!("the password should at least be 8 characters long");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_password(password: &str) -> Usuario {
        Usuario {
            id: 1,
            username: String::from("admin"),
            password: hash_password(password).unwrap(),
            role: Role::Admin.to_string(),
            activo: true,
            ultimo_login: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    /// the password hash should never be exposed through the api
    fn password_should_not_leak() {
        let user = user_with_password("hunter2boogaloo");

        let serialized = serde_json::to_string(&user).unwrap();

        assert_eq!(serialized.contains("password"), false);
    }

    #[test]
    fn verify_hashed_password() {
        let user = user_with_password("hunter2boogaloo");

        assert!(user.verify_password(b"hunter2boogaloo").is_ok());
        assert!(user.verify_password(b"not-the-password").is_err());
    }

    #[test]
    fn role_round_trip() {
        let user = user_with_password("hunter2boogaloo");

        assert!(user.is_admin());
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn invalid_seed_credentials() {
        assert!(validate_credentials("a€$b", "hunter2boogaloo").is_err());
        assert!(validate_credentials("", "hunter2boogaloo").is_err());
        assert!(validate_credentials("admin", "short").is_err());
    }

    #[test]
    fn valid_seed_credentials() {
        assert!(validate_credentials("liga-admin_01", "hunter2boogaloo").is_ok());
    }
}
