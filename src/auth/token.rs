use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::Config;
use crate::errors::ServiceError;
use crate::usuarios::Usuario;

/// Claims embedded in a login token.
///
/// Tokens are stateless: there is no server side session store, a token
/// stays valid until `exp` no matter what happens to the account.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// user id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
}

pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey<'static>,
    expiry_days: i64,
}

impl Keys {
    pub fn new(secret: &[u8], expiry_days: i64) -> Keys {
        Keys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret).into_static(),
            expiry_days,
        }
    }

    pub fn issue(&self, user: &Usuario) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            exp: (Utc::now() + Duration::days(self.expiry_days)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            error!("unable to sign a token: {}", e);
            ServiceError::InternalServerError
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthorized)
    }
}

lazy_static! {
    static ref KEYS: Keys = Keys::new(
        Config::jwt_secret().as_bytes(),
        Config::token_expiry_days()
    );
}

pub fn issue(user: &Usuario) -> Result<String, ServiceError> {
    KEYS.issue(user)
}

pub fn verify(token: &str) -> Result<Claims, ServiceError> {
    KEYS.verify(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usuarios::Role;

    const SECRET: &[u8] = b"an-obviously-non-production-secret-key";

    fn admin() -> Usuario {
        Usuario {
            id: 7,
            username: String::from("liga"),
            password: String::new(),
            role: Role::Admin.to_string(),
            activo: true,
            ultimo_login: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn issue_and_verify() {
        let keys = Keys::new(SECRET, 7);

        let token = keys.issue(&admin()).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "liga");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = Keys::new(SECRET, -1);

        let token = keys.issue(&admin()).unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn wrong_key_is_rejected() {
        let keys = Keys::new(SECRET, 7);
        let other = Keys::new(b"a-different-but-equally-fake-secret", 7);

        let token = keys.issue(&admin()).unwrap();

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = Keys::new(SECRET, 7);

        let mut token = keys.issue(&admin()).unwrap();
        token.push('x');

        assert!(keys.verify(&token).is_err());
    }
}
