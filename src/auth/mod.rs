mod token;
pub mod routes;

pub use token::{Claims, Keys};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::errors::ServiceError;
use crate::usuarios::Role;

/// The verified identity of the caller, extracted from the
/// `Authorization: Bearer` header of a protected request.
#[derive(Debug)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl FromRequest for AuthUser {
    type Error = ServiceError;
    type Future = Ready<Result<AuthUser, ServiceError>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ServiceError> {
    let claims = token::verify(bearer_token(req)?)?;

    Ok(AuthUser {
        id: claims.sub,
        username: claims.username,
        role: claims.role,
    })
}

fn bearer_token(req: &HttpRequest) -> Result<&str, ServiceError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(ServiceError::Unauthorized)
}

/// check that the authenticated caller has the admin role
pub fn verify_admin(user: &AuthUser) -> Result<(), ServiceError> {
    if user.role != Role::Admin.to_string() {
        forbidden!("Se requieren permisos de administrador");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_and_malformed_headers() {
        let req = TestRequest::default().to_http_request();
        assert!(bearer_token(&req).is_err());

        let req = TestRequest::default()
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .to_http_request();
        assert!(bearer_token(&req).is_err());
    }

    #[test]
    fn bearer_header_is_stripped() {
        let req = TestRequest::default()
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .to_http_request();

        assert_eq!(bearer_token(&req).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn only_admins_pass_the_role_check() {
        let admin = AuthUser {
            id: 1,
            username: String::from("liga"),
            role: Role::Admin.to_string(),
        };
        let user = AuthUser {
            id: 2,
            username: String::from("mirón"),
            role: Role::User.to_string(),
        };

        assert!(verify_admin(&admin).is_ok());
        assert!(matches!(
            verify_admin(&user),
            Err(ServiceError::Forbidden(_))
        ));
    }
}
