use actix_threadpool::BlockingError;
use actix_web::{error::ResponseError, HttpResponse};
use derive_more::Display;
use diesel::result::{DatabaseErrorKind, Error as DBError};
use std::convert::From;

use crate::models::ApiResponse;

#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "Error interno del servidor")]
    InternalServerError,

    #[display(fmt = "{}", _0)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    Conflict(String),

    #[display(fmt = "Acceso no autorizado")]
    Unauthorized,

    #[display(fmt = "{}", _0)]
    Forbidden(String),

    #[display(fmt = "Recurso no encontrado")]
    NotFound,
}

impl std::error::Error for ServiceError {}

// convert our errors into http responses with the shared envelope
impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        let body = ApiResponse::error(self.to_string());

        match self {
            ServiceError::InternalServerError => HttpResponse::InternalServerError().json(body),
            ServiceError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            ServiceError::Conflict(_) => HttpResponse::Conflict().json(body),
            ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
            ServiceError::Forbidden(_) => HttpResponse::Forbidden().json(body),
            ServiceError::NotFound => HttpResponse::NotFound().json(body),
        }
    }
}

impl From<DBError> for ServiceError {
    fn from(error: DBError) -> ServiceError {
        match error {
            DBError::NotFound => ServiceError::NotFound,
            DBError::DatabaseError(kind, info) => {
                // the client only gets a generic message, the detail stays in the logs
                error!("database error: {}", info.message());
                match kind {
                    DatabaseErrorKind::UniqueViolation => {
                        ServiceError::Conflict("El registro ya existe".to_string())
                    }
                    DatabaseErrorKind::ForeignKeyViolation => {
                        ServiceError::BadRequest("Referencia inválida".to_string())
                    }
                    _ => ServiceError::InternalServerError,
                }
            }
            _ => {
                error!("database error: {}", error);
                ServiceError::InternalServerError
            }
        }
    }
}

impl From<r2d2::Error> for ServiceError {
    fn from(error: r2d2::Error) -> ServiceError {
        error!("r2d2 connection pool error: {}", error);
        ServiceError::InternalServerError
    }
}

impl From<BlockingError<ServiceError>> for ServiceError {
    fn from(error: BlockingError<ServiceError>) -> ServiceError {
        match error {
            BlockingError::Error(e) => e,
            BlockingError::Canceled => {
                error!("thread pool is gone, unable to execute the query");
                ServiceError::InternalServerError
            }
        }
    }
}

impl From<argon2::Error> for ServiceError {
    fn from(error: argon2::Error) -> ServiceError {
        error!("argon2 error: {}", error);
        ServiceError::InternalServerError
    }
}
