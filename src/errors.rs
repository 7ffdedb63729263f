use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::places::PlacesError;
use crate::store::StoreError;

#[derive(Debug)]
pub(crate) enum AppError {
    Validation(String),
    Configuration(String),
    Upstream(String),
    NotFound(String),
}

impl AppError {
    /// Wraps a row store failure with the operation that was running.
    pub fn store(operation: &str, err: StoreError) -> Self {
        Self::Upstream(format!("Google Sheets {operation} error: {err}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::Configuration(msg) => write!(f, "configuration error: {msg}"),
            Self::Upstream(msg) => write!(f, "upstream error: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Validation(msg) => HttpResponse::BadRequest().json(ErrorBody {
                code: 400,
                message: msg,
            }),
            Self::Configuration(msg) => {
                log::error!("Configuration error: {msg}");
                HttpResponse::InternalServerError().json(ErrorBody {
                    code: 500,
                    message: msg,
                })
            }
            Self::Upstream(msg) => {
                log::error!("Upstream error: {msg}");
                HttpResponse::BadGateway().json(ErrorBody {
                    code: 502,
                    message: msg,
                })
            }
            Self::NotFound(msg) => HttpResponse::NotFound().json(ErrorBody {
                code: 404,
                message: msg,
            }),
        }
    }
}

impl From<PlacesError> for AppError {
    fn from(err: PlacesError) -> Self {
        Self::Upstream(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: u16,
    message: &'a str,
}
