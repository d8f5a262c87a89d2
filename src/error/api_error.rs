use crate::error::db_error::DbError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::request_error::RequestError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    RequestError(#[from] RequestError),
    #[error(transparent)]
    DbError(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RequestError(error) => error.into_response(),
            ApiError::DbError(error) => error.into_response(),
        }
    }
}
