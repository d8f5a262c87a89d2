use crate::error::error_code;
use crate::response::api_response::ApiErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// 存储故障，调用方不能当成"没有记录"处理
    #[error("contribution store unavailable: {0}")]
    Unavailable(String),
}

impl DbError {
    fn get_code(&self) -> u32 {
        match self {
            DbError::Unavailable(_) => error_code::STORE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for DbError {
    fn into_response(self) -> Response {
        ApiErrorResponse::send(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            self.get_code(),
            Some(self.to_string()),
        )
    }
}
