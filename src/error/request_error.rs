use crate::response::api_response::ApiErrorResponse;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::error_code;

#[derive(Debug, Error)]
pub enum RequestError {
    // 通用错误
    #[error("common request error:{0}")]
    CommonError(String),
    #[error("signature error")]
    SignatureError,
}

impl RequestError {
    fn get_code(&self) -> u32 {
        match self {
            RequestError::CommonError(_) => error_code::COMMON_REQUEST_ERROR,
            RequestError::SignatureError => error_code::SIGNATURE_ERROR,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            // 签名不合法必须回 401，平台以此校验回调端点
            RequestError::SignatureError => {
                ApiErrorResponse::send(401, self.get_code(), Some(self.to_string()))
            }
            RequestError::CommonError(_) => {
                ApiErrorResponse::send(400, self.get_code(), Some(self.to_string()))
            }
        }
    }
}
