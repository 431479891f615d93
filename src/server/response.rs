// src/server/response.rs

use crate::{error::AppError, models::ErrorResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::Timeout | AppError::NoMediaFound => StatusCode::REQUEST_TIMEOUT,
            AppError::UpstreamFetchFailed(_) | AppError::NetworkMiddleware(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 所有失败都以统一的 JSON 结构返回
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("请求处理失败 ({}): {}", status, self);
        }
        let body = ErrorResponse {
            success: false,
            error: self.kind(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
