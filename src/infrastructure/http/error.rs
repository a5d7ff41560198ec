//! HTTP Error Handling
//!
//! 400 携带具体原因，500 只返回接口固定的提示语，细节只进日志

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 请求体格式错误或字段校验失败
    BadRequest(String),
    /// 其他失败，对外只暴露固定提示语
    Internal(&'static str),
}

impl ApiError {
    /// 把应用层错误映射为接口错误，`generic` 是该接口固定的失败提示
    pub fn from_application(err: ApplicationError, generic: &'static str) -> Self {
        if err.is_client_error() {
            tracing::warn!(error = %err, "Request rejected");
            return ApiError::BadRequest(err.to_string());
        }
        tracing::error!(error = %err, message = generic, "Request failed");
        ApiError::Internal(generic)
    }

    /// 绑定固定提示语，供 `map_err` 使用
    pub fn with(generic: &'static str) -> impl Fn(ApplicationError) -> ApiError {
        move |err| ApiError::from_application(err, generic)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Malformed JSON body");
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON 请求体提取器，格式错误返回 400 `{error}`
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
