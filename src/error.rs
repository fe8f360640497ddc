// 错误类型定义
// 结账流程中所有可预期的失败情形，以及到HTTP状态码的映射

use actix_web::{http::StatusCode, HttpResponse};
use thiserror::Error;
use crate::models::ApiResponse;

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// 金额缺失、非整数或不为正
    #[error("Invalid amount parameter")]
    InvalidAmount,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Discount {0} is not available")]
    UnknownDiscount(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// 对应的HTTP状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::InvalidAmount
            | CheckoutError::Validation(_)
            | CheckoutError::UnknownDiscount(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            CheckoutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 转换为JSON错误响应
    ///
    /// # Arguments
    /// * `expose_details` - 是否在响应体中附带诊断信息 (仅非生产环境)
    pub fn to_response(&self, expose_details: bool) -> HttpResponse {
        let body = match self {
            CheckoutError::Internal(details) => ApiResponse::<()>::error("Internal server error")
                .with_details(expose_details.then(|| details.clone())),
            other => ApiResponse::<()>::error(&other.to_string()),
        };

        HttpResponse::build(self.status_code()).json(body)
    }

    /// 转换为 `{success, message, error?}` 格式的错误响应
    ///
    /// # Arguments
    /// * `internal_message` - 内部错误时给前台的提示
    /// * `expose_details` - 是否在error字段附带诊断信息 (仅非生产环境)
    pub fn to_message_response(&self, internal_message: &str, expose_details: bool) -> HttpResponse {
        let body = match self {
            CheckoutError::Internal(details) => {
                ApiResponse::<()>::failure(internal_message, expose_details.then(|| details.clone()))
            }
            other => ApiResponse::<()>::failure(&other.to_string(), None),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<anyhow::Error> for CheckoutError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} 保留 context 链
        CheckoutError::Internal(format!("{:#}", err))
    }
}
