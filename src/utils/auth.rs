// 认证工具函数
// 从请求中提取Bearer令牌并校验JWT，取得用户ID

use actix_web::HttpRequest;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use crate::error::CheckoutError;

const UNAUTHORIZED: &str = "未授權訪問";
const INVALID_TOKEN: &str = "無效的 Token";

/// 登录令牌中的声明
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// 用户ID
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
    /// 过期时间
    pub exp: i64,
}

/// 从Authorization头部提取Bearer令牌
pub fn extract_bearer_token(req: &HttpRequest) -> Result<String, CheckoutError> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.split_whitespace().nth(1))
        .map(|token| token.to_string())
        .ok_or_else(|| CheckoutError::Unauthorized(UNAUTHORIZED.to_string()))
}

/// 验证JWT令牌
///
/// # Arguments
/// * `token` - JWT令牌
/// * `secret` - JWT密钥
///
/// # Returns
/// * 用户ID
pub fn verify_jwt_token(token: &str, secret: &str) -> Result<i64, CheckoutError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        log::warn!("Rejected JWT: {}", e);
        CheckoutError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    token_data
        .claims
        .user_id
        .ok_or_else(|| CheckoutError::Unauthorized(UNAUTHORIZED.to_string()))
}

/// 认证请求，返回当前用户ID
pub fn authenticate(req: &HttpRequest, secret: &str) -> Result<i64, CheckoutError> {
    let token = extract_bearer_token(req)?;
    verify_jwt_token(&token, secret)
}

/// 生成JWT令牌 (测试用)
#[cfg(test)]
pub fn generate_jwt_token(user_id: i64, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        user_id: Some(user_id),
        exp: (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref()))
        .expect("failed to encode test token")
}
