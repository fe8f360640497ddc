// CORS中间件配置
// 允许前端商城跨域调用结账与优惠券接口

use actix_cors::Cors;
use actix_web::http::header;
use crate::config::Config;

const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost",
    "https://localhost",
    "http://127.0.0.1",
    "https://127.0.0.1",
];

/// 判断是否为本机开发源 (任意端口)
pub fn is_local_origin(origin: &[u8]) -> bool {
    LOCAL_ORIGINS.iter().any(|prefix| {
        origin
            .strip_prefix(prefix.as_bytes())
            .map(|rest| rest.is_empty() || rest.starts_with(b":"))
            .unwrap_or(false)
    })
}

/// 创建CORS中间件
///
/// 开发环境允许本机任意端口；生产环境只允许站点根网址
///
/// # Arguments
/// * `config` - 应用配置
///
/// # Returns
/// * 配置好的CORS中间件
pub fn create_cors(config: &Config) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600);

    if !config.environment.is_production() {
        cors = cors.allowed_origin_fn(|origin, _req_head| is_local_origin(origin.as_bytes()));
    }

    if let Some(base_url) = config.site.base_url.as_deref() {
        cors = cors.allowed_origin(base_url.trim_end_matches('/'));
    }

    cors
}
