// 健康检查API处理器
// 提供服务、数据库与绿界环境的状态查询

use actix_web::{http::StatusCode, HttpResponse, Result as ActixResult};
use serde::Serialize;
use crate::state::AppStateData;

/// 系统健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 服务状态
    pub status: &'static str,
    /// 版本信息
    pub version: &'static str,
    /// 数据库连接状态
    pub database: &'static str,
    /// 绿界环境 (stage/production)
    pub gateway: &'static str,
    /// 当前时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// 基础健康检查
///
/// GET /health
///
/// 无需认证
/// 响应: HealthResponse
pub async fn health_check(data: AppStateData) -> ActixResult<HttpResponse> {
    let mut health = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database: "connected",
        gateway: if data.config.is_stage() { "stage" } else { "production" },
        timestamp: chrono::Utc::now(),
    };

    if let Err(e) = sqlx::query("SELECT 1").fetch_one(&data.db_pool).await {
        log::error!("Database health check failed: {}", e);
        health.database = "disconnected";
        health.status = "unhealthy";
    }

    let status_code = if health.status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(HttpResponse::build(status_code).json(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use crate::state::AppState;

    #[actix_web::test]
    async fn test_health_check_without_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_test()))
                .route("/health", web::get().to(health_check))
        ).await;

        let req = test::TestRequest::get()
            .uri("/health")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"], "disconnected");
        assert_eq!(body["gateway"], "stage");
    }
}
