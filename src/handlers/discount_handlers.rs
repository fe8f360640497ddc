// 优惠券API处理器
// 查询当前用户可用的折扣

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use crate::error::CheckoutError;
use crate::models::{ApiResponse, Coupon, UserDiscount};
use crate::state::AppStateData;
use crate::utils::authenticate;

/// 内部错误时给前台的提示
const FETCH_FAILED: &str = "Failed to fetch user discounts";

/// 认证并查询可用折扣，失败时直接给出错误响应
async fn load_discounts(
    data: &AppStateData,
    req: &HttpRequest,
) -> Result<(i64, Vec<UserDiscount>), HttpResponse> {
    let expose_details = data.config.expose_error_details();

    let user_id = authenticate(req, &data.config.security.jwt_secret)
        .map_err(|e| e.to_message_response(FETCH_FAILED, expose_details))?;

    match data.discount_service().list_available(user_id).await {
        Ok(discounts) => Ok((user_id, discounts)),
        Err(e) => {
            log::error!("Failed to fetch discounts for user {}: {:#}", user_id, e);
            Err(CheckoutError::from(e).to_message_response(FETCH_FAILED, expose_details))
        }
    }
}

fn debug_info(data: &AppStateData, user_id: i64) -> Option<serde_json::Value> {
    data.config.expose_error_details().then(|| {
        serde_json::json!({
            "userId": user_id,
            "queryExecuted": true,
            "timestamp": Utc::now(),
        })
    })
}

/// 获取用户可用折扣
///
/// GET /api/user-discounts
///
/// 需要Bearer令牌
/// 响应: ApiResponse<Vec<UserDiscount>>
pub async fn list_user_discounts(
    data: AppStateData,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let (user_id, discounts) = match load_discounts(&data, &req).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::list(discounts).with_debug(debug_info(&data, user_id))))
}

/// 获取用户优惠券 (显示格式)
///
/// GET /api/user-discounts/coupons
///
/// 需要Bearer令牌
/// 响应: ApiResponse<Vec<Coupon>>
pub async fn list_user_coupons(
    data: AppStateData,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let (_, discounts) = match load_discounts(&data, &req).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    let today = Utc::now().date_naive();
    let coupons: Vec<Coupon> = discounts.iter().map(|d| d.to_coupon(today)).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::list(coupons)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use crate::state::AppState;
    use crate::utils::generate_jwt_token;

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_test()))
                .route("/api/user-discounts", web::get().to(list_user_discounts))
                .route("/api/user-discounts/coupons", web::get().to(list_user_coupons))
        ).await;

        for uri in ["/api/user-discounts", "/api/user-discounts/coupons"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 401);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "未授權訪問");
            assert!(body.get("error").is_none());
        }
    }

    #[actix_web::test]
    async fn test_invalid_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_test()))
                .route("/api/user-discounts", web::get().to(list_user_discounts))
        ).await;

        let req = test::TestRequest::get()
            .uri("/api/user-discounts")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "無效的 Token");
    }

    #[actix_web::test]
    async fn test_database_failure_is_internal_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_test()))
                .route("/api/user-discounts", web::get().to(list_user_discounts))
        ).await;

        let token = generate_jwt_token(1, "test_jwt_secret");
        let req = test::TestRequest::get()
            .uri("/api/user-discounts")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], FETCH_FAILED);
        // 开发环境附带诊断信息
        assert!(body["error"].as_str().unwrap().contains("Failed to fetch user discounts"));
    }
}
