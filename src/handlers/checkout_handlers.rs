// 结账API处理器
// 购物车第二步: 验证收件资料并试算应付金额

use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use crate::models::{ApiResponse, CheckoutForm};
use crate::state::AppStateData;
use crate::utils::authenticate;

/// 结账金额试算
///
/// POST /api/checkout/quote
///
/// 需要Bearer令牌
/// 请求体: CheckoutForm
/// 响应: ApiResponse<CheckoutQuote>
pub async fn quote_checkout(
    data: AppStateData,
    form: web::Json<CheckoutForm>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let expose_details = data.config.expose_error_details();

    let user_id = match authenticate(&req, &data.config.security.jwt_secret) {
        Ok(user_id) => user_id,
        Err(e) => return Ok(e.to_response(expose_details)),
    };

    match data.checkout_service().quote(user_id, &form).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(ApiResponse::success(quote))),
        Err(e) => {
            if e.status_code().is_server_error() {
                log::error!("Checkout quote failed for user {}: {}", user_id, e);
            } else {
                log::info!("Checkout quote rejected for user {}: {}", user_id, e);
            }
            Ok(e.to_response(expose_details))
        }
    }
}
