// API路由配置
// 定义所有HTTP接口的路由规则

use actix_web::{web, Scope};
use crate::handlers::*;

/// API路由配置
pub fn api_routes() -> Scope {
    web::scope("/api")
        // 绿界付款路由
        .service(ecpay_routes())
        // 优惠券路由
        .service(discount_routes())
        // 结账路由
        .route("/checkout/quote", web::post().to(quote_checkout))
}

/// 绿界付款路由
fn ecpay_routes() -> Scope {
    web::scope("/ecpay")
        .route("", web::get().to(ecpay_checkout))
        .route("/callback", web::post().to(ecpay_notify))
}

/// 优惠券路由
fn discount_routes() -> Scope {
    web::scope("/user-discounts")
        .route("", web::get().to(list_user_discounts))
        .route("/coupons", web::get().to(list_user_coupons))
}

/// 公共路由 (无需认证)
pub fn public_routes() -> Scope {
    web::scope("")
        .route("/health", web::get().to(health_check))
}
