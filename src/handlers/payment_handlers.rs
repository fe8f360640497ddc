// 绿界付款API处理器
// 生成跳转收银台的自动提交表单，接收付款结果通知

use actix_web::{http::header, web, HttpRequest, HttpResponse, Result as ActixResult};
use crate::error::CheckoutError;
use crate::models::EcpayCheckoutQuery;
use crate::state::AppStateData;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

/// 跳转绿界收银台
///
/// GET /api/ecpay?amount=1500&items=A,B,C
///
/// 响应: 自动提交表单的HTML页面
pub async fn ecpay_checkout(
    data: AppStateData,
    query: web::Query<EcpayCheckoutQuery>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let expose_details = data.config.expose_error_details();

    let connection_info = req.connection_info().clone();
    let host = header_str(&req, header::HOST.as_str()).or(Some(connection_info.host()));
    let base_url = match data
        .config
        .site
        .resolve_base_url(host, header_str(&req, "x-forwarded-proto"))
    {
        Some(base_url) => base_url,
        None => {
            let err = CheckoutError::Internal("Unable to determine site base URL".to_string());
            log::error!("ECPay checkout failed: {}", err);
            return Ok(err.to_response(expose_details));
        }
    };

    let service = data.ecpay_service();
    let signed = match service.checkout(&query, &base_url, chrono::Utc::now()) {
        Ok(signed) => signed,
        Err(err) => {
            if err.status_code().is_server_error() {
                log::error!("ECPay checkout failed: {}", err);
            } else {
                log::warn!("Rejected ECPay checkout (amount={:?}): {}", query.amount, err);
            }
            return Ok(err.to_response(expose_details));
        }
    };

    if expose_details {
        let request = signed.request();
        log::debug!(
            "ECPay params: trade_no={} amount={} client_back_url={} return_url={} stage={}",
            request.merchant_trade_no,
            request.total_amount,
            request.client_back_url,
            request.return_url,
            data.config.is_stage()
        );
    }

    log::info!(
        "Redirecting to ECPay: trade_no={} amount={}",
        signed.request().merchant_trade_no,
        signed.request().total_amount
    );

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, NO_CACHE))
        .body(service.render_checkout_page(&signed)))
}

/// 绿界付款结果通知
///
/// POST /api/ecpay/callback
///
/// 请求体: 绿界回传的表单参数 (含CheckMacValue)
/// 响应: 验签成功返回 `1|OK`
pub async fn ecpay_notify(
    data: AppStateData,
    form: web::Form<Vec<(String, String)>>,
) -> ActixResult<HttpResponse> {
    let params = form.into_inner();
    let field = |name: &str| {
        params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    };

    if !data.ecpay_service().verify_notification(params.iter().cloned()) {
        log::warn!(
            "ECPay notification with invalid CheckMacValue: trade_no={}",
            field("MerchantTradeNo")
        );
        return Ok(HttpResponse::BadRequest()
            .content_type("text/plain; charset=utf-8")
            .body("0|CheckMacValue Error"));
    }

    log::info!(
        "ECPay notification: trade_no={} rtn_code={} rtn_msg={} trade_amt={}",
        field("MerchantTradeNo"),
        field("RtnCode"),
        field("RtnMsg"),
        field("TradeAmt")
    );

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("1|OK"))
}
