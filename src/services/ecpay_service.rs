// 绿界金流服务
// 负责组装交易参数、计算CheckMacValue、生成跳转表单

use chrono::{DateTime, Duration, Utc};
use crate::config::EcpayConfig;
use crate::error::CheckoutError;
use crate::models::{ChoosePayment, EcpayCheckoutQuery, PaymentRequest, SignedPaymentRequest};
use crate::utils::{parse_amount, render_auto_submit_form, verify_check_mac_value};

/// 单项或未提供商品时使用的商品名称
pub const DEFAULT_ITEM_NAME: &str = "NEXFIT 線上商城購買一批";

/// 交易描述
pub const TRADE_DESC: &str = "商店線上付款";

/// 交易编号前缀
const TRADE_NO_PREFIX: &str = "od";

/// 交易编号取时间戳的末尾位数
const TRADE_NO_DIGITS: usize = 16;

/// 台湾时区偏移 (UTC+8)
const TAIPEI_OFFSET_HOURS: i64 = 8;

/// 由逗号分隔的商品列表得到ItemName
///
/// 多于一项时以#连接，否则使用默认描述
pub fn build_item_name(items: &str) -> String {
    let parts: Vec<&str> = items.split(',').collect();
    if parts.len() > 1 {
        parts.join("#")
    } else {
        DEFAULT_ITEM_NAME.to_string()
    }
}

/// 生成特店交易编号
///
/// 取毫秒时间戳末16位加前缀，不做碰撞检测
pub fn generate_merchant_trade_no(now: DateTime<Utc>) -> String {
    let timestamp = now.timestamp_millis().to_string();
    let start = timestamp.len().saturating_sub(TRADE_NO_DIGITS);
    format!("{}{}", TRADE_NO_PREFIX, &timestamp[start..])
}

/// 格式化交易时间 (台湾时间 yyyy/MM/dd HH:mm:ss)
pub fn format_trade_date(now: DateTime<Utc>) -> String {
    (now.naive_utc() + Duration::hours(TAIPEI_OFFSET_HOURS))
        .format("%Y/%m/%d %H:%M:%S")
        .to_string()
}

/// 绿界金流服务
pub struct EcpayService {
    config: EcpayConfig,
    stage: bool,
}

impl EcpayService {
    /// 创建新的绿界服务实例
    ///
    /// # Arguments
    /// * `config` - 商户参数
    /// * `stage` - 是否使用测试环境
    pub fn new(config: EcpayConfig, stage: bool) -> Self {
        Self { config, stage }
    }

    /// 收银台地址
    pub fn checkout_endpoint(&self) -> String {
        let stage = if self.stage { "-stage" } else { "" };
        format!("https://payment{}.ecpay.com.tw/Cashier/AioCheckOut/V5", stage)
    }

    /// 组装未签名的付款请求
    ///
    /// # Arguments
    /// * `amount` - 交易金额 (已验证为正整数)
    /// * `items` - 逗号分隔的商品名称
    /// * `base_url` - 站点根地址，用于回调与返回地址
    /// * `now` - 交易时间
    pub fn build_payment_request(
        &self,
        amount: u64,
        items: &str,
        base_url: &str,
        now: DateTime<Utc>,
    ) -> PaymentRequest {
        PaymentRequest {
            merchant_id: self.config.merchant_id.clone(),
            merchant_trade_no: generate_merchant_trade_no(now),
            merchant_trade_date: format_trade_date(now),
            total_amount: amount,
            trade_desc: TRADE_DESC.to_string(),
            item_name: build_item_name(items),
            return_url: format!("{}/api/ecpay/callback", base_url),
            client_back_url: format!("{}/shop/checkout/success", base_url),
            choose_payment: ChoosePayment::All,
        }
    }

    /// 以商户HashKey/HashIV签名
    pub fn sign(&self, request: PaymentRequest) -> SignedPaymentRequest {
        request.sign(&self.config.hash_key, &self.config.hash_iv)
    }

    /// 渲染自动提交到收银台的页面
    pub fn render_checkout_page(&self, signed: &SignedPaymentRequest) -> String {
        render_auto_submit_form(&self.checkout_endpoint(), &signed.form_fields())
    }

    /// 处理结账请求: 验证金额 -> 组装 -> 签名
    ///
    /// 金额不合法时在签名前返回 InvalidAmount
    pub fn checkout(
        &self,
        query: &EcpayCheckoutQuery,
        base_url: &str,
        now: DateTime<Utc>,
    ) -> Result<SignedPaymentRequest, CheckoutError> {
        let amount = parse_amount(query.amount.as_deref())?;
        let items = query.items.as_deref().unwrap_or("");

        let request = self.build_payment_request(amount, items, base_url, now);
        Ok(self.sign(request))
    }

    /// 校验绿界付款结果通知的签名
    pub fn verify_notification<K, V, I>(&self, params: I) -> bool
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        verify_check_mac_value(params, &self.config.hash_key, &self.config.hash_iv)
    }
}
