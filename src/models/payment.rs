// 绿界付款数据模型
// 定义送往绿界全方位金流 (AioCheckOut) 的交易参数

use serde::{Deserialize, Serialize};
use crate::utils::{generate_check_mac_value, CHECK_MAC_VALUE_KEY};

/// 交易类型，固定为aio
pub const PAYMENT_TYPE: &str = "aio";

/// CheckMacValue加密类型，1为SHA256
pub const ENCRYPT_TYPE: &str = "1";

/// 选择的预设付款方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChoosePayment {
    /// 不指定，由消费者在收银台选择
    #[default]
    #[serde(rename = "ALL")]
    All,
    Credit,
    #[serde(rename = "WebATM")]
    WebAtm,
    #[serde(rename = "ATM")]
    Atm,
    #[serde(rename = "CVS")]
    Cvs,
    #[serde(rename = "BARCODE")]
    Barcode,
    ApplePay,
}

impl ChoosePayment {
    /// 网关要求的参数值
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoosePayment::All => "ALL",
            ChoosePayment::Credit => "Credit",
            ChoosePayment::WebAtm => "WebATM",
            ChoosePayment::Atm => "ATM",
            ChoosePayment::Cvs => "CVS",
            ChoosePayment::Barcode => "BARCODE",
            ChoosePayment::ApplePay => "ApplePay",
        }
    }
}

/// 未签名的付款请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// 特店编号
    pub merchant_id: String,
    /// 特店交易编号 (最长20字符)
    pub merchant_trade_no: String,
    /// 交易时间 yyyy/MM/dd HH:mm:ss
    pub merchant_trade_date: String,
    /// 交易金额 (正整数，新台币)
    pub total_amount: u64,
    /// 交易描述
    pub trade_desc: String,
    /// 商品名称，多项以#分隔
    pub item_name: String,
    /// 付款结果通知地址
    pub return_url: String,
    /// 付款完成后返回商店的地址
    pub client_back_url: String,
    pub choose_payment: ChoosePayment,
}

impl PaymentRequest {
    /// 按网关字段名展开全部参数
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("MerchantID", self.merchant_id.clone()),
            ("MerchantTradeNo", self.merchant_trade_no.clone()),
            ("MerchantTradeDate", self.merchant_trade_date.clone()),
            ("PaymentType", PAYMENT_TYPE.to_string()),
            ("EncryptType", ENCRYPT_TYPE.to_string()),
            ("TotalAmount", self.total_amount.to_string()),
            ("TradeDesc", self.trade_desc.clone()),
            ("ItemName", self.item_name.clone()),
            ("ReturnURL", self.return_url.clone()),
            ("ChoosePayment", self.choose_payment.as_str().to_string()),
            ("ClientBackURL", self.client_back_url.clone()),
        ]
    }

    /// 计算CheckMacValue并生成已签名请求
    pub fn sign(self, hash_key: &str, hash_iv: &str) -> SignedPaymentRequest {
        let check_mac_value = generate_check_mac_value(self.to_params(), hash_key, hash_iv);
        SignedPaymentRequest {
            request: self,
            check_mac_value,
        }
    }
}

/// 已签名的付款请求
///
/// 字段不可变，签名与参数始终一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPaymentRequest {
    request: PaymentRequest,
    check_mac_value: String,
}

impl SignedPaymentRequest {
    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    pub fn check_mac_value(&self) -> &str {
        &self.check_mac_value
    }

    /// 表单字段，CheckMacValue位于最后
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = self.request.to_params();
        fields.push((CHECK_MAC_VALUE_KEY, self.check_mac_value.clone()));
        fields
    }
}

/// GET /api/ecpay 查询参数
#[derive(Debug, Default, Deserialize)]
pub struct EcpayCheckoutQuery {
    /// 金额 (整数字符串)
    pub amount: Option<String>,
    /// 逗号分隔的商品名称
    pub items: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            merchant_id: "3002607".to_string(),
            merchant_trade_no: "od1234567890123456".to_string(),
            merchant_trade_date: "2024/01/01 12:00:00".to_string(),
            total_amount: 1000,
            trade_desc: "商店線上付款".to_string(),
            item_name: "A#B#C".to_string(),
            return_url: "https://shop.example.com/api/ecpay/callback".to_string(),
            client_back_url: "https://shop.example.com/shop/checkout/success".to_string(),
            choose_payment: ChoosePayment::All,
        }
    }

    #[test]
    fn test_sign_matches_reference_value() {
        let signed = request().sign("pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs");
        assert_eq!(
            signed.check_mac_value(),
            "244092609FFE534EB98B555FE555498482B14E6070140F769DE3A19CC44F360E"
        );
        assert_eq!(signed.request(), &request());
    }

    #[test]
    fn test_form_fields_end_with_check_mac_value() {
        let signed = request().sign("pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs");
        let fields = signed.form_fields();

        assert_eq!(fields.len(), 12);
        assert_eq!(fields[0], ("MerchantID", "3002607".to_string()));
        assert!(fields.contains(&("PaymentType", "aio".to_string())));
        assert!(fields.contains(&("EncryptType", "1".to_string())));
        assert_eq!(fields[11].0, "CheckMacValue");
        assert_eq!(fields[11].1, signed.check_mac_value());
    }

    #[test]
    fn test_mutated_request_signs_differently() {
        let original = request().sign("pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs");

        let mut changed = request();
        changed.total_amount = 1001;
        let changed = changed.sign("pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs");

        assert_ne!(original.check_mac_value(), changed.check_mac_value());
    }

    #[test]
    fn test_choose_payment_values() {
        assert_eq!(ChoosePayment::default().as_str(), "ALL");
        assert_eq!(ChoosePayment::WebAtm.as_str(), "WebATM");
        assert_eq!(
            serde_json::to_string(&ChoosePayment::Cvs).unwrap(),
            "\"CVS\""
        );
    }
}
