// 数据验证工具函数
// 提供输入数据验证和格式检查功能

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;
use crate::error::CheckoutError;
use crate::models::{CheckoutForm, DeliveryMethod};

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| {
        Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid URL regex")
    })
}

fn mobile_regex() -> &'static Regex {
    static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^09\d{8}$").expect("valid mobile regex"))
}

/// 验证URL格式
///
/// # Arguments
/// * `url` - URL字符串
///
/// # Returns
/// * URL是否有效
pub fn validate_url(url: &str) -> bool {
    url_regex().is_match(url)
}

/// 验证台湾手机号码 (09开头共10位)
pub fn validate_mobile_phone(phone: &str) -> bool {
    mobile_regex().is_match(phone)
}

/// 解析付款金额
///
/// # Arguments
/// * `amount` - 查询参数中的金额字符串
///
/// # Returns
/// * 正整数金额；缺失、非整数或不为正时返回 InvalidAmount
pub fn parse_amount(amount: Option<&str>) -> Result<u64, CheckoutError> {
    let amount = amount.map(str::trim).filter(|s| !s.is_empty()).ok_or(CheckoutError::InvalidAmount)?;

    match amount.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value as u64),
        _ => Err(CheckoutError::InvalidAmount),
    }
}

/// 输入验证器
///
/// 按调用顺序记录错误，报告第一条
#[derive(Debug, Default)]
pub struct InputValidator {
    errors: Vec<(String, String)>,
}

impl InputValidator {
    /// 创建新的验证器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加验证错误
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push((field.to_string(), message.to_string()));
    }

    /// 验证必填字段
    pub fn validate_required(&mut self, field: &str, value: Option<&str>, message: &str) {
        if value.map(str::trim).unwrap_or("").is_empty() {
            self.add_error(field, message);
        }
    }

    /// 验证手机号码字段
    pub fn validate_mobile_field(&mut self, field: &str, phone: &str, message: &str) {
        if !phone.is_empty() && !validate_mobile_phone(phone) {
            self.add_error(field, message);
        }
    }

    /// 检查是否有验证错误
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 获取第一个错误消息
    pub fn first_error(&self) -> Option<String> {
        self.errors.first().map(|(_, message)| message.clone())
    }

    /// 转换为结果
    pub fn into_result(self) -> Result<(), CheckoutError> {
        match self.first_error() {
            Some(message) => Err(CheckoutError::Validation(message)),
            None => Ok(()),
        }
    }
}

/// 验证结账表单
///
/// 依序检查收件人、手机、配送信息、付款方式与小计，返回第一个错误
pub fn validate_checkout_form(form: &CheckoutForm) -> Result<(), CheckoutError> {
    let mut validator = InputValidator::new();

    validator.validate_required("recipient_name", Some(form.recipient_name.as_str()), "請填寫收件人姓名");
    validator.validate_required("recipient_phone", Some(form.recipient_phone.as_str()), "請填寫收件人手機號碼");
    validator.validate_mobile_field(
        "recipient_phone",
        form.recipient_phone.trim(),
        "請輸入正確的手機號碼（例如：0912345678）",
    );

    match form.delivery_method {
        DeliveryMethod::HomeDelivery => {
            validator.validate_required("shipping_address", form.shipping_address.as_deref(), "請填寫收件地址");
        }
        DeliveryMethod::StorePickup => {
            validator.validate_required("store_id", form.store_id.as_deref(), "請選擇超商門市");
        }
    }

    validator.validate_required("payment_method", Some(form.payment_method.as_str()), "請選擇付款方式");

    if form.subtotal < Decimal::ZERO {
        validator.add_error("subtotal", "小計金額不可為負數");
    }

    validator.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::dec;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            recipient_name: "王小明".to_string(),
            recipient_phone: "0912345678".to_string(),
            shipping_address: Some("台北市信義區市府路1號".to_string()),
            delivery_method: DeliveryMethod::HomeDelivery,
            store_id: None,
            payment_method: "ecpay".to_string(),
            subtotal: dec("1500"),
            discount_id: None,
        }
    }

    fn first_error(form: &CheckoutForm) -> String {
        match validate_checkout_form(form) {
            Err(CheckoutError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(Some("1500")).unwrap(), 1500);
        assert_eq!(parse_amount(Some(" 20 ")).unwrap(), 20);
        assert!(matches!(parse_amount(Some("0")), Err(CheckoutError::InvalidAmount)));
        assert!(matches!(parse_amount(Some("-5")), Err(CheckoutError::InvalidAmount)));
        assert!(matches!(parse_amount(Some("12.5")), Err(CheckoutError::InvalidAmount)));
        assert!(matches!(parse_amount(Some("abc")), Err(CheckoutError::InvalidAmount)));
        assert!(matches!(parse_amount(Some("")), Err(CheckoutError::InvalidAmount)));
        assert!(matches!(parse_amount(None), Err(CheckoutError::InvalidAmount)));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://shop.example.com"));
        assert!(validate_url("http://localhost:3000"));
        assert!(!validate_url("shop.example.com"));
        assert!(!validate_url("not a url"));
    }

    #[test]
    fn test_validate_mobile_phone() {
        assert!(validate_mobile_phone("0912345678"));
        assert!(!validate_mobile_phone("091234567"));
        assert!(!validate_mobile_phone("0812345678"));
        assert!(!validate_mobile_phone("09123456789"));
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_checkout_form(&valid_form()).is_ok());

        let mut pickup = valid_form();
        pickup.delivery_method = DeliveryMethod::StorePickup;
        pickup.shipping_address = None;
        pickup.store_id = Some("123456".to_string());
        assert!(validate_checkout_form(&pickup).is_ok());
    }

    #[test]
    fn test_first_error_wins() {
        let mut form = valid_form();
        form.recipient_name.clear();
        form.recipient_phone = "123".to_string();
        assert_eq!(first_error(&form), "請填寫收件人姓名");

        let mut form = valid_form();
        form.recipient_phone.clear();
        assert_eq!(first_error(&form), "請填寫收件人手機號碼");

        let mut form = valid_form();
        form.recipient_phone = "0212345678".to_string();
        assert_eq!(first_error(&form), "請輸入正確的手機號碼（例如：0912345678）");
    }

    #[test]
    fn test_delivery_requirements() {
        let mut form = valid_form();
        form.shipping_address = Some("   ".to_string());
        assert_eq!(first_error(&form), "請填寫收件地址");

        let mut form = valid_form();
        form.delivery_method = DeliveryMethod::StorePickup;
        assert_eq!(first_error(&form), "請選擇超商門市");
    }

    #[test]
    fn test_payment_method_and_subtotal() {
        let mut form = valid_form();
        form.payment_method.clear();
        assert_eq!(first_error(&form), "請選擇付款方式");

        let mut form = valid_form();
        form.subtotal = dec("-1");
        assert_eq!(first_error(&form), "小計金額不可為負數");
    }

    #[test]
    fn test_input_validator() {
        let mut validator = InputValidator::new();
        assert!(!validator.has_errors());

        validator.validate_required("name", None, "name required");
        validator.add_error("phone", "phone invalid");
        assert!(validator.has_errors());
        assert_eq!(validator.first_error().as_deref(), Some("name required"));
    }
}
