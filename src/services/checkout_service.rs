// 结账服务
// 验证收件与配送资料，并计算运费、折抵与应付总额

use rust_decimal::Decimal;
use crate::error::CheckoutError;
use crate::models::{CheckoutForm, CheckoutQuote, DeliveryMethod, UserDiscount};
use crate::services::DiscountService;
use crate::utils::validate_checkout_form;

/// 免运门槛
const FREE_SHIPPING_THRESHOLD: i64 = 2000;

/// 宅配运费
const HOME_DELIVERY_FEE: i64 = 120;

/// 超商取货运费
const STORE_PICKUP_FEE: i64 = 80;

/// 计算运费
pub fn shipping_fee(subtotal: Decimal, method: DeliveryMethod) -> Decimal {
    if subtotal >= Decimal::from(FREE_SHIPPING_THRESHOLD) {
        return Decimal::ZERO;
    }

    match method {
        DeliveryMethod::HomeDelivery => Decimal::from(HOME_DELIVERY_FEE),
        DeliveryMethod::StorePickup => Decimal::from(STORE_PICKUP_FEE),
    }
}

/// 计算结账金额
///
/// # Arguments
/// * `subtotal` - 商品小计
/// * `method` - 配送方式
/// * `discount` - 选用的折扣 (可选)
pub fn calculate_quote(subtotal: Decimal, method: DeliveryMethod, discount: Option<&UserDiscount>) -> CheckoutQuote {
    let discount_amount = discount.map(|d| d.amount_off(subtotal)).unwrap_or(Decimal::ZERO);
    let shipping_fee = shipping_fee(subtotal, method);

    CheckoutQuote {
        subtotal,
        discount: discount_amount,
        discount_id: discount.map(|d| d.id),
        shipping_fee,
        final_total: subtotal - discount_amount + shipping_fee,
    }
}

/// 结账服务
pub struct CheckoutService {
    discounts: DiscountService,
}

impl CheckoutService {
    /// 创建新的结账服务实例
    pub fn new(discounts: DiscountService) -> Self {
        Self { discounts }
    }

    /// 验证表单并试算金额
    ///
    /// 选用的折扣必须属于该用户且尚可使用
    pub async fn quote(&self, user_id: i64, form: &CheckoutForm) -> Result<CheckoutQuote, CheckoutError> {
        validate_checkout_form(form)?;

        let discount = match form.discount_id {
            Some(discount_id) => Some(
                self.discounts
                    .find_available(user_id, discount_id)
                    .await?
                    .ok_or(CheckoutError::UnknownDiscount(discount_id))?,
            ),
            None => None,
        };

        let quote = calculate_quote(form.subtotal, form.delivery_method, discount.as_ref());
        log::info!(
            "Checkout quote for user {}: subtotal={} discount={} shipping={} total={}",
            user_id, quote.subtotal, quote.discount, quote.shipping_fee, quote.final_total
        );

        Ok(quote)
    }
}
