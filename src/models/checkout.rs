// 结账数据模型
// 购物车第二步 (收件与配送资料) 的表单与金额试算结果

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 配送方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// 宅配到府
    #[default]
    HomeDelivery,
    /// 超商取货
    StorePickup,
}

/// 结账表单
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutForm {
    /// 收件人姓名
    #[serde(default)]
    pub recipient_name: String,
    /// 收件人手机
    #[serde(default)]
    pub recipient_phone: String,
    /// 收件地址 (宅配必填)
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
    /// 取货门市代号 (超商取货必填)
    pub store_id: Option<String>,
    /// 付款方式
    #[serde(default)]
    pub payment_method: String,
    /// 已选商品小计
    pub subtotal: Decimal,
    /// 选用的优惠券
    pub discount_id: Option<i64>,
}

/// 结账金额试算结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutQuote {
    pub subtotal: Decimal,
    /// 折抵金额
    pub discount: Decimal,
    pub discount_id: Option<i64>,
    /// 运费
    pub shipping_fee: Decimal,
    /// 应付总额 = 小计 - 折抵 + 运费
    pub final_total: Decimal,
}
