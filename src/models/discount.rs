// 优惠券数据模型
// 用户持有的折扣及其在前台的显示格式

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 百分比折扣的类型标记
const PERCENTAGE: &str = "percentage";

/// 用户可用折扣 (user_discounts JOIN discounts)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserDiscount {
    /// 折扣ID
    pub id: i64,
    /// 折扣名称
    pub name: String,
    /// 折扣数值 (百分比或固定金额)
    pub discount_value: Decimal,
    /// 折扣类型
    pub discount_type: String,
    pub is_active: bool,
    /// 到期时间
    pub expires_at: Option<NaiveDateTime>,
    pub is_used: bool,
    /// 发放时间
    pub created_at: NaiveDateTime,
}

/// 折扣计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountKind {
    /// 按小计百分比折抵
    Percentage,
    /// 固定金额折抵
    FixedAmount,
}

impl UserDiscount {
    pub fn kind(&self) -> DiscountKind {
        if self.discount_type == PERCENTAGE {
            DiscountKind::Percentage
        } else {
            DiscountKind::FixedAmount
        }
    }

    /// 对给定小计的折抵金额，不超过小计本身
    ///
    /// # Arguments
    /// * `subtotal` - 商品小计
    ///
    /// # Returns
    /// * 折抵金额 (保留两位小数)
    pub fn amount_off(&self, subtotal: Decimal) -> Decimal {
        let amount = match self.kind() {
            DiscountKind::Percentage => subtotal * self.discount_value / Decimal::ONE_HUNDRED,
            DiscountKind::FixedAmount => self.discount_value,
        };

        amount.max(Decimal::ZERO).min(subtotal).round_dp(2)
    }

    /// 转换为优惠券显示格式
    ///
    /// 无到期时间时以当天日期显示
    pub fn to_coupon(&self, today: NaiveDate) -> Coupon {
        let value = self.discount_value.normalize();
        Coupon {
            code: self.id.to_string(),
            value: match self.kind() {
                DiscountKind::Percentage => format!("{}%", value),
                DiscountKind::FixedAmount => value.to_string(),
            },
            expiry: self
                .expires_at
                .map(|at| at.date())
                .unwrap_or(today)
                .format("%Y-%m-%d")
                .to_string(),
            status: CouponStatus::Unused,
            note: self.name.clone(),
        }
    }
}

/// 优惠券使用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CouponStatus {
    #[serde(rename = "尚未使用")]
    Unused,
}

/// 优惠券 (显示用)
#[derive(Debug, Clone, Serialize)]
pub struct Coupon {
    pub code: String,
    /// 面额，百分比折扣带%
    pub value: String,
    /// 使用期限 YYYY-MM-DD
    pub expiry: String,
    pub status: CouponStatus,
    /// 备注 (折扣名称)
    pub note: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::str::FromStr;

    pub fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    pub fn discount(id: i64, value: &str, discount_type: &str) -> UserDiscount {
        let created_at = NaiveDate::from_ymd_opt(2025, 5, 1)
            .and_then(|d| d.and_hms_opt(10, 0, 0))
            .unwrap();
        UserDiscount {
            id,
            name: format!("discount-{}", id),
            discount_value: dec(value),
            discount_type: discount_type.to_string(),
            is_active: true,
            expires_at: None,
            is_used: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{dec, discount};
    use super::*;

    #[test]
    fn test_percentage_amount_off() {
        let ten_percent = discount(1, "10.00", "percentage");
        assert_eq!(ten_percent.kind(), DiscountKind::Percentage);
        assert_eq!(ten_percent.amount_off(dec("1500")), dec("150"));
        assert_eq!(ten_percent.amount_off(dec("999")), dec("99.9"));
    }

    #[test]
    fn test_fixed_amount_off_is_capped_by_subtotal() {
        let hundred_off = discount(2, "100", "amount");
        assert_eq!(hundred_off.kind(), DiscountKind::FixedAmount);
        assert_eq!(hundred_off.amount_off(dec("1500")), dec("100"));
        assert_eq!(hundred_off.amount_off(dec("60")), dec("60"));
    }

    #[test]
    fn test_to_coupon() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let mut percentage = discount(3, "15.00", "percentage");
        percentage.name = "夏日Sale".to_string();
        percentage.expires_at = NaiveDate::from_ymd_opt(2025, 8, 31).and_then(|d| d.and_hms_opt(23, 59, 59));
        let coupon = percentage.to_coupon(today);
        assert_eq!(coupon.code, "3");
        assert_eq!(coupon.value, "15%");
        assert_eq!(coupon.expiry, "2025-08-31");
        assert_eq!(coupon.status, CouponStatus::Unused);
        assert_eq!(coupon.note, "夏日Sale");

        let fixed = discount(4, "100.00", "amount").to_coupon(today);
        assert_eq!(fixed.value, "100");
        assert_eq!(fixed.expiry, "2025-06-01");
    }

    #[test]
    fn test_coupon_status_serializes_as_display_text() {
        let coupon = discount(5, "50", "amount").to_coupon(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["status"], "尚未使用");
    }
}
