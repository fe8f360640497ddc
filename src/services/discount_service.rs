// 优惠券服务
// 查询用户尚未使用且仍有效的折扣

use sqlx::MySqlPool;
use anyhow::{Result, Context};
use crate::models::UserDiscount;

const AVAILABLE_DISCOUNTS_SQL: &str = r#"
    SELECT
        d.id,
        d.name,
        d.discount_value,
        d.discount_type,
        d.is_active,
        ud.expires_at,
        ud.is_used,
        ud.created_at
    FROM user_discounts AS ud
    JOIN discounts AS d ON ud.discount_id = d.id
    WHERE ud.user_id = ?
      AND ud.is_used = 0
      AND d.is_active = 1
    ORDER BY ud.created_at DESC
"#;

/// 优惠券服务
pub struct DiscountService {
    pool: MySqlPool,
}

impl DiscountService {
    /// 创建新的优惠券服务实例
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// 获取用户可用的折扣，按发放时间倒序
    ///
    /// # Arguments
    /// * `user_id` - 用户ID
    pub async fn list_available(&self, user_id: i64) -> Result<Vec<UserDiscount>> {
        let discounts = sqlx::query_as::<_, UserDiscount>(AVAILABLE_DISCOUNTS_SQL)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch user discounts")?;

        log::debug!("Found {} available discounts for user {}", discounts.len(), user_id);

        Ok(discounts)
    }

    /// 在用户可用的折扣中查找指定ID
    pub async fn find_available(&self, user_id: i64, discount_id: i64) -> Result<Option<UserDiscount>> {
        let discounts = self.list_available(user_id).await?;
        Ok(discounts.into_iter().find(|d| d.id == discount_id))
    }
}
