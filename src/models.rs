// NEXFIT 结账服务数据模型
// 包含绿界付款参数、用户优惠券、结账表单等核心数据结构

mod checkout;
mod discount;
mod payment;

// 重新导出核心类型
pub use checkout::*;
pub use discount::*;
pub use payment::*;

#[cfg(test)]
pub(crate) use discount::fixtures;

use serde::Serialize;

/// 标准API响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 是否成功
    pub success: bool,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 列表数据的条数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// 提示信息 (优惠券接口的错误格式)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 诊断信息 (仅非生产环境)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// 调试信息 (仅非生产环境)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
    /// 响应时间戳
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
            error: None,
            details: None,
            debug: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建错误响应
    pub fn error(message: &str) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            count: None,
            message: None,
            error: Some(message.to_string()),
            details: None,
            debug: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建以message承载提示的错误响应
    ///
    /// # Arguments
    /// * `message` - 给前台显示的提示
    /// * `error` - 诊断信息 (仅非生产环境)
    pub fn failure(message: &str, error: Option<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            count: None,
            message: Some(message.to_string()),
            error,
            details: None,
            debug: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_debug(mut self, debug: Option<serde_json::Value>) -> Self {
        self.debug = debug;
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// 创建列表响应，附带条数
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        let mut response = Self::success(items);
        response.count = Some(count);
        response
    }
}
