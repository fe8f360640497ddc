// 工具函数模块
// 包含签名、认证、验证、HTML渲染等通用工具

pub mod crypto;
pub mod auth;
pub mod html;
pub mod validation;

// 重新导出常用函数
pub use crypto::*;
pub use auth::*;
pub use html::*;
pub use validation::*;
