// 服务层模块
// 包含所有业务逻辑服务

pub mod checkout_service;
pub mod discount_service;
pub mod ecpay_service;

// 重新导出服务
pub use checkout_service::CheckoutService;
pub use discount_service::DiscountService;
pub use ecpay_service::EcpayService;
