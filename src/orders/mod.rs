//! 订单模块 - 订单生命周期状态机
//!
//! - [`OrderStatus`] - 状态枚举与转换表 (唯一的合法性规则来源)
//! - [`OrderLifecycle`] - 下单与状态转换服务

pub mod lifecycle;
pub mod status;

pub use lifecycle::{CustomerInfo, LifecycleError, OrderLifecycle, OrderLineInput};
pub use status::OrderStatus;
