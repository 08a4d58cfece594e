//! 数据模型模块
//!
//! 此模块包含捕获管线的规范化数据模型：请求记录、计时、技术栈分类与标识符。

// 子模块声明
mod id;
mod request;
mod tech;
mod timing;

// 重新导出公共接口
pub use id::{IdGen, RequestId, mix64};
pub use request::{Headers, HttpMethod, NetworkRequest, RequestStatus};
pub use tech::{TechCategory, TechStack, detect_tech, hostname_of};
pub use timing::RequestTiming;
