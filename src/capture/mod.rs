//! 捕获模块
//!
//! 此模块包含三路原始事件源的规范化、去重与捕获会话管理。

// 子模块声明
mod bridge;
mod dedup;
mod normalizer;
mod raw;
mod session;

// 重新导出公共接口
pub use bridge::{BridgeError, BridgeMessage, BridgeRequest, parse_bridge_message};
pub use dedup::DedupTable;
pub use normalizer::Normalizer;
pub use raw::{InterceptedMeta, TimingEntry};
pub use session::CaptureSession;
