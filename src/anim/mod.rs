//! 动画模块
//!
//! 此模块包含在途 packet 令牌与按渲染时钟推进它们的动画器。

// 子模块声明
mod animator;
mod packet;

// 重新导出公共接口
pub use animator::{
    Animator, DEFAULT_RESPONSE_DELAY_MS, PROGRESS_PER_MS, RESPONSE_DELAY_FACTOR,
    RESPONSE_DELAY_MAX_MS, RESPONSE_DELAY_MIN_MS, response_delay_ms,
};
pub use packet::{Packet, PacketDirection};
