//! 渲染侧只读视图
//!
//! 设计目标：
//! - **结构化**：渲染端拿 JSON 友好的快照，而不是内部可变状态
//! - **纯派生**：统计与过滤视图都是对 store 的纯重算，不做零散同步

mod snapshot;
mod stats;

pub use snapshot::Snapshot;
pub use stats::{DashboardStats, compute_stats};
