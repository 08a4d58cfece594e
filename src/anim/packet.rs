//! 动画 packet 令牌
//!
//! 表示一次在途的请求或响应。只按 id 引用记录与目标节点，
//! 渲染时查不到被逐出的目标就直接跳过，不持有活引用。

use serde::{Deserialize, Serialize};

use crate::model::{HttpMethod, RequestId, RequestStatus};

/// packet 方向：去程（请求）或回程（响应）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketDirection {
    Outbound,
    Inbound,
}

/// 一个短暂存在的动画令牌。progress ∈ [0,1]，严格单调，越过 1 即消亡。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub id: String,
    pub request_id: RequestId,
    pub method: HttpMethod,
    /// 创建时刻的状态快照（去程为 pending，回程携带最终结局）。
    pub status: RequestStatus,
    pub direction: PacketDirection,
    pub target_node_id: String,
    pub progress: f64,
}
