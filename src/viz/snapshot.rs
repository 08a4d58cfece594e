//! 渲染快照
//!
//! 暴露给渲染消费者的一致性只读视图：同一次重算产出的请求列表、
//! packet 列表、拓扑与统计永远彼此一致。

use serde::Serialize;

use crate::anim::Packet;
use crate::model::NetworkRequest;
use crate::topo::TopologyNode;

use super::stats::DashboardStats;

/// 一次性重算得到的只读快照。
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// 过滤后的请求（最新在前）。
    pub requests: Vec<NetworkRequest>,
    /// 过滤后的在途 packet（所属请求在可见集内）。
    pub packets: Vec<Packet>,
    /// 基于过滤集重建的拓扑。
    pub nodes: Vec<TopologyNode>,
    pub stats: DashboardStats,
    /// 全部请求（未过滤）中出现过的主机名，排序去重。
    pub available_domains: Vec<String>,
    pub domain_filter: Option<String>,
    pub capturing: bool,
    pub bridge_connected: bool,
}
