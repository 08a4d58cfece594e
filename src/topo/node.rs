//! 拓扑节点类型
//!
//! 定义可视化图中的顶点：本地客户端或一个远端主机。

use serde::{Deserialize, Serialize};

use crate::model::{TechCategory, TechStack};

/// 唯一的本地客户端节点 id。
pub const CLIENT_NODE_ID: &str = "client";

/// 节点类型（用于可视化区分客户端/服务器/CDN/API）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Client,
    Server,
    Cdn,
    Api,
}

/// 可视化图中的一个顶点。坐标为 0–1 归一化布局坐标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    /// "client" 或由主机名派生的稳定键。
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub kind: NodeKind,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<TechStack>,
    /// 命中该主机的请求数。
    pub request_count: usize,
}

/// 远端主机节点的稳定派生键。
pub fn host_node_id(hostname: &str) -> String {
    format!("host-{hostname}")
}

/// 技术栈大类到节点类型的映射。
pub fn node_kind_of(category: TechCategory) -> NodeKind {
    match category {
        TechCategory::Cdn | TechCategory::Font => NodeKind::Cdn,
        TechCategory::Api | TechCategory::Analytics => NodeKind::Api,
        _ => NodeKind::Server,
    }
}
