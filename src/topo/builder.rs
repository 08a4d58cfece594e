//! 拓扑构建
//!
//! 纯函数：请求列表 → 节点列表。相同输入永远得到字段级相同的输出
//! （渲染端依赖逐帧重建不抖动）。

use std::collections::HashMap;
use tracing::trace;

use crate::model::{NetworkRequest, detect_tech};

use super::node::{CLIENT_NODE_ID, NodeKind, TopologyNode, host_node_id, node_kind_of};

/// 客户端节点固定在左缘中部。
const CLIENT_X: f64 = 0.08;
const CLIENT_Y: f64 = 0.5;
const CLIENT_COLOR: &str = "#3b82f6";

/// 远端节点纵向分布带的上下边界。
const HOST_Y_TOP: f64 = 0.12;
const HOST_Y_BOTTOM: f64 = 0.88;

/// 远端节点横向基准位置与按名次取模的微小抖动（避免重叠）。
const HOST_X_BASE: f64 = 0.78;
const HOST_X_JITTER: [f64; 3] = [0.0, 0.045, -0.045];

/// 由当前请求集合重建节点图。
///
/// 恒产出一个客户端节点（请求总数即其计数）；其余按主机名分组，
/// 每个主机一个节点，按请求数降序稳定排序后纵向均匀铺开。
pub fn build_topology(requests: &[NetworkRequest]) -> Vec<TopologyNode> {
    // 按主机名分组，保留首次出现顺序以保证排序稳定可复现。
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (usize, &NetworkRequest)> = HashMap::new();
    for req in requests {
        groups
            .entry(req.hostname.as_str())
            .and_modify(|(count, _)| *count += 1)
            .or_insert_with(|| {
                order.push(req.hostname.as_str());
                (1, req)
            });
    }

    // 名次 = 按请求数降序；计数相同时保持首次出现顺序（稳定排序）。
    let mut hosts: Vec<(&str, usize, &NetworkRequest)> = order
        .iter()
        .map(|h| {
            let (count, first) = groups[h];
            (*h, count, first)
        })
        .collect();
    hosts.sort_by(|a, b| b.1.cmp(&a.1));

    trace!(hosts = hosts.len(), total = requests.len(), "重建拓扑");

    let mut nodes = Vec::with_capacity(hosts.len() + 1);
    nodes.push(TopologyNode {
        id: CLIENT_NODE_ID.to_string(),
        label: "Client".to_string(),
        x: CLIENT_X,
        y: CLIENT_Y,
        kind: NodeKind::Client,
        color: CLIENT_COLOR.to_string(),
        tech: None,
        request_count: requests.len(),
    });

    let n = hosts.len();
    for (rank, (hostname, count, first)) in hosts.into_iter().enumerate() {
        // 分类是 URL 的稳定函数，取该主机首条请求的标签即可。
        let tech = first
            .tech
            .clone()
            .unwrap_or_else(|| detect_tech(&first.url, Some(&first.response_headers)));
        let y = if n == 1 {
            (HOST_Y_TOP + HOST_Y_BOTTOM) / 2.0
        } else {
            HOST_Y_TOP + (HOST_Y_BOTTOM - HOST_Y_TOP) * rank as f64 / (n - 1) as f64
        };
        let x = HOST_X_BASE + HOST_X_JITTER[rank % HOST_X_JITTER.len()];

        nodes.push(TopologyNode {
            id: host_node_id(hostname),
            label: hostname.to_string(),
            x,
            y,
            kind: node_kind_of(tech.category),
            color: tech.color.clone(),
            tech: Some(tech),
            request_count: count,
        });
    }

    nodes
}
