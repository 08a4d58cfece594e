//! 拓扑模块
//!
//! 由当前（可过滤的）请求集合派生节点图：一个客户端节点加每个
//! 远端主机一个节点。纯派生状态，随集合变化整体重建，从不持久化。

// 子模块声明
mod builder;
mod node;

// 重新导出公共接口
pub use builder::build_topology;
pub use node::{CLIENT_NODE_ID, NodeKind, TopologyNode, host_node_id, node_kind_of};
