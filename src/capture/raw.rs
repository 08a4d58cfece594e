//! 原始捕获事件
//!
//! 定义两个页面内生产者产出的原始形态：同步调用拦截元数据与
//! 平台性能计时条目。第三路（跨标签页桥接）见 `bridge` 模块。

use serde::{Deserialize, Serialize};

use crate::model::{Headers, HttpMethod};

/// 调用拦截生产者捕获的元数据（方法、头部、载荷与最终状态码）。
///
/// `status_code == 0` 表示传输层失败（无响应）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptedMeta {
    pub url: String,
    pub method: HttpMethod,
    pub status_code: u16,
    #[serde(default)]
    pub request_headers: Headers,
    #[serde(default)]
    pub response_headers: Headers,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// 拦截时刻（epoch 毫秒）。
    pub timestamp: u64,
}

/// 平台性能计时条目（resource timing）。
///
/// 平台约定：未上报的阶段字段为 0.0，规范化时转为 `None`；
/// 这里保留原始形态，不做解释。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingEntry {
    /// 条目名即请求的绝对 URL。
    pub name: String,
    pub start_time: f64,
    pub duration: f64,
    pub domain_lookup_start: f64,
    pub domain_lookup_end: f64,
    pub connect_start: f64,
    pub connect_end: f64,
    pub secure_connection_start: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub transfer_size: u64,
    pub encoded_body_size: u64,
    #[serde(default)]
    pub initiator_type: String,
    #[serde(default)]
    pub next_hop_protocol: String,
}
