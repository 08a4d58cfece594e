//! 请求计时
//!
//! 定义单次 HTTP 交换的各阶段计时。缺失的阶段用 `None` 表示
//! “平台未上报”，不能当作零时长处理。

use serde::{Deserialize, Serialize};

/// 请求各阶段计时（毫秒）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestTiming {
    pub start_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_end: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_start: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_end: Option<f64>,
    /// 总时长（毫秒），恒 ≥ 0。
    pub duration: f64,
}

impl RequestTiming {
    /// 仅有起止时刻的计时（例如桥接消息只报 start/end）。
    pub fn from_bounds(start_ms: f64, end_ms: f64) -> Self {
        Self {
            start_time: start_ms,
            response_end: Some(end_ms),
            duration: (end_ms - start_ms).max(0.0),
            ..Self::default()
        }
    }
}
