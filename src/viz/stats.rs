//! 仪表盘统计
//!
//! 对当前（已过滤的）请求集合的纯聚合。所有除法都有零保护：
//! 空集合一律为 0，单条请求的 requests_per_second 定义为 0。

use serde::{Deserialize, Serialize};

use crate::model::NetworkRequest;

/// 聚合统计。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_requests: usize,
    pub success_count: usize,
    pub error_count: usize,
    /// 平均响应时长（毫秒）。
    pub avg_response_time_ms: f64,
    pub total_bytes: u64,
    /// 可见窗口内最旧与最新时间戳跨度推出的吞吐。
    pub requests_per_second: f64,
}

/// 计算聚合统计。输入按最新在前排列（store 的遍历序）。
pub fn compute_stats(requests: &[NetworkRequest]) -> DashboardStats {
    if requests.is_empty() {
        return DashboardStats::default();
    }

    let total = requests.len();
    let success_count = requests.iter().filter(|r| !r.is_error()).count();
    let error_count = total - success_count;
    let total_bytes = requests.iter().map(|r| r.size).sum();
    let avg_response_time_ms =
        requests.iter().map(|r| r.timing.duration).sum::<f64>() / total as f64;

    // 最新在前：首条最新，末条最旧。跨度为 0 或只有一条时吞吐记 0。
    let requests_per_second = if total > 1 {
        let newest = requests[0].timestamp;
        let oldest = requests[total - 1].timestamp;
        let span_ms = newest.saturating_sub(oldest);
        if span_ms == 0 {
            0.0
        } else {
            total as f64 / (span_ms as f64 / 1000.0)
        }
    } else {
        0.0
    };

    DashboardStats {
        total_requests: total,
        success_count,
        error_count,
        avg_response_time_ms,
        total_bytes,
        requests_per_second,
    }
}
