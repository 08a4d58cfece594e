//! 捕获会话
//!
//! 每会话构造一次的捕获对象：统一三路生产者的入口，持有暂停/恢复
//! 状态、去重表与规范化器。取代原实现里模块级的共享回调指针。
//!
//! 暂停语义：生产者照常推送、去重照常登记，但不再向下游放行新记录；
//! 恢复不重置任何状态。

use tracing::{debug, info, trace};

use crate::model::NetworkRequest;

use super::bridge::BridgeMessage;
use super::dedup::DedupTable;
use super::normalizer::Normalizer;
use super::raw::{InterceptedMeta, TimingEntry};

/// 被无条件丢弃的 URL 前缀：data: URI 与扩展内部资源。
const SKIP_PREFIXES: [&str; 3] = ["data:", "chrome-extension:", "moz-extension:"];

/// 捕获会话。所有生产者推送都经由本对象，单逻辑线程内非重入。
#[derive(Debug, Default)]
pub struct CaptureSession {
    normalizer: Normalizer,
    dedup: DedupTable,
    capturing: bool,
    bridge_connected: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            capturing: true,
            ..Self::default()
        }
    }

    /// 生产者 A：同步调用拦截。
    pub fn on_intercepted(&mut self, meta: InterceptedMeta) -> Option<NetworkRequest> {
        if Self::should_skip(&meta.url) {
            trace!(url = %meta.url, "跳过内部 URL");
            return None;
        }
        if meta.status_code == 0 && !self.dedup.check_and_insert(&meta.url, meta.timestamp as f64) {
            debug!(url = %meta.url, "重复的失败观测，丢弃");
            return None;
        }
        let req = self.normalizer.push_intercepted(meta);
        self.gate(req)
    }

    /// 生产者 B：平台性能计时条目（缓冲流，权威 timing/size 来源）。
    pub fn on_timing_entry(&mut self, entry: &TimingEntry, now_ms: u64) -> Option<NetworkRequest> {
        if Self::should_skip(&entry.name) {
            trace!(url = %entry.name, "跳过内部 URL");
            return None;
        }
        if !self.dedup.check_and_insert(&entry.name, entry.start_time) {
            debug!(url = %entry.name, start = entry.start_time, "重复的计时条目，丢弃");
            return None;
        }
        let req = self.normalizer.from_timing_entry(entry, now_ms);
        self.gate(Some(req))
    }

    /// 生产者 C：跨标签页桥接（可选，随时连断）。
    pub fn on_bridge_message(&mut self, msg: &BridgeMessage) -> Option<NetworkRequest> {
        match msg {
            BridgeMessage::Ready => {
                info!("🔌 桥接已连接");
                self.bridge_connected = true;
                None
            }
            BridgeMessage::Disconnected => {
                info!("🔌 桥接已断开，降级为单标签页捕获");
                self.bridge_connected = false;
                None
            }
            BridgeMessage::Request(req) => {
                if Self::should_skip(&req.url) {
                    return None;
                }
                if !self.dedup.check_and_insert(&req.url, req.start_time) {
                    debug!(url = %req.url, "桥接消息与已见观测重复，丢弃");
                    return None;
                }
                let record = self.normalizer.from_bridge(req);
                self.gate(Some(record))
            }
        }
    }

    /// 暂停/恢复捕获。暂停只拦住新记录，不触碰既有状态。
    pub fn set_capturing(&mut self, capturing: bool) {
        info!(capturing, "捕获开关切换");
        self.capturing = capturing;
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn bridge_connected(&self) -> bool {
        self.bridge_connected
    }

    /// 暂停时丢弃产出的记录。
    fn gate(&self, req: Option<NetworkRequest>) -> Option<NetworkRequest> {
        if self.capturing { req } else { None }
    }

    fn should_skip(url: &str) -> bool {
        SKIP_PREFIXES.iter().any(|p| url.starts_with(p))
    }
}
