//! 可视化世界
//!
//! 单逻辑线程的核心引擎：把捕获会话、请求存储与 packet 动画器
//! 组合在一起。两个独立时钟驱动它——事件到达时生产者推送，
//! 渲染时钟按帧调用 [`VizWorld::tick`]。
//!
//! 共享可变状态只有 store 与在途 packet 集合；所有派生视图
//! （过滤列表、拓扑、统计）按版本号在读取时整体重算，杜绝
//! 零散同步造成的视图漂移。

use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

use crate::anim::{Animator, Packet};
use crate::capture::{
    BridgeError, BridgeMessage, CaptureSession, InterceptedMeta, TimingEntry, parse_bridge_message,
};
use crate::model::NetworkRequest;
use crate::store::RequestStore;
use crate::topo::build_topology;
use crate::viz::{Snapshot, compute_stats};

/// 核心引擎。非重入：每个生产者回调在让出前完整落账。
pub struct VizWorld {
    capture: CaptureSession,
    store: RequestStore,
    anim: Animator,
    filter: Option<String>,
    version: u64,
    cache: Option<(u64, Snapshot)>,
}

impl Default for VizWorld {
    fn default() -> Self {
        Self::with_cap(crate::store::DEFAULT_MAX_REQUESTS)
    }
}

impl VizWorld {
    /// 指定存储上限构建。
    pub fn with_cap(cap: usize) -> Self {
        Self {
            capture: CaptureSession::new(),
            store: RequestStore::with_cap(cap),
            anim: Animator::default(),
            filter: None,
            version: 0,
            cache: None,
        }
    }

    // --- 生产者入口 ---

    /// 生产者 A：同步调用拦截元数据。
    pub fn on_intercepted(&mut self, meta: InterceptedMeta) {
        if let Some(req) = self.capture.on_intercepted(meta) {
            self.admit(req);
        }
    }

    /// 生产者 B：平台性能计时条目。`now_ms` 为到达时刻（epoch 毫秒）。
    pub fn on_timing_entry(&mut self, entry: &TimingEntry, now_ms: u64) {
        if let Some(req) = self.capture.on_timing_entry(entry, now_ms) {
            self.admit(req);
        }
    }

    /// 生产者 C：桥接消息（含生命周期消息）。
    pub fn on_bridge_message(&mut self, msg: &BridgeMessage) {
        let req = self.capture.on_bridge_message(msg);
        // 生命周期消息改变 bridge_connected，也要让快照感知。
        self.bump();
        if let Some(req) = req {
            self.admit(req);
        }
    }

    /// 解码一条原始桥接消息并处理。
    pub fn on_bridge_raw(&mut self, raw: &str) -> Result<(), BridgeError> {
        let msg = parse_bridge_message(raw)?;
        self.on_bridge_message(&msg);
        Ok(())
    }

    // --- 渲染时钟 ---

    /// 动画 tick。`now_ms` 为渲染时钟的当前时刻（毫秒，单调）。
    pub fn tick(&mut self, now_ms: f64) {
        self.anim.tick(now_ms);
        self.bump();
    }

    // --- 命令 ---

    /// 暂停/恢复捕获。暂停后在途 packet 继续动画至消亡。
    pub fn set_capturing(&mut self, capturing: bool) {
        self.capture.set_capturing(capturing);
        self.bump();
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    /// 设置域名过滤；`None` 为显示全部。
    pub fn set_filter(&mut self, hostname: Option<String>) {
        debug!(filter = ?hostname, "设置域名过滤");
        self.filter = hostname;
        self.bump();
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// 立即且彻底的清空：请求、packet 与一切派生视图同一次更新内归零。
    pub fn clear(&mut self) {
        info!("🧹 清空可视化世界");
        self.store.clear();
        self.anim.clear();
        self.bump();
    }

    // --- 只读访问 ---

    pub fn store(&self) -> &RequestStore {
        &self.store
    }

    pub fn packets(&self) -> &[Packet] {
        self.anim.active()
    }

    pub fn bridge_connected(&self) -> bool {
        self.capture.bridge_connected()
    }

    /// 渲染快照。按版本号缓存：状态未变时返回同一份重算结果，
    /// 任何变更后都基于新状态整体重算（绝不提供过期视图）。
    pub fn snapshot(&mut self) -> &Snapshot {
        let version = self.version;
        if self.cache.as_ref().map(|(v, _)| *v) != Some(version) {
            let snap = self.rebuild();
            self.cache = Some((version, snap));
        }
        &self.cache.as_ref().expect("cache populated above").1
    }

    // --- 内部 ---

    /// 落账一条新记录：入库并生成动画 packet。
    #[tracing::instrument(skip(self, req), fields(id = %req.id, hostname = %req.hostname, status_code = req.status_code))]
    fn admit(&mut self, req: NetworkRequest) {
        info!("📨 新请求落账");
        self.anim.spawn_for_request(&req, self.anim.now());
        self.store.add(req);
        self.bump();
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn rebuild(&self) -> Snapshot {
        let requests: Vec<NetworkRequest> = self
            .store
            .iter()
            .filter(|r| self.filter.as_deref().is_none_or(|f| r.hostname == f))
            .cloned()
            .collect();

        let visible: HashSet<_> = requests.iter().map(|r| &r.id).collect();
        let packets: Vec<Packet> = self
            .anim
            .active()
            .iter()
            .filter(|p| visible.contains(&p.request_id))
            .cloned()
            .collect();

        let nodes = build_topology(&requests);
        let stats = compute_stats(&requests);
        let available_domains: Vec<String> = self
            .store
            .iter()
            .map(|r| r.hostname.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Snapshot {
            requests,
            packets,
            nodes,
            stats,
            available_domains,
            domain_filter: self.filter.clone(),
            capturing: self.capture.is_capturing(),
            bridge_connected: self.capture.bridge_connected(),
        }
    }
}
