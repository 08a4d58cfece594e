//! packet 动画器
//!
//! 维护在途 packet 集合并按动画 tick 推进。推进量 = 两次 tick 的
//! 实测间隔 × 速率常数，与刷新率无关。回程 packet 的延迟生成用
//! (时间, 序号) 最小堆调度。

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

use crate::model::{IdGen, NetworkRequest, RequestStatus};
use crate::topo::host_node_id;

use super::packet::{Packet, PacketDirection};

/// 每毫秒推进的 progress 量（约 55 fps 下每帧 0.018 的等效值）。
pub const PROGRESS_PER_MS: f64 = 0.0011;

/// 回程延迟 = 观测时长 × 系数，夹在上下界之间。
pub const RESPONSE_DELAY_FACTOR: f64 = 0.6;
pub const RESPONSE_DELAY_MIN_MS: f64 = 100.0;
pub const RESPONSE_DELAY_MAX_MS: f64 = 2000.0;
/// 时长缺失或为 0 时的兜底延迟。
pub const DEFAULT_RESPONSE_DELAY_MS: f64 = 300.0;

/// 由观测时长计算回程 packet 的生成延迟（毫秒）。
pub fn response_delay_ms(duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 || !duration_ms.is_finite() {
        return DEFAULT_RESPONSE_DELAY_MS;
    }
    (duration_ms * RESPONSE_DELAY_FACTOR).clamp(RESPONSE_DELAY_MIN_MS, RESPONSE_DELAY_MAX_MS)
}

/// 延迟生成项，按 (at, seq) 排序。
struct PendingSpawn {
    at: f64,
    seq: u64,
    packet: Packet,
}

// BinaryHeap 是 max-heap；我们需要最早时间优先，因此反向比较。
impl Ord for PendingSpawn {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.at.total_cmp(&other.at) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for PendingSpawn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PendingSpawn {
    fn eq(&self, other: &Self) -> bool {
        self.at.total_cmp(&other.at) == Ordering::Equal && self.seq == other.seq
    }
}

impl Eq for PendingSpawn {}

/// packet 动画器。
pub struct Animator {
    active: Vec<Packet>,
    pending: BinaryHeap<PendingSpawn>,
    last_tick: Option<f64>,
    next_seq: u64,
    ids: IdGen,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            pending: BinaryHeap::new(),
            last_tick: None,
            next_seq: 0,
            ids: IdGen::new(0x706b_74),
        }
    }
}

impl Animator {
    /// 为一条新观测到的请求生成 packet：
    /// 去程立即出现（progress 0），回程按观测时长延迟生成并携带最终状态。
    #[tracing::instrument(skip(self, req), fields(id = %req.id, hostname = %req.hostname))]
    pub fn spawn_for_request(&mut self, req: &NetworkRequest, now_ms: f64) {
        let target = host_node_id(&req.hostname);

        let out = Packet {
            id: self.ids.next_raw(now_ms.max(0.0) as u64),
            request_id: req.id.clone(),
            method: req.method,
            status: RequestStatus::Pending,
            direction: PacketDirection::Outbound,
            target_node_id: target.clone(),
            progress: 0.0,
        };
        self.active.push(out);

        let delay = response_delay_ms(req.timing.duration);
        let inbound = Packet {
            id: self.ids.next_raw(now_ms.max(0.0) as u64),
            request_id: req.id.clone(),
            method: req.method,
            status: req.status,
            direction: PacketDirection::Inbound,
            target_node_id: target,
            progress: 0.0,
        };
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.push(PendingSpawn {
            at: now_ms + delay,
            seq,
            packet: inbound,
        });

        debug!(delay_ms = delay, active = self.active.len(), "生成去程 packet，回程已排期");
    }

    /// 动画 tick：释放到期的回程、按实测间隔推进、同步移除越界 packet。
    pub fn tick(&mut self, now_ms: f64) {
        // 间隔取非负，时钟回拨时本帧不推进，保证 progress 单调。
        let elapsed = match self.last_tick {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_tick = Some(now_ms);

        let step = elapsed * PROGRESS_PER_MS;
        for p in &mut self.active {
            p.progress += step;
        }
        self.active.retain(|p| p.progress <= 1.0);

        // 到期的回程在推进之后入场：出场即 progress 0，下个 tick 才开始走。
        while let Some(top) = self.pending.peek() {
            if top.at > now_ms {
                break;
            }
            let item = self.pending.pop().expect("peek then pop");
            trace!(at = item.at, "释放回程 packet");
            self.active.push(item.packet);
        }
    }

    /// 当前在途 packet（只读快照来源）。
    pub fn active(&self) -> &[Packet] {
        &self.active
    }

    /// 尚未到期的回程数量（测试用）。
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 上次 tick 的时刻；新 spawn 的排期以此为基准。
    pub fn now(&self) -> f64 {
        self.last_tick.unwrap_or(0.0)
    }

    /// 清空在途与待生成集合。tick 基准保留。
    pub fn clear(&mut self) {
        self.active.clear();
        self.pending.clear();
    }
}
