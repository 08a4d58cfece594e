//! 去重表
//!
//! 平台可能就同一逻辑请求给出多次重叠通知（缓冲的计时流、
//! 桥接与页面内观察的交集）。去重键 = URL + 起始时刻取整到毫秒。
//!
//! 已知容差：同一取整量子内对同一 URL 的多个真实请求会被归并为
//! 一条记录。这是设计接受的边界，不是精度保证。

use std::collections::HashSet;

/// 会话级已见键集合。仅追加；会话生命周期受页面约束，不做过期。
#[derive(Debug, Default)]
pub struct DedupTable {
    seen: HashSet<(String, i64)>,
}

impl DedupTable {
    /// 记录一次观测。首次见到返回 true，重复返回 false。
    pub fn check_and_insert(&mut self, url: &str, start_ms: f64) -> bool {
        self.seen.insert(Self::key(url, start_ms))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn key(url: &str, start_ms: f64) -> (String, i64) {
        (url.to_string(), start_ms.round() as i64)
    }
}
