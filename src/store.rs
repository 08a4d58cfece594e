//! 请求存储
//!
//! 有界的、插入序最新在前的规范记录集合，是一切派生视图的唯一来源。
//! 记录入库后不可变；只有 hostname / tech 这类派生字段缺省时在入库
//! 瞬间填充一次。

use std::collections::VecDeque;
use tracing::{debug, info};

use crate::model::{NetworkRequest, RequestId, detect_tech, hostname_of};

/// 默认保留上限。
pub const DEFAULT_MAX_REQUESTS: usize = 200;

/// 请求存储。
#[derive(Debug)]
pub struct RequestStore {
    entries: VecDeque<NetworkRequest>,
    cap: usize,
    version: u64,
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::with_cap(DEFAULT_MAX_REQUESTS)
    }
}

impl RequestStore {
    /// 指定保留上限（部署上通常取 200–500）。
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap: cap.max(1),
            version: 0,
        }
    }

    /// 头部插入一条记录；超过上限时从尾部逐出最旧的。
    #[tracing::instrument(skip(self, req), fields(id = %req.id, hostname = %req.hostname))]
    pub fn add(&mut self, mut req: NetworkRequest) {
        // 惰性派生字段：缺省则填充一次，之后不再变。
        if req.hostname.is_empty() {
            req.hostname = hostname_of(&req.url);
        }
        if req.tech.is_none() {
            req.tech = Some(detect_tech(&req.url, Some(&req.response_headers)));
        }

        debug!(len = self.entries.len(), "插入记录");
        self.entries.push_front(req);
        while self.entries.len() > self.cap {
            let evicted = self.entries.pop_back();
            if let Some(old) = evicted {
                debug!(id = %old.id, "超出上限，逐出最旧记录");
            }
        }
        self.version = self.version.wrapping_add(1);
    }

    /// 原子清空。派生视图以版本号感知此变化。
    pub fn clear(&mut self) {
        info!(len = self.entries.len(), "🧹 清空请求存储");
        self.entries.clear();
        self.version = self.version.wrapping_add(1);
    }

    /// 最新在前遍历。
    pub fn iter(&self) -> impl Iterator<Item = &NetworkRequest> {
        self.entries.iter()
    }

    pub fn get(&self, id: &RequestId) -> Option<&NetworkRequest> {
        self.entries.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// 每次可见变更单调递增的版本号，供按需重算缓存使用。
    pub fn version(&self) -> u64 {
        self.version
    }
}
