//! 事件规范化
//!
//! 把三路异构原始事件归一成规范请求记录。拦截元数据与平台计时
//! 条目指向同一请求时，计时条目对 timing/size 权威，拦截记录补充
//! 方法、头部与载荷。合并键为 URL 精确相等，先到先配、一次消费
//! （跨源没有真正的排序 id，这是尽力而为的 FIFO join）。

use tracing::{debug, trace};

use crate::model::{
    Headers, HttpMethod, IdGen, NetworkRequest, RequestStatus, RequestTiming, detect_tech,
    hostname_of,
};

use super::bridge::BridgeRequest;
use super::raw::{InterceptedMeta, TimingEntry};

/// 规范化器：持有待配对的拦截元数据池与 id 生成器。
#[derive(Debug)]
pub struct Normalizer {
    pending: Vec<InterceptedMeta>,
    ids: IdGen,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            ids: IdGen::new(0x6e65_7476),
        }
    }
}

impl Normalizer {
    /// 接收拦截元数据。
    ///
    /// 传输层失败（状态码 0）立即产出错误记录——失败的交换不会再有
    /// 计时条目来认领它；成功的元数据进入待配对池等待权威计时。
    pub fn push_intercepted(&mut self, meta: InterceptedMeta) -> Option<NetworkRequest> {
        if meta.status_code == 0 {
            debug!(url = %meta.url, "传输失败，直接产出错误记录");
            let timestamp = meta.timestamp;
            return Some(self.build(
                meta.url.clone(),
                meta.method,
                0,
                meta.request_headers.clone(),
                meta.response_headers.clone(),
                RequestTiming::default(),
                0,
                "fetch".to_string(),
                timestamp,
                None,
                meta.payload.clone(),
            ));
        }

        trace!(url = %meta.url, pool = self.pending.len(), "拦截元数据入池");
        self.pending.push(meta);
        None
    }

    /// 把计时条目（可能合并池中元数据）规范化为一条记录。
    ///
    /// 无匹配元数据时仍产出记录：方法默认 GET，头部为空，状态码 200。
    pub fn from_timing_entry(&mut self, entry: &TimingEntry, now_ms: u64) -> NetworkRequest {
        let meta = self.take_matching(&entry.name);
        let (method, status_code, request_headers, response_headers, payload) = match meta {
            Some(m) => (
                m.method,
                m.status_code,
                m.request_headers,
                m.response_headers,
                m.payload,
            ),
            None => (HttpMethod::Get, 200, Headers::new(), Headers::new(), None),
        };

        let timing = Self::timing_of(entry);
        let size = if entry.transfer_size > 0 {
            entry.transfer_size
        } else {
            entry.encoded_body_size
        };
        let resource_type = if entry.initiator_type.is_empty() {
            "other".to_string()
        } else {
            entry.initiator_type.clone()
        };
        let protocol =
            (!entry.next_hop_protocol.is_empty()).then(|| entry.next_hop_protocol.clone());
        let initiator_type = (!entry.initiator_type.is_empty()).then(|| entry.initiator_type.clone());

        let mut req = self.build(
            entry.name.clone(),
            method,
            status_code,
            request_headers,
            response_headers,
            timing,
            size,
            resource_type,
            now_ms,
            protocol,
            payload,
        );
        req.initiator_type = initiator_type;
        req
    }

    /// 把桥接 REQUEST 消息规范化为一条记录。
    pub fn from_bridge(&mut self, msg: &BridgeRequest) -> NetworkRequest {
        let timing = RequestTiming::from_bounds(msg.start_time, msg.end_time);
        let resource_type = if msg.resource_type.is_empty() {
            "other".to_string()
        } else {
            msg.resource_type.clone()
        };

        let mut req = self.build(
            msg.url.clone(),
            HttpMethod::parse_or_get(&msg.method),
            msg.status_code,
            msg.request_headers.clone(),
            msg.response_headers.clone(),
            timing,
            0,
            resource_type,
            msg.end_time.max(0.0) as u64,
            None,
            None,
        );
        req.tab_domain = (!msg.tab_domain.is_empty()).then(|| msg.tab_domain.clone());
        req.ip = (!msg.ip.is_empty()).then(|| msg.ip.clone());
        req.from_cache = msg.from_cache;
        req
    }

    /// 待配对池大小（测试用）。
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 先到先配：取出第一条 URL 相同的元数据并从池中移除。
    fn take_matching(&mut self, url: &str) -> Option<InterceptedMeta> {
        let idx = self.pending.iter().position(|m| m.url == url)?;
        Some(self.pending.remove(idx))
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &mut self,
        url: String,
        method: HttpMethod,
        status_code: u16,
        request_headers: Headers,
        response_headers: Headers,
        timing: RequestTiming,
        size: u64,
        resource_type: String,
        timestamp: u64,
        protocol: Option<String>,
        payload: Option<String>,
    ) -> NetworkRequest {
        let hostname = hostname_of(&url);
        let response_headers = fold_header_names(response_headers);
        let tech = detect_tech(&url, Some(&response_headers));

        NetworkRequest {
            id: self.ids.next_request_id(timestamp),
            hostname,
            method,
            status: RequestStatus::from_code(status_code),
            status_code,
            request_headers,
            response_headers,
            timing,
            size,
            resource_type,
            timestamp,
            protocol,
            initiator_type: None,
            tech: Some(tech),
            tab_domain: None,
            ip: None,
            from_cache: false,
            payload,
            url,
        }
    }

    /// 平台约定 0.0 = 未上报；此处转为 `None`。
    fn timing_of(entry: &TimingEntry) -> RequestTiming {
        let opt = |v: f64| (v > 0.0).then_some(v);
        let duration = if entry.duration > 0.0 {
            entry.duration
        } else {
            entry.response_end - entry.start_time
        };
        RequestTiming {
            start_time: entry.start_time,
            dns_start: opt(entry.domain_lookup_start),
            dns_end: opt(entry.domain_lookup_end),
            connect_start: opt(entry.connect_start),
            connect_end: opt(entry.connect_end),
            tls_start: opt(entry.secure_connection_start),
            tls_end: opt(entry.secure_connection_start).and(opt(entry.connect_end)),
            request_start: opt(entry.request_start),
            response_start: opt(entry.response_start),
            response_end: opt(entry.response_end),
            duration: duration.max(0.0),
        }
    }
}

/// 响应头键折叠为小写，保证跨源比较一致。
fn fold_header_names(headers: Headers) -> Headers {
    headers
        .into_iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v))
        .collect()
}
