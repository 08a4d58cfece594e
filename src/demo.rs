//! 演示流量生成
//!
//! 为回放与 CLI 测试生成确定性的合成流量：每条合成请求产出一对
//! 原始事件（拦截元数据 + 计时条目），从正门走完整的规范化管线。
//! 随机源为带种子的 splitmix64，同一种子永远得到同一序列。

use crate::capture::{InterceptedMeta, TimingEntry};
use crate::model::{Headers, HttpMethod, mix64};

/// 合成端点表（与主机分组、分类路径都有交集，便于观察拓扑）。
const ENDPOINTS: [(&str, &[HttpMethod], &str); 10] = [
    ("https://api.example.com/users", &[HttpMethod::Get, HttpMethod::Post], "fetch"),
    ("https://api.example.com/posts", &[HttpMethod::Get, HttpMethod::Post, HttpMethod::Put], "fetch"),
    ("https://api.example.com/comments", &[HttpMethod::Get, HttpMethod::Delete], "fetch"),
    ("https://api.example.com/auth/login", &[HttpMethod::Post], "fetch"),
    ("https://api.example.com/settings", &[HttpMethod::Get, HttpMethod::Patch], "fetch"),
    ("https://cdn.example.com/images/hero.png", &[HttpMethod::Get], "img"),
    ("https://cdn.example.com/styles/main.css", &[HttpMethod::Get], "link"),
    ("https://cdn.example.com/bundle.js", &[HttpMethod::Get], "script"),
    ("https://cdn.jsdelivr.net/npm/react/package.json", &[HttpMethod::Get], "fetch"),
    ("https://jsonplaceholder.typicode.com/posts/1", &[HttpMethod::Get], "fetch"),
];

/// 带种子的确定性伪随机源（splitmix64）。
#[derive(Debug, Clone)]
pub struct DemoRng {
    state: u64,
}

impl DemoRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(1);
        mix64(self.state)
    }

    /// [0, n) 内取值。
    pub fn next_below(&mut self, n: u64) -> u64 {
        debug_assert!(n > 0);
        self.next_u64() % n
    }

    /// [lo, hi) 内的浮点取值。
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

/// 一条合成请求对应的原始事件。
#[derive(Debug, Clone)]
pub struct DemoEvent {
    pub meta: InterceptedMeta,
    /// 传输层失败（状态码 0）没有计时条目。
    pub entry: Option<TimingEntry>,
}

/// 合成流量生成器。
#[derive(Debug)]
pub struct DemoTraffic {
    rng: DemoRng,
}

impl DemoTraffic {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DemoRng::new(seed),
        }
    }

    /// 生成下一条合成请求的原始事件。
    ///
    /// `now_ms` 为合成的捕获时刻（epoch 毫秒）；约 2% 的请求是
    /// 传输层失败（状态码 0，无计时条目），另约 6% 给出 4xx/5xx
    /// 状态码以覆盖错误路径。
    pub fn generate(&mut self, now_ms: u64) -> DemoEvent {
        let (url, methods, initiator) =
            ENDPOINTS[self.rng.next_below(ENDPOINTS.len() as u64) as usize];
        let method = methods[self.rng.next_below(methods.len() as u64) as usize];

        let roll = self.rng.next_below(100);
        if roll < 2 {
            let mut request_headers = Headers::new();
            request_headers.insert("accept".to_string(), "application/json".to_string());
            let meta = InterceptedMeta {
                url: url.to_string(),
                method,
                status_code: 0,
                request_headers,
                response_headers: Headers::new(),
                payload: None,
                timestamp: now_ms,
            };
            return DemoEvent { meta, entry: None };
        }

        let is_error = roll < 8;
        let status_code = if is_error {
            [400u16, 404, 500, 503][self.rng.next_below(4) as usize]
        } else {
            match method {
                HttpMethod::Post => 201,
                _ => 200,
            }
        };

        // 阶段式计时游走，与平台计时条目的形态一致。
        let start = now_ms as f64;
        let dns = self.rng.next_range(1.0, 15.0);
        let connect = self.rng.next_range(5.0, 30.0);
        let tls = self.rng.next_range(10.0, 40.0);
        let request = self.rng.next_range(2.0, 10.0);
        let response = if is_error {
            self.rng.next_range(5.0, 50.0)
        } else {
            self.rng.next_range(20.0, 300.0)
        };

        let dns_start = start;
        let dns_end = dns_start + dns;
        let connect_start = dns_end;
        let tls_start = connect_start + connect;
        let connect_end = tls_start + tls;
        let request_start = connect_end;
        let response_start = request_start + request;
        let response_end = response_start + response;

        let mut request_headers = Headers::new();
        request_headers.insert("accept".to_string(), "application/json".to_string());
        let payload = match method {
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                request_headers.insert("content-type".to_string(), "application/json".to_string());
                Some(r#"{"source":"netviz-demo"}"#.to_string())
            }
            _ => None,
        };

        let mut response_headers = Headers::new();
        response_headers.insert("content-type".to_string(), "application/json".to_string());

        let meta = InterceptedMeta {
            url: url.to_string(),
            method,
            status_code,
            request_headers,
            response_headers,
            payload,
            timestamp: now_ms,
        };
        let entry = TimingEntry {
            name: url.to_string(),
            start_time: start,
            duration: response_end - start,
            domain_lookup_start: dns_start,
            domain_lookup_end: dns_end,
            connect_start,
            connect_end,
            secure_connection_start: tls_start,
            request_start,
            response_start,
            response_end,
            transfer_size: 200 + self.rng.next_below(50_000),
            encoded_body_size: 0,
            initiator_type: initiator.to_string(),
            next_hop_protocol: "h2".to_string(),
        };

        DemoEvent {
            meta,
            entry: Some(entry),
        }
    }
}
