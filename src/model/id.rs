//! 标识符类型
//!
//! 定义请求记录与动画 packet 的会话内唯一标识符及其生成器。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 请求记录标识符（会话内唯一，时间 + 混合计数器组合）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 标识符生成器。
///
/// 组合捕获时刻（epoch 毫秒）与 splitmix64 混合后的计数器，
/// 保证会话内无碰撞且输出确定（便于回放测试）。
#[derive(Debug, Clone)]
pub struct IdGen {
    salt: u64,
    counter: u64,
}

impl IdGen {
    /// 创建新生成器；`salt` 区分不同用途（请求 id / packet id）。
    pub fn new(salt: u64) -> Self {
        Self { salt, counter: 0 }
    }

    /// 生成下一个请求标识符。
    pub fn next_request_id(&mut self, now_ms: u64) -> RequestId {
        RequestId(self.next_raw(now_ms))
    }

    /// 生成下一个裸标识符字符串。
    pub fn next_raw(&mut self, now_ms: u64) -> String {
        let seq = self.counter;
        self.counter = self.counter.wrapping_add(1);
        let suffix = mix64(seq ^ self.salt) & 0xfff_ffff_ffff;
        format!("{now_ms:x}-{suffix:011x}")
    }
}

/// 一个简单、确定性的 64-bit mixing（替代随机源，保证每次运行输出稳定）。
pub fn mix64(mut x: u64) -> u64 {
    // splitmix64
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
