//! 请求记录类型
//!
//! 定义规范化后的 HTTP 交换记录及其方法、状态枚举。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::id::RequestId;
use super::tech::TechStack;
use super::timing::RequestTiming;

/// 头部映射（按键排序，序列化输出稳定）。响应头按小写键存储。
pub type Headers = BTreeMap<String, String>;

/// HTTP 方法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(()),
        }
    }
}

impl HttpMethod {
    /// 宽松解析：未识别的方法按 GET 处理（与来源侧默认一致）。
    pub fn parse_or_get(s: &str) -> Self {
        s.parse().unwrap_or(HttpMethod::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 请求结局状态。Pending 仅在结果未知时短暂存在。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Success,
    Error,
}

impl RequestStatus {
    /// 由状态码推导结局。0 保留给网络层失败（无响应）。
    pub fn from_code(status_code: u16) -> Self {
        if status_code == 0 || status_code >= 400 {
            RequestStatus::Error
        } else {
            RequestStatus::Success
        }
    }
}

/// 规范化后的 HTTP 交换记录。
///
/// 插入 store 后不可变；hostname / tech 是惰性填充的派生字段
/// （缺省时由 store 填充一次）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub id: RequestId,
    pub url: String,
    /// 派生自 url；恒非空，解析失败时为 "unknown"。
    pub hostname: String,
    pub method: HttpMethod,
    pub status: RequestStatus,
    pub status_code: u16,
    #[serde(default)]
    pub request_headers: Headers,
    #[serde(default)]
    pub response_headers: Headers,
    pub timing: RequestTiming,
    /// 字节数（尽力而为；未知时为 0）。
    pub size: u64,
    pub resource_type: String,
    /// 捕获时刻（epoch 毫秒），用于吞吐估算。
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiator_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<TechStack>,
    /// 跨标签页捕获时，发起标签页的域名。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default)]
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

impl NetworkRequest {
    pub fn is_error(&self) -> bool {
        self.status == RequestStatus::Error
    }
}
