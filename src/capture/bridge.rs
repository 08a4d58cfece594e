//! Wire format for the optional cross-tab bridge.
//!
//! A privileged out-of-process observer forwards one message per completed
//! or failed request, plus lifecycle messages signalling availability. The
//! bridge may connect, disconnect and reconnect at any time; its absence
//! never degrades primary-tab capture.

use serde::{Deserialize, Serialize};

use crate::model::Headers;

/// One message on the bridge channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeMessage {
    #[serde(rename = "REQUEST")]
    Request(BridgeRequest),
    #[serde(rename = "READY")]
    Ready,
    #[serde(rename = "DISCONNECTED")]
    Disconnected,
}

/// A completed or failed request observed by the bridge.
///
/// `status_code == 0` means the request failed at the network layer.
/// Response header names arrive lower-cased.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    pub url: String,
    pub method: String,
    pub status_code: u16,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub tab_id: i64,
    #[serde(default)]
    pub tab_domain: String,
    /// epoch 毫秒
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub from_cache: bool,
    #[serde(default)]
    pub request_headers: Headers,
    #[serde(default)]
    pub response_headers: Headers,
}

/// Errors produced while decoding bridge traffic.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid bridge message: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Decode one raw bridge message.
pub fn parse_bridge_message(raw: &str) -> Result<BridgeMessage, BridgeError> {
    Ok(serde_json::from_str(raw)?)
}
