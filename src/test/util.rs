use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{
    Headers, HttpMethod, IdGen, NetworkRequest, RequestStatus, RequestTiming, hostname_of,
};

static NEXT_SALT: AtomicU64 = AtomicU64::new(0x7465_7374);

/// Build a normalized request directly, bypassing the capture pipeline.
pub fn request(url: &str, method: HttpMethod, status_code: u16, duration_ms: f64, timestamp: u64) -> NetworkRequest {
    let mut ids = IdGen::new(NEXT_SALT.fetch_add(1, Ordering::Relaxed));
    NetworkRequest {
        id: ids.next_request_id(timestamp),
        url: url.to_string(),
        hostname: hostname_of(url),
        method,
        status: RequestStatus::from_code(status_code),
        status_code,
        request_headers: Headers::new(),
        response_headers: Headers::new(),
        timing: RequestTiming {
            start_time: timestamp as f64,
            duration: duration_ms,
            ..RequestTiming::default()
        },
        size: 0,
        resource_type: "fetch".to_string(),
        timestamp,
        protocol: None,
        initiator_type: None,
        tech: None,
        tab_domain: None,
        ip: None,
        from_cache: false,
        payload: None,
    }
}

pub fn get(url: &str, timestamp: u64) -> NetworkRequest {
    request(url, HttpMethod::Get, 200, 150.0, timestamp)
}
