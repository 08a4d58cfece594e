use crate::anim::PacketDirection;
use crate::capture::{InterceptedMeta, TimingEntry};
use crate::model::{Headers, HttpMethod};
use crate::topo::CLIENT_NODE_ID;
use crate::world::VizWorld;

fn entry(url: &str, start: f64, duration: f64) -> TimingEntry {
    TimingEntry {
        name: url.to_string(),
        start_time: start,
        duration,
        response_end: start + duration,
        transfer_size: 512,
        initiator_type: "fetch".to_string(),
        ..TimingEntry::default()
    }
}

fn feed(world: &mut VizWorld, url: &str, start: f64) {
    let now = 1_700_000_000_000 + start as u64;
    world.on_timing_entry(&entry(url, start, 150.0), now);
}

#[test]
fn observed_request_shows_up_in_every_derived_view_at_once() {
    let mut world = VizWorld::default();
    world.tick(0.0);
    feed(&mut world, "https://api.example.com/users", 100.0);

    let snap = world.snapshot();
    assert_eq!(snap.requests.len(), 1);
    assert_eq!(snap.stats.total_requests, 1);
    assert_eq!(snap.available_domains, ["api.example.com"]);

    let client = snap.nodes.iter().find(|n| n.id == CLIENT_NODE_ID).expect("client");
    assert_eq!(client.request_count, 1);
    let host = snap.nodes.iter().find(|n| n.id == "host-api.example.com").expect("host");
    assert_eq!(host.request_count, 1);

    assert_eq!(snap.packets.len(), 1);
    assert_eq!(snap.packets[0].direction, PacketDirection::Outbound);
    assert_eq!(snap.packets[0].target_node_id, "host-api.example.com");
}

#[test]
fn duplicate_notifications_for_one_request_store_once() {
    let mut world = VizWorld::default();
    feed(&mut world, "https://api.example.com/users", 100.0);
    feed(&mut world, "https://api.example.com/users", 100.2); // same rounded start
    assert_eq!(world.store().len(), 1);

    feed(&mut world, "https://api.example.com/users", 250.0);
    assert_eq!(world.store().len(), 2);
}

#[test]
fn merge_of_intercepted_and_timing_keeps_best_fields() {
    let mut world = VizWorld::default();
    let mut request_headers = Headers::new();
    request_headers.insert("authorization".to_string(), "Bearer x".to_string());
    world.on_intercepted(InterceptedMeta {
        url: "https://api.example.com/login".to_string(),
        method: HttpMethod::Post,
        status_code: 201,
        request_headers,
        response_headers: Headers::new(),
        payload: Some(r#"{"user":"a"}"#.to_string()),
        timestamp: 1_700_000_000_000,
    });
    // Meta alone does not emit; the timing entry completes the join.
    assert_eq!(world.store().len(), 0);

    feed(&mut world, "https://api.example.com/login", 40.0);
    let snap = world.snapshot();
    assert_eq!(snap.requests.len(), 1);
    let req = &snap.requests[0];
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.status_code, 201);
    assert_eq!(req.payload.as_deref(), Some(r#"{"user":"a"}"#));
    assert_eq!(req.timing.duration, 150.0);
    assert_eq!(req.size, 512);
}

#[test]
fn pausing_blocks_new_records_but_keeps_packets_animating() {
    let mut world = VizWorld::default();
    world.tick(0.0);
    feed(&mut world, "https://api.example.com/a", 10.0);
    assert_eq!(world.packets().len(), 1);

    world.set_capturing(false);
    feed(&mut world, "https://api.example.com/b", 20.0);
    assert_eq!(world.store().len(), 1, "no records accepted while paused");

    // In-flight packets keep advancing to completion.
    world.tick(100.0);
    assert!(world.packets()[0].progress > 0.0);

    // Resume without reset; previously-seen observations stay deduplicated.
    world.set_capturing(true);
    feed(&mut world, "https://api.example.com/b", 20.0);
    assert_eq!(world.store().len(), 1, "paused observation was already marked seen");
    feed(&mut world, "https://api.example.com/c", 30.0);
    assert_eq!(world.store().len(), 2);
}

#[test]
fn clear_is_total_in_one_observable_update() {
    let mut world = VizWorld::default();
    world.tick(0.0);
    for i in 0..10 {
        feed(&mut world, &format!("https://h{i}.example/p"), 10.0 * i as f64);
    }
    assert_eq!(world.snapshot().requests.len(), 10);
    assert!(!world.snapshot().packets.is_empty());

    world.clear();
    let snap = world.snapshot();
    assert!(snap.requests.is_empty());
    assert!(snap.packets.is_empty());
    assert_eq!(snap.nodes.len(), 1, "only the seed client node remains");
    assert_eq!(snap.nodes[0].request_count, 0);
    assert_eq!(snap.stats.total_requests, 0);
    assert!(snap.available_domains.is_empty());
}

#[test]
fn clear_does_not_forget_already_seen_observations() {
    let mut world = VizWorld::default();
    feed(&mut world, "https://api.example.com/a", 10.0);
    world.clear();
    assert!(world.store().is_empty());

    // Buffered platform streams may redeliver old entries after a clear;
    // the seen-set outlives the cleared records.
    feed(&mut world, "https://api.example.com/a", 10.0);
    assert!(world.store().is_empty(), "redelivered entry must stay rejected");

    // A genuinely new observation of the same URL is still admitted.
    feed(&mut world, "https://api.example.com/a", 200.0);
    assert_eq!(world.store().len(), 1);
}

#[test]
fn domain_filter_keeps_all_views_consistent() {
    let mut world = VizWorld::default();
    world.tick(0.0);
    feed(&mut world, "https://api.example.com/a", 10.0);
    feed(&mut world, "https://api.example.com/b", 20.0);
    feed(&mut world, "https://cdn.example.com/c.js", 30.0);

    world.set_filter(Some("api.example.com".to_string()));
    let snap = world.snapshot();
    assert_eq!(snap.domain_filter.as_deref(), Some("api.example.com"));
    assert_eq!(snap.requests.len(), 2);
    assert_eq!(snap.stats.total_requests, 2);
    assert!(snap.requests.iter().all(|r| r.hostname == "api.example.com"));
    assert!(snap.packets.iter().all(|p| p.target_node_id == "host-api.example.com"));
    assert!(snap.nodes.iter().all(|n| n.id != "host-cdn.example.com"));
    // The unfiltered domain list still advertises every hostname.
    assert_eq!(snap.available_domains, ["api.example.com", "cdn.example.com"]);

    world.set_filter(None);
    assert_eq!(world.snapshot().requests.len(), 3);
}

#[test]
fn bridge_lifecycle_toggles_availability_without_degrading_capture() {
    let mut world = VizWorld::default();
    assert!(!world.snapshot().bridge_connected);

    world.on_bridge_raw(r#"{"type":"READY"}"#).expect("ready");
    assert!(world.snapshot().bridge_connected);

    world
        .on_bridge_raw(
            r#"{"type":"REQUEST","url":"https://api.github.com/x","method":"GET","statusCode":200,"tabDomain":"other.example","startTime":1.0,"endTime":90.0}"#,
        )
        .expect("request");
    assert_eq!(world.store().len(), 1);
    assert_eq!(
        world.snapshot().requests[0].tab_domain.as_deref(),
        Some("other.example")
    );

    world.on_bridge_raw(r#"{"type":"DISCONNECTED"}"#).expect("disconnected");
    assert!(!world.snapshot().bridge_connected);

    // Primary-tab capture is unaffected by the bridge going away.
    feed(&mut world, "https://api.example.com/a", 10.0);
    assert_eq!(world.store().len(), 2);
}

#[test]
fn malformed_bridge_input_is_an_error_not_a_crash() {
    let mut world = VizWorld::default();
    assert!(world.on_bridge_raw("garbage").is_err());
    assert_eq!(world.store().len(), 0);
}

#[test]
fn snapshot_reflects_state_at_the_triggering_change() {
    let mut world = VizWorld::default();
    feed(&mut world, "https://api.example.com/a", 10.0);
    assert_eq!(world.snapshot().requests.len(), 1);

    // A stale cached view after another mutation would be a correctness bug.
    feed(&mut world, "https://api.example.com/b", 20.0);
    assert_eq!(world.snapshot().requests.len(), 2);

    world.tick(50.0);
    let progress: Vec<f64> = world.snapshot().packets.iter().map(|p| p.progress).collect();
    world.tick(100.0);
    let progress_after: Vec<f64> = world.snapshot().packets.iter().map(|p| p.progress).collect();
    assert_ne!(progress, progress_after);
}

#[test]
fn packets_of_evicted_requests_are_skipped_at_render_time() {
    let mut world = VizWorld::with_cap(1);
    world.tick(0.0);
    feed(&mut world, "https://old.example/a", 10.0);
    feed(&mut world, "https://new.example/b", 20.0);

    assert_eq!(world.store().len(), 1);
    // Both packets still animate...
    assert_eq!(world.packets().len(), 2);
    // ...but the snapshot only resolves the one whose request is visible.
    let snap = world.snapshot();
    assert_eq!(snap.packets.len(), 1);
    assert_eq!(snap.packets[0].target_node_id, "host-new.example");
}

#[test]
fn internal_urls_are_discarded_unconditionally() {
    let mut world = VizWorld::default();
    feed(&mut world, "data:text/plain;base64,aGk=", 10.0);
    feed(&mut world, "chrome-extension://abcdef/bridge.js", 20.0);
    assert_eq!(world.store().len(), 0);
}
