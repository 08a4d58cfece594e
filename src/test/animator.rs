use super::util;
use crate::anim::{
    Animator, DEFAULT_RESPONSE_DELAY_MS, PROGRESS_PER_MS, PacketDirection,
    RESPONSE_DELAY_MAX_MS, RESPONSE_DELAY_MIN_MS, response_delay_ms,
};
use crate::model::{HttpMethod, RequestStatus};

#[test]
fn outbound_packet_spawns_immediately_at_zero_progress() {
    let mut anim = Animator::default();
    let req = util::get("https://api.example.com/u", 1);
    anim.spawn_for_request(&req, 0.0);

    assert_eq!(anim.active().len(), 1);
    let p = &anim.active()[0];
    assert_eq!(p.direction, PacketDirection::Outbound);
    assert_eq!(p.status, RequestStatus::Pending);
    assert_eq!(p.progress, 0.0);
    assert_eq!(p.target_node_id, "host-api.example.com");
    assert_eq!(p.request_id, req.id);
    assert_eq!(anim.pending_len(), 1);
}

#[test]
fn inbound_packet_appears_after_computed_delay_with_final_status() {
    let mut anim = Animator::default();
    // duration 500ms -> delay 300ms
    let req = util::request("https://api.example.com/u", HttpMethod::Get, 500, 500.0, 1);
    anim.tick(0.0);
    anim.spawn_for_request(&req, 0.0);

    anim.tick(299.0);
    assert_eq!(anim.active().len(), 1, "inbound not yet due");

    anim.tick(300.0);
    let inbound: Vec<_> = anim
        .active()
        .iter()
        .filter(|p| p.direction == PacketDirection::Inbound)
        .collect();
    assert_eq!(inbound.len(), 1);
    assert_eq!(inbound[0].status, RequestStatus::Error);
    assert_eq!(anim.pending_len(), 0);
}

#[test]
fn progress_advances_by_elapsed_time_not_by_frame_count() {
    let mut anim = Animator::default();
    let req = util::get("https://a.example/x", 1);
    anim.tick(0.0);
    anim.spawn_for_request(&req, 0.0);

    // One 50ms tick must advance exactly as much as five 10ms ticks.
    anim.tick(50.0);
    let after_coarse = anim.active()[0].progress;

    let mut anim2 = Animator::default();
    anim2.tick(0.0);
    anim2.spawn_for_request(&util::get("https://a.example/x", 1), 0.0);
    for t in 1..=5 {
        anim2.tick((t * 10) as f64);
    }
    let after_fine = anim2.active()[0].progress;

    assert!((after_coarse - after_fine).abs() < 1e-12);
    assert!((after_coarse - 50.0 * PROGRESS_PER_MS).abs() < 1e-12);
}

#[test]
fn progress_is_monotonic_even_if_the_clock_steps_back() {
    let mut anim = Animator::default();
    anim.tick(0.0);
    anim.spawn_for_request(&util::get("https://a.example/x", 1), 0.0);
    anim.tick(100.0);
    let p1 = anim.active()[0].progress;
    anim.tick(40.0); // clock skew
    let p2 = anim.active()[0].progress;
    assert!(p2 >= p1);
}

#[test]
fn packets_past_full_progress_are_removed_in_the_same_step() {
    let mut anim = Animator::default();
    anim.tick(0.0);
    anim.spawn_for_request(&util::get("https://a.example/x", 1), 0.0);

    // Jump far past the end of the flight path.
    anim.tick(2.0 / PROGRESS_PER_MS);
    assert!(
        anim.active().iter().all(|p| p.direction == PacketDirection::Inbound),
        "outbound packet must be gone the tick it exceeds 1"
    );
}

#[test]
fn response_delay_scales_and_clamps() {
    assert_eq!(response_delay_ms(500.0), 300.0);
    assert_eq!(response_delay_ms(50.0), RESPONSE_DELAY_MIN_MS);
    assert_eq!(response_delay_ms(60_000.0), RESPONSE_DELAY_MAX_MS);
    assert_eq!(response_delay_ms(0.0), DEFAULT_RESPONSE_DELAY_MS);
    assert_eq!(response_delay_ms(-5.0), DEFAULT_RESPONSE_DELAY_MS);
    assert_eq!(response_delay_ms(f64::NAN), DEFAULT_RESPONSE_DELAY_MS);
}

#[test]
fn clear_drops_active_and_pending_packets() {
    let mut anim = Animator::default();
    anim.tick(0.0);
    anim.spawn_for_request(&util::get("https://a.example/x", 1), 0.0);
    anim.clear();
    assert!(anim.active().is_empty());
    assert_eq!(anim.pending_len(), 0);
    // The tick baseline survives a clear.
    assert_eq!(anim.now(), 0.0);
}

#[test]
fn delayed_spawns_release_in_time_then_seq_order() {
    let mut anim = Animator::default();
    anim.tick(0.0);
    // Same duration -> same due time; seq breaks the tie in spawn order.
    anim.spawn_for_request(&util::request("https://a.example/1", HttpMethod::Get, 200, 500.0, 1), 0.0);
    anim.spawn_for_request(&util::request("https://b.example/2", HttpMethod::Get, 200, 500.0, 2), 0.0);
    anim.tick(300.0);

    let inbound: Vec<_> = anim
        .active()
        .iter()
        .filter(|p| p.direction == PacketDirection::Inbound)
        .collect();
    assert_eq!(inbound.len(), 2);
    assert_eq!(inbound[0].target_node_id, "host-a.example");
    assert_eq!(inbound[1].target_node_id, "host-b.example");
}
