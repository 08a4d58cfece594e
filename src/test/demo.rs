use crate::demo::DemoTraffic;
use crate::world::VizWorld;

#[test]
fn same_seed_yields_the_same_event_sequence() {
    let mut a = DemoTraffic::new(9);
    let mut b = DemoTraffic::new(9);
    for i in 0..50u64 {
        let ea = a.generate(1_000 + i);
        let eb = b.generate(1_000 + i);
        assert_eq!(ea.meta.url, eb.meta.url);
        assert_eq!(ea.meta.status_code, eb.meta.status_code);
        assert_eq!(ea.entry.is_some(), eb.entry.is_some());
    }
}

#[test]
fn traffic_mix_includes_transport_failures_without_timing_entries() {
    let mut traffic = DemoTraffic::new(3);
    let mut failures = 0;
    let mut completions = 0;
    for i in 0..500u64 {
        let ev = traffic.generate(1_000 + i);
        if ev.meta.status_code == 0 {
            assert!(ev.entry.is_none(), "a failed exchange never reports timing");
            failures += 1;
        } else {
            assert!(ev.entry.is_some());
            completions += 1;
        }
    }
    assert!(failures > 0, "expected some transport failures in 500 events");
    assert!(completions > failures);
}

#[test]
fn every_generated_event_admits_exactly_one_record() {
    let mut world = VizWorld::default();
    let mut traffic = DemoTraffic::new(5);
    let mut now_ms: u64 = 1_700_000_000_000;
    for _ in 0..100 {
        let ev = traffic.generate(now_ms);
        world.on_intercepted(ev.meta);
        if let Some(entry) = ev.entry {
            world.on_timing_entry(&entry, now_ms);
        }
        now_ms += 48;
    }
    assert_eq!(world.store().len(), 100);
    assert!(world.store().iter().any(|r| r.status_code == 0));
}
