use super::util;
use crate::model::HttpMethod;
use crate::store::RequestStore;

#[test]
fn insertion_is_newest_first() {
    let mut store = RequestStore::default();
    store.add(util::get("https://a.example/1", 100));
    store.add(util::get("https://a.example/2", 200));
    store.add(util::get("https://a.example/3", 300));

    let urls: Vec<&str> = store.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, ["https://a.example/3", "https://a.example/2", "https://a.example/1"]);
}

#[test]
fn size_never_exceeds_cap_and_keeps_most_recent() {
    let cap = 5;
    let mut store = RequestStore::with_cap(cap);
    for i in 0..20u64 {
        store.add(util::get(&format!("https://a.example/{i}"), 1000 + i));
        assert!(store.len() <= cap);
    }
    assert_eq!(store.len(), cap);
    // The survivors are exactly the 5 most recently inserted, newest first.
    let urls: Vec<&str> = store.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        [
            "https://a.example/19",
            "https://a.example/18",
            "https://a.example/17",
            "https://a.example/16",
            "https://a.example/15"
        ]
    );
}

#[test]
fn missing_derived_fields_are_filled_once_on_insert() {
    let mut store = RequestStore::default();
    let mut req = util::request("https://api.example.com/u", HttpMethod::Get, 200, 10.0, 1);
    req.hostname = String::new();
    req.tech = None;
    store.add(req);

    let stored = store.iter().next().expect("one record");
    assert_eq!(stored.hostname, "api.example.com");
    assert!(stored.tech.is_some());
}

#[test]
fn lookup_by_id() {
    let mut store = RequestStore::default();
    let req = util::get("https://a.example/1", 7);
    let id = req.id.clone();
    store.add(req);
    assert!(store.get(&id).is_some());
    store.clear();
    assert!(store.get(&id).is_none());
}

#[test]
fn clear_resets_and_bumps_version() {
    let mut store = RequestStore::default();
    store.add(util::get("https://a.example/1", 1));
    let before = store.version();
    store.clear();
    assert!(store.is_empty());
    assert_ne!(store.version(), before);
}

#[test]
fn every_mutation_bumps_version() {
    let mut store = RequestStore::default();
    let v0 = store.version();
    store.add(util::get("https://a.example/1", 1));
    let v1 = store.version();
    assert_ne!(v0, v1);
    store.add(util::get("https://a.example/2", 2));
    assert_ne!(store.version(), v1);
}
