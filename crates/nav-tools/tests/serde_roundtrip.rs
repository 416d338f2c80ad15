#![cfg(feature = "serde")]

use nav_tools::{TraceEvent, TraceLog};

#[test]
fn trace_log_roundtrips_via_serde() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(1, "path.search").with_a(5).with_b(2828));
    log.push(TraceEvent::new(2, "path.hit").with_a(5));

    let json = serde_json::to_string(&log).expect("serialize trace log");
    let log2: TraceLog = serde_json::from_str(&json).expect("deserialize trace log");

    assert_eq!(log, log2);
}
