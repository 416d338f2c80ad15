use nav_tools::{TraceEvent, TraceLog};

#[test]
fn log_preserves_event_order_and_payload() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(1, "first").with_a(10).with_b(20));
    log.push(TraceEvent::new(2, "second"));

    assert_eq!(log.events.len(), 2);
    assert_eq!(log.events[0].request, 1);
    assert_eq!(log.events[0].tag, "first");
    assert_eq!(log.events[0].a, 10);
    assert_eq!(log.events[0].b, 20);

    let tags: Vec<&str> = log.tags().collect();
    assert_eq!(tags, vec!["first", "second"]);
}

#[test]
fn events_compare_by_value() {
    let a = TraceEvent::new(3, "tag").with_a(1);
    let b = TraceEvent::new(3, "tag").with_a(1);
    assert_eq!(a, b);
    assert_ne!(a, b.clone().with_b(9));
}
