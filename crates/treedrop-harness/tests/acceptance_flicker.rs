#![forbid(unsafe_code)]

//! Acceptance arbitration across adjacent droppables.
//!
//! A leave followed by an enter elsewhere within the settle window must not
//! drop acceptance. Only a leave with no later claim for a full window
//! releases it.
//!
//! JSONL logs are printed when `E2E_JSONL` or `CI` is set.

use std::time::Duration;

use treedrop_core::{DraggableType, Point, Rect, TypeSet};
use treedrop_harness::{AcceptanceFlickerDetector, Gesture, MockSurface, init_tracing};
use treedrop_session::{
    DragDropRoot, DraggableBinding, DraggableConfig, DroppableBinding, DroppableConfig, SessionConfig,
};

fn jsonl_enabled() -> bool {
    std::env::var("E2E_JSONL").is_ok() || std::env::var("CI").is_ok()
}

struct Lanes {
    root: DragDropRoot,
    lanes: Vec<DroppableBinding>,
    card: DraggableBinding,
    surface: MockSurface,
}

fn lanes(config: SessionConfig, count: usize) -> Lanes {
    init_tracing();
    let mut root: DragDropRoot = DragDropRoot::new(config);
    root.mount().unwrap();
    let mut surface = MockSurface::new();
    let mut bindings = Vec::new();
    for i in 0..count {
        let id = format!("lane-{i}");
        bindings.push(
            root.droppable(DroppableConfig::new(id.clone(), TypeSet::parse("task")), |_| {})
                .unwrap(),
        );
        let items: &[&str] = if i == 0 { &["card"] } else { &[] };
        surface = surface.column(&id, Rect::new(i as f64 * 100.0, 0.0, 100.0, 400.0), 20.0, items);
    }
    let card = root
        .draggable(DraggableConfig::new("card", "lane-0", [DraggableType::new("task")]))
        .unwrap();
    Lanes {
        root,
        lanes: bindings,
        card,
        surface,
    }
}

fn lane_point(i: usize) -> Point {
    Point::new(i as f64 * 100.0 + 50.0, 100.0)
}

#[test]
fn sweeping_across_lanes_never_flickers() {
    let mut l = lanes(SessionConfig::default(), 6);
    let s = l.root.context_mut().unwrap();
    let mut g = Gesture::new().with_detector(AcceptanceFlickerDetector::new("sweep"));

    g.pick_up(s, &l.card, &l.surface, lane_point(0)).unwrap();
    g.enter(s, &l.lanes[0], lane_point(0), &l.surface).unwrap();
    for i in 1..l.lanes.len() {
        g.leave(s, &l.lanes[i - 1], &l.surface).unwrap();
        g.advance(s, Duration::from_millis(30));
        g.enter(s, &l.lanes[i], lane_point(i), &l.surface).unwrap();
        g.advance(s, Duration::from_millis(80));
        assert!(s.state().is_any_container_accepting(), "lost acceptance entering lane {i}");
    }

    let mut detector = g.take_detector().unwrap();
    detector.finalize();
    if jsonl_enabled() {
        eprint!("{}", detector.to_jsonl());
    }
    detector.assert_flicker_free();
    assert_eq!(detector.stats().gains, 1);
    assert_eq!(detector.stats().losses, 0);
}

#[test]
fn re_entering_the_same_lane_within_settle_never_releases() {
    let mut l = lanes(SessionConfig::default(), 1);
    let s = l.root.context_mut().unwrap();
    let mut g = Gesture::new().with_detector(AcceptanceFlickerDetector::new("same-lane"));

    g.pick_up(s, &l.card, &l.surface, lane_point(0)).unwrap();
    g.enter(s, &l.lanes[0], lane_point(0), &l.surface).unwrap();
    let first = s.state().acceptance_epoch();
    g.leave(s, &l.lanes[0], &l.surface).unwrap();
    g.advance(s, Duration::from_millis(40));
    g.enter(s, &l.lanes[0], lane_point(0), &l.surface).unwrap();
    assert!(s.state().acceptance_epoch() > first);

    for _ in 0..10 {
        assert!(!g.advance(s, Duration::from_millis(25)));
        assert!(s.state().is_any_container_accepting());
    }
    assert_eq!(s.next_deadline(), None);

    let mut detector = g.take_detector().unwrap();
    detector.finalize();
    detector.assert_flicker_free();
    assert_eq!(detector.stats().gains, 1);
    assert_eq!(detector.stats().losses, 0);
}

#[test]
fn leaving_everything_releases_after_settle() {
    let mut l = lanes(SessionConfig::default(), 2);
    let s = l.root.context_mut().unwrap();
    let mut g = Gesture::new();

    g.pick_up(s, &l.card, &l.surface, lane_point(1)).unwrap();
    g.enter(s, &l.lanes[1], lane_point(1), &l.surface).unwrap();
    g.leave(s, &l.lanes[1], &l.surface).unwrap();

    assert!(!g.advance(s, Duration::from_millis(99)));
    assert!(s.state().is_any_container_accepting());
    assert!(g.advance(s, Duration::from_millis(1)));
    assert!(!s.state().is_any_container_accepting());
    assert!(!s.draggable_snapshot(&l.card).unwrap().is_droppable);
    assert!(s.check_invariants().is_ok());
}

#[test]
fn claim_after_release_starts_a_new_epoch() {
    let mut l = lanes(SessionConfig::default(), 2);
    let s = l.root.context_mut().unwrap();
    let mut g = Gesture::new();

    g.pick_up(s, &l.card, &l.surface, lane_point(0)).unwrap();
    g.enter(s, &l.lanes[0], lane_point(0), &l.surface).unwrap();
    let first = s.state().acceptance_epoch();
    g.leave(s, &l.lanes[0], &l.surface).unwrap();
    assert!(g.settle(s));

    g.enter(s, &l.lanes[1], lane_point(1), &l.surface).unwrap();
    assert!(s.state().acceptance_epoch() > first);
    assert!(s.state().is_any_container_accepting());
    assert_eq!(s.next_deadline(), None);
}

#[test]
fn tiny_settle_window_is_visible_as_flicker() {
    let config = SessionConfig::default().with_acceptance_settle(Duration::from_millis(1));
    let mut l = lanes(config, 2);
    let s = l.root.context_mut().unwrap();
    let mut g = Gesture::new().with_detector(AcceptanceFlickerDetector::with_window(
        "tiny-settle",
        Duration::from_millis(100),
    ));

    g.pick_up(s, &l.card, &l.surface, lane_point(0)).unwrap();
    g.enter(s, &l.lanes[0], lane_point(0), &l.surface).unwrap();
    g.leave(s, &l.lanes[0], &l.surface).unwrap();
    g.advance(s, Duration::from_millis(5));
    g.enter(s, &l.lanes[1], lane_point(1), &l.surface).unwrap();

    let detector = g.detector().unwrap();
    assert_eq!(detector.stats().flickers, 1);
    assert!(!detector.is_flicker_free());
}
