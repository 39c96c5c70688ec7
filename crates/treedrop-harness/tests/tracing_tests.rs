#![forbid(unsafe_code)]

//! Structured logging integration tests.
//!
//! Verifies that the session emits its lifecycle events with the expected
//! levels and fields.
//!
//!   cargo test -p treedrop-harness --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use treedrop_core::{DraggableType, DragTransfer, Point, Rect, TypeSet};
use treedrop_harness::{Gesture, MockSurface};
use treedrop_session::{DragDropRoot, DraggableConfig, DroppableConfig, SessionConfig};

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured event with its level, message and fields.
#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
    fields: HashMap<String, String>,
}

/// A tracing Layer that captures events.
struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    fn new() -> (Self, CaptureHandle) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            events: events.clone(),
        };
        (Self { events }, handle)
    }
}

/// Handle to read captured events after the run.
struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CaptureHandle {
    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.events().into_iter().find(|e| e.message == message)
    }
}

/// Visitor that splits the message from the other fields.
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: HashMap<String, String>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value = format!("{value:?}");
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn with_captured<F: FnOnce()>(run: F) -> CaptureHandle {
    let (layer, handle) = EventCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, run);
    handle
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn drop_commit_is_logged_with_result() {
    let handle = with_captured(|| {
        let mut root: DragDropRoot = DragDropRoot::new(SessionConfig::default());
        root.mount().unwrap();
        let col = root
            .droppable(DroppableConfig::new("todo", TypeSet::parse("task")), |_| {})
            .unwrap();
        let card = root
            .draggable(DraggableConfig::new("t0", "todo", [DraggableType::new("task")]))
            .unwrap();
        let surface = MockSurface::new().column("todo", Rect::new(0.0, 0.0, 100.0, 300.0), 20.0, &["t0", "t1"]);
        let s = root.context_mut().unwrap();
        let mut g = Gesture::new();
        g.pick_up(s, &card, &surface, Point::new(10.0, 5.0)).unwrap();
        g.enter(s, &col, Point::new(10.0, 200.0), &surface).unwrap();
        g.release(s, &card, &col, &surface).unwrap();
    });

    let mounted = handle.find("drag root mounted").expect("mount logged");
    assert_eq!(mounted.level, Level::DEBUG);

    let pickup = handle.find("pickup").expect("pickup logged");
    assert_eq!(pickup.fields.get("drag_id").map(String::as_str), Some("t0"));
    assert_eq!(pickup.fields.get("origin").map(String::as_str), Some("todo[0]"));

    let commit = handle.find("drop committed").expect("commit logged");
    assert_eq!(commit.level, Level::DEBUG);
    assert_eq!(commit.fields.get("droppable").map(String::as_str), Some("todo"));
    assert!(commit.fields.get("result").is_some_and(|r| r.contains("t0")));

    let commits = handle.events().iter().filter(|e| e.message == "drop committed").count();
    assert_eq!(commits, 1);
}

#[test]
fn missing_draggable_is_a_warning() {
    let handle = with_captured(|| {
        let mut root: DragDropRoot = DragDropRoot::new(SessionConfig::default());
        root.mount().unwrap();
        root.droppable(DroppableConfig::new("todo", TypeSet::parse("task")), |_| {})
            .unwrap();
        let card = root
            .draggable(DraggableConfig::new("ghost", "todo", [DraggableType::new("task")]))
            .unwrap();
        let surface = MockSurface::new().column("todo", Rect::new(0.0, 0.0, 100.0, 300.0), 20.0, &[]);
        let mut transfer = DragTransfer::new();
        root.context_mut()
            .unwrap()
            .drag_start(&card, &surface, &mut transfer)
            .unwrap();
    });

    let warn = handle
        .events()
        .into_iter()
        .find(|e| e.level == Level::WARN)
        .expect("warning emitted");
    assert_eq!(warn.fields.get("drag_id").map(String::as_str), Some("ghost"));
}

#[test]
fn acceptance_release_is_logged() {
    let handle = with_captured(|| {
        let mut root: DragDropRoot = DragDropRoot::new(SessionConfig::default());
        root.mount().unwrap();
        let col = root
            .droppable(DroppableConfig::new("todo", TypeSet::parse("task")), |_| {})
            .unwrap();
        let card = root
            .draggable(DraggableConfig::new("t0", "todo", [DraggableType::new("task")]))
            .unwrap();
        let surface = MockSurface::new().column("todo", Rect::new(0.0, 0.0, 100.0, 300.0), 20.0, &["t0"]);
        let s = root.context_mut().unwrap();
        let mut g = Gesture::new();
        g.pick_up(s, &card, &surface, Point::new(10.0, 5.0)).unwrap();
        g.enter(s, &col, Point::new(10.0, 5.0), &surface).unwrap();
        g.leave(s, &col, &surface).unwrap();
        g.advance(s, Duration::from_millis(150));
    });

    assert!(handle.find("droppable accepts payload").is_some());
    assert!(handle.find("acceptance release scheduled").is_some());
    let released = handle.find("acceptance released").expect("release logged");
    assert_eq!(released.level, Level::DEBUG);
}
