//! Property-based invariant tests for insertion-slot resolution.
//!
//! 1. The index never exceeds the candidate count.
//! 2. The slot is anchored at the end iff the index equals the count.
//! 3. Resolution is idempotent.
//! 4. A pointer above every midpoint resolves to index 0.
//! 5. A pointer past every midpoint resolves to the end.
//! 6. In a sorted column, moving the pointer down never moves the slot up.
//! 7. The anchor names the candidate at the resolved index.
//! 8. Filtering never keeps hidden elements and preserves order.

use proptest::prelude::*;
use treedrop_core::{
    Candidate, CandidateFilter, Direction, ElementSnapshot, Point, Rect, SlotAnchor,
    resolve_insertion_slot, visible_candidates,
};

// ── Helpers ─────────────────────────────────────────────────────────────

/// A stacked column: heights laid out top to bottom starting at `y = 0`.
fn column_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(1.0f64..200.0, 0..24).prop_map(|heights| {
        let mut y = 0.0;
        heights
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                let c = Candidate::new(format!("c{i}"), Rect::new(0.0, y, 100.0, h));
                y += h;
                c
            })
            .collect()
    })
}

/// Arbitrary, possibly overlapping and unordered boxes.
fn scattered_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0, 0.0f64..300.0, 0.0f64..300.0), 0..24)
        .prop_map(|boxes| {
            boxes
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, w, h))| Candidate::new(format!("s{i}"), Rect::new(x, y, w, h)))
                .collect()
        })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Vertical), Just(Direction::Horizontal)]
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Bounds, anchor agreement, idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slot_is_bounded_and_consistent(
        items in scattered_strategy(),
        pointer in point_strategy(),
        direction in direction_strategy(),
    ) {
        let slot = resolve_insertion_slot(pointer, direction, "d", &items);
        prop_assert!(slot.index <= items.len(), "index {} > len {}", slot.index, items.len());
        prop_assert_eq!(
            slot.anchor == SlotAnchor::End,
            slot.index == items.len(),
            "anchor {:?} disagrees with index {} of {}",
            slot.anchor, slot.index, items.len()
        );
        prop_assert_eq!(&slot.droppable_id, "d");

        let again = resolve_insertion_slot(pointer, direction, "d", &items);
        prop_assert_eq!(slot, again, "resolution is not idempotent");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Extremes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pointer_above_column_is_index_zero(items in column_strategy(), x in -50.0f64..150.0) {
        let slot = resolve_insertion_slot(Point::new(x, -1.0), Direction::Vertical, "d", &items);
        prop_assert_eq!(slot.index, 0);
    }

    #[test]
    fn pointer_below_column_is_end(items in column_strategy(), x in -50.0f64..150.0) {
        let bottom = items.last().map_or(0.0, |c| c.rect.bottom());
        let slot = resolve_insertion_slot(Point::new(x, bottom + 1.0), Direction::Vertical, "d", &items);
        prop_assert_eq!(slot.index, items.len());
        prop_assert_eq!(slot.anchor, SlotAnchor::End);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Monotonic in a sorted column
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slot_is_monotonic_in_pointer(
        items in column_strategy(),
        a in -100.0f64..5000.0,
        b in -100.0f64..5000.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let s_lo = resolve_insertion_slot(Point::new(0.0, lo), Direction::Vertical, "d", &items);
        let s_hi = resolve_insertion_slot(Point::new(0.0, hi), Direction::Vertical, "d", &items);
        prop_assert!(
            s_lo.index <= s_hi.index,
            "pointer {} -> {}, pointer {} -> {}",
            lo, s_lo.index, hi, s_hi.index
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Anchor names the candidate at the index
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn anchor_matches_index(
        items in scattered_strategy(),
        pointer in point_strategy(),
        direction in direction_strategy(),
    ) {
        let slot = resolve_insertion_slot(pointer, direction, "d", &items);
        if let SlotAnchor::Before(id) = &slot.anchor {
            prop_assert_eq!(id, &items[slot.index].id);
            // The winner's midpoint lies strictly ahead of the pointer.
            prop_assert!(pointer.along(direction) < items[slot.index].rect.midpoint(direction));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Filtering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filtering_drops_hidden_and_keeps_order(
        flags in prop::collection::vec((any::<bool>(), any::<bool>()), 0..32),
        exclude_grabbed in any::<bool>(),
    ) {
        let elements: Vec<ElementSnapshot> = flags
            .iter()
            .enumerate()
            .map(|(i, &(hidden, grabbed))| {
                ElementSnapshot::new(format!("e{i:02}"), Rect::default())
                    .hidden(hidden)
                    .grabbed(grabbed)
            })
            .collect();
        let filter = CandidateFilter::excluding_payload(exclude_grabbed, None);
        let kept = visible_candidates(&elements, &filter);

        for c in &kept {
            let source = elements.iter().find(|e| e.id == c.id).unwrap();
            prop_assert!(!source.hidden, "hidden element {} kept", c.id);
            if exclude_grabbed {
                prop_assert!(!source.grabbed, "grabbed element {} kept", c.id);
            }
        }
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ids, sorted, "order not preserved");
    }
}
