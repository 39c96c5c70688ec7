//! Property-based invariant tests for the enter/leave debouncer.
//!
//! 1. Logical enters and leaves alternate, starting with an enter.
//! 2. A balanced native sequence (nesting depth at most two) ends outside
//!    with equal logical enter and leave counts.
//! 3. A drop anywhere in a sequence resets the phase to outside.
//! 4. Over is forwarded iff the advertised tags intersect the accepted set.

use proptest::prelude::*;
use treedrop_core::{
    Disposition, Dragster, DragsterPhase, LogicalDragEvent, NativeDragKind, TypeSet,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn any_kind() -> impl Strategy<Value = NativeDragKind> {
    prop_oneof![
        4 => Just(NativeDragKind::Enter),
        4 => Just(NativeDragKind::Leave),
        2 => Just(NativeDragKind::Over),
        1 => Just(NativeDragKind::Drop),
    ]
}

/// A well-formed native sequence: each step either enters (depth < 2) or
/// leaves (depth > 0), and the sequence closes every open enter.
fn balanced_sequence() -> impl Strategy<Value = Vec<NativeDragKind>> {
    prop::collection::vec(any::<bool>(), 0..64).prop_map(|coin| {
        let mut depth = 0u8;
        let mut out = Vec::new();
        for enter in coin {
            if (enter && depth < 2) || depth == 0 {
                depth += 1;
                out.push(NativeDragKind::Enter);
            } else {
                depth -= 1;
                out.push(NativeDragKind::Leave);
            }
        }
        out.extend(std::iter::repeat_n(NativeDragKind::Leave, depth as usize));
        out
    })
}

fn tag_set() -> impl Strategy<Value = TypeSet> {
    prop::collection::btree_set(prop_oneof![Just("task"), Just("column"), Just("note")], 0..3)
        .prop_map(|s| s.into_iter().collect())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Alternation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn enters_and_leaves_alternate(seq in prop::collection::vec(any_kind(), 0..128)) {
        let advertised = TypeSet::parse("task");
        let mut d = Dragster::new(advertised.clone());
        let mut inside = false;
        for kind in seq {
            match d.handle(kind, &advertised).logical {
                Some(LogicalDragEvent::Enter) => {
                    prop_assert!(!inside, "two logical enters without a leave");
                    inside = true;
                }
                Some(LogicalDragEvent::Leave) => {
                    prop_assert!(inside, "logical leave without enter");
                    inside = false;
                }
                Some(LogicalDragEvent::Drop { .. }) => inside = false,
                _ => {}
            }
            prop_assert_eq!(inside, d.phase() != DragsterPhase::Outside);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Balance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn balanced_sequence_ends_outside(seq in balanced_sequence()) {
        let tags = TypeSet::parse("task");
        let mut d = Dragster::new(tags.clone());
        let (mut enters, mut leaves) = (0usize, 0usize);
        for kind in &seq {
            match d.handle(*kind, &tags).logical {
                Some(LogicalDragEvent::Enter) => enters += 1,
                Some(LogicalDragEvent::Leave) => leaves += 1,
                _ => {}
            }
        }
        prop_assert_eq!(d.phase(), DragsterPhase::Outside, "sequence {:?}", seq);
        prop_assert_eq!(enters, leaves);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Drop resets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drop_always_resets(
        prefix in prop::collection::vec(any_kind(), 0..32),
        advertised in tag_set(),
    ) {
        let mut d = Dragster::new(TypeSet::parse("task"));
        for kind in prefix {
            d.handle(kind, &advertised);
        }
        let out = d.handle(NativeDragKind::Drop, &advertised);
        prop_assert_eq!(d.phase(), DragsterPhase::Outside);
        let is_drop = matches!(out.logical, Some(LogicalDragEvent::Drop { .. }));
        prop_assert!(is_drop);
        // A trailing leave is stale.
        prop_assert_eq!(d.handle(NativeDragKind::Leave, &advertised).logical, None);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Over filtering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn over_forwarded_iff_compatible(accepts in tag_set(), advertised in tag_set()) {
        let mut d = Dragster::new(accepts.clone());
        let out = d.handle(NativeDragKind::Over, &advertised);
        let compatible = accepts.iter().any(|t| advertised.contains(t));
        prop_assert_eq!(out.logical.is_some(), compatible);
        if !compatible {
            prop_assert_eq!(out.disposition, Disposition::PASS);
        }
    }
}
