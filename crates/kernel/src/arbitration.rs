//! Mandate arbitration engine: resolves a surviving mandate set into exactly
//! one action.
//!
//! Authority is a fixed total order over mandate types; same-type conflicts
//! resolve by closed rules. The engine reads nothing but its arguments — no
//! clocks, no randomness, no hidden counters — so an identical mandate set
//! always resolves identically.

use arbiter_core::{Action, Mandate, MandateType};

/// Authority rank of a mandate type. Higher wins.
///
/// Fixed total order: exit > reduce > block > hold > entry. Exit strictly
/// dominates everything; block dominates entry and hold but never exit or
/// reduce, since a reduction actively cuts exposure while a block only
/// prevents new exposure.
#[must_use]
pub const fn authority_rank(mandate_type: MandateType) -> u8 {
    match mandate_type {
        MandateType::Exit => 4,
        MandateType::Reduce => 3,
        MandateType::Block => 2,
        MandateType::Hold => 1,
        MandateType::Entry => 0,
    }
}

/// Outcome of resolving one surviving mandate set.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub selected_action: Action,
    /// Trigger of the first mandate, in input order, of the winning type.
    pub selected_trigger: Option<String>,
    /// Surviving mandates displaced by the winner (or by a no-action
    /// outcome), in input order.
    pub suppressed: Vec<Mandate>,
}

impl Resolution {
    fn no_action(suppressed: Vec<Mandate>) -> Self {
        Self {
            selected_action: Action::NoAction,
            selected_trigger: None,
            suppressed,
        }
    }
}

/// Resolves the surviving mandate set for one symbol into exactly one action.
///
/// An empty set resolves to no-action. Otherwise the highest authority rank
/// present decides the type, and same-type rules collapse the subset at that
/// rank: any exit wins unconditionally and idempotently; reduces collapse to
/// one; a block suppresses entries and holds but never becomes an action
/// itself; entries that disagree on direction cancel to no-action; holds are
/// never emitted. Every surviving mandate that did not source the selected
/// action lands in [`Resolution::suppressed`].
#[must_use]
pub fn arbitrate(survivors: Vec<Mandate>) -> Resolution {
    // Ranks are unique per type, so the max rank names exactly one type.
    let Some(top_type) = survivors
        .iter()
        .map(|m| m.mandate_type)
        .max_by_key(|t| authority_rank(*t))
    else {
        return Resolution::no_action(Vec::new());
    };

    match top_type {
        MandateType::Exit => collapse_to(Action::Exit, MandateType::Exit, survivors),
        MandateType::Reduce => collapse_to(Action::Reduce, MandateType::Reduce, survivors),
        // A block never becomes an action: with no exit or reduce above it,
        // the cycle result is no-action.
        MandateType::Block | MandateType::Hold => Resolution::no_action(survivors),
        MandateType::Entry => resolve_entries(survivors),
    }
}

/// Collapses the winning type to a single action; everything else, including
/// duplicate winners, is suppressed.
fn collapse_to(action: Action, winner: MandateType, survivors: Vec<Mandate>) -> Resolution {
    let mut suppressed = survivors;
    let first = suppressed
        .iter()
        .position(|m| m.mandate_type == winner)
        .expect("winning type present");
    let selected = suppressed.remove(first);

    Resolution {
        selected_action: action,
        selected_trigger: Some(selected.trigger_id),
        suppressed,
    }
}

/// Directional ambiguity never resolves by preference: entries that disagree
/// cancel the cycle to no-action.
fn resolve_entries(survivors: Vec<Mandate>) -> Resolution {
    let mut directions = survivors
        .iter()
        .filter(|m| m.mandate_type == MandateType::Entry)
        .filter_map(|m| m.direction);
    let Some(first) = directions.next() else {
        return Resolution::no_action(survivors);
    };
    if directions.any(|d| d != first) {
        tracing::debug!("conflicting entry directions, resolving to no-action");
        return Resolution::no_action(survivors);
    }

    collapse_to(Action::Entry { direction: first }, MandateType::Entry, survivors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::Direction;

    #[test]
    fn authority_order_is_total_and_fixed() {
        assert!(authority_rank(MandateType::Exit) > authority_rank(MandateType::Reduce));
        assert!(authority_rank(MandateType::Reduce) > authority_rank(MandateType::Block));
        assert!(authority_rank(MandateType::Block) > authority_rank(MandateType::Hold));
        assert!(authority_rank(MandateType::Hold) > authority_rank(MandateType::Entry));
    }

    #[test]
    fn empty_set_resolves_to_no_action() {
        let resolution = arbitrate(Vec::new());
        assert_eq!(resolution.selected_action, Action::NoAction);
        assert!(resolution.suppressed.is_empty());
        assert!(resolution.selected_trigger.is_none());
    }

    #[test]
    fn exit_dominates_everything_present() {
        let resolution = arbitrate(vec![
            Mandate::entry(Direction::Long, "e1"),
            Mandate::block("b1"),
            Mandate::exit("x1"),
            Mandate::reduce("r1"),
        ]);
        assert_eq!(resolution.selected_action, Action::Exit);
        assert_eq!(resolution.selected_trigger.as_deref(), Some("x1"));
        assert_eq!(resolution.suppressed.len(), 3);
    }

    #[test]
    fn multiple_exits_collapse_to_one() {
        let resolution = arbitrate(vec![Mandate::exit("x1"), Mandate::exit("x2")]);
        assert_eq!(resolution.selected_action, Action::Exit);
        assert_eq!(resolution.selected_trigger.as_deref(), Some("x1"));
        assert_eq!(resolution.suppressed.len(), 1);
        assert_eq!(resolution.suppressed[0].trigger_id, "x2");
    }

    #[test]
    fn reduce_beats_block_hold_entry() {
        let resolution = arbitrate(vec![
            Mandate::block("b1"),
            Mandate::reduce("r1"),
            Mandate::reduce("r2"),
        ]);
        assert_eq!(resolution.selected_action, Action::Reduce);
        assert_eq!(resolution.selected_trigger.as_deref(), Some("r1"));
        assert_eq!(resolution.suppressed.len(), 2);
    }

    #[test]
    fn block_suppresses_entry_without_becoming_an_action() {
        let resolution = arbitrate(vec![
            Mandate::entry(Direction::Long, "e1"),
            Mandate::block("b1"),
        ]);
        assert_eq!(resolution.selected_action, Action::NoAction);
        assert!(resolution.selected_trigger.is_none());
        assert_eq!(resolution.suppressed.len(), 2);
    }

    #[test]
    fn hold_is_never_emitted_as_an_action() {
        let resolution = arbitrate(vec![Mandate::hold("h1")]);
        assert_eq!(resolution.selected_action, Action::NoAction);
        assert_eq!(resolution.suppressed.len(), 1);
    }

    #[test]
    fn agreeing_entries_collapse_to_one() {
        let resolution = arbitrate(vec![
            Mandate::entry(Direction::Short, "e1"),
            Mandate::entry(Direction::Short, "e2"),
        ]);
        assert_eq!(
            resolution.selected_action,
            Action::Entry {
                direction: Direction::Short
            }
        );
        assert_eq!(resolution.selected_trigger.as_deref(), Some("e1"));
        assert_eq!(resolution.suppressed.len(), 1);
    }

    #[test]
    fn conflicting_entry_directions_cancel_to_no_action() {
        let resolution = arbitrate(vec![
            Mandate::entry(Direction::Long, "e1"),
            Mandate::entry(Direction::Short, "e2"),
        ]);
        assert_eq!(resolution.selected_action, Action::NoAction);
        assert_eq!(resolution.suppressed.len(), 2);
    }

    #[test]
    fn entry_with_hold_present_is_suppressed_by_hold() {
        // Hold outranks entry but never executes.
        let resolution = arbitrate(vec![
            Mandate::entry(Direction::Long, "e1"),
            Mandate::hold("h1"),
        ]);
        assert_eq!(resolution.selected_action, Action::NoAction);
        assert_eq!(resolution.suppressed.len(), 2);
    }

    #[test]
    fn resolution_is_deterministic_across_repeats() {
        let mandates = vec![
            Mandate::entry(Direction::Long, "e1"),
            Mandate::reduce("r1"),
            Mandate::block("b1"),
        ];
        let first = arbitrate(mandates.clone());
        for _ in 0..10 {
            assert_eq!(arbitrate(mandates.clone()), first);
        }
    }
}
