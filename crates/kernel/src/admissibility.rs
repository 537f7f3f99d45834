//! Admissibility filter: which mandate types the state machine can legally
//! act on from each lifecycle state.
//!
//! A mandate outside the admissible set is discarded before arbitration ever
//! sees it, so ranking only ever runs over actionable candidates.

use arbiter_core::{MandateType, PositionState};

/// Returns the mandate types the state machine can act on from `state`.
///
/// The table is total over both enums; a new state or mandate type is a
/// compile-time-visible change here.
#[must_use]
pub const fn admissible_types(state: PositionState) -> &'static [MandateType] {
    match state {
        PositionState::Flat => &[MandateType::Entry, MandateType::Hold, MandateType::Block],
        PositionState::Entering => &[MandateType::Exit, MandateType::Block],
        PositionState::Open => &[
            MandateType::Reduce,
            MandateType::Exit,
            MandateType::Hold,
            MandateType::Block,
        ],
        PositionState::Reducing => &[MandateType::Reduce, MandateType::Exit],
        PositionState::Closing => &[],
    }
}

/// Returns true if `mandate_type` is admissible from `state`.
#[must_use]
pub fn is_admissible(state: PositionState, mandate_type: MandateType) -> bool {
    admissible_types(state).contains(&mandate_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_admits_entry_hold_block() {
        let admissible = admissible_types(PositionState::Flat);
        assert!(admissible.contains(&MandateType::Entry));
        assert!(admissible.contains(&MandateType::Hold));
        assert!(admissible.contains(&MandateType::Block));
        assert!(!admissible.contains(&MandateType::Exit));
        assert!(!admissible.contains(&MandateType::Reduce));
    }

    #[test]
    fn entering_admits_exit_and_block_only() {
        assert!(is_admissible(PositionState::Entering, MandateType::Exit));
        assert!(is_admissible(PositionState::Entering, MandateType::Block));
        assert!(!is_admissible(PositionState::Entering, MandateType::Entry));
        assert!(!is_admissible(PositionState::Entering, MandateType::Reduce));
        assert!(!is_admissible(PositionState::Entering, MandateType::Hold));
    }

    #[test]
    fn open_admits_everything_but_entry() {
        assert!(is_admissible(PositionState::Open, MandateType::Reduce));
        assert!(is_admissible(PositionState::Open, MandateType::Exit));
        assert!(is_admissible(PositionState::Open, MandateType::Hold));
        assert!(is_admissible(PositionState::Open, MandateType::Block));
        assert!(!is_admissible(PositionState::Open, MandateType::Entry));
    }

    #[test]
    fn reducing_admits_reduce_and_exit_only() {
        assert!(is_admissible(PositionState::Reducing, MandateType::Reduce));
        assert!(is_admissible(PositionState::Reducing, MandateType::Exit));
        assert!(!is_admissible(PositionState::Reducing, MandateType::Hold));
        assert!(!is_admissible(PositionState::Reducing, MandateType::Block));
        assert!(!is_admissible(PositionState::Reducing, MandateType::Entry));
    }

    #[test]
    fn closing_admits_nothing() {
        assert!(admissible_types(PositionState::Closing).is_empty());
        for mandate_type in MandateType::ALL {
            assert!(!is_admissible(PositionState::Closing, mandate_type));
        }
    }

    #[test]
    fn exits_are_reachable_from_every_holding_state() {
        // Exits must never be locked out while exposure exists.
        for state in [
            PositionState::Entering,
            PositionState::Open,
            PositionState::Reducing,
        ] {
            assert!(is_admissible(state, MandateType::Exit));
        }
    }
}
