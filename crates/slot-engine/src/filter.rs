//! Subtract busy intervals from a list of candidate slots.
//!
//! A slot is dropped when it starts together with a busy interval or lies strictly
//! inside one. A slot that starts exactly when a busy interval ends is kept.

use crate::model::{truncate_to_minute, BusyInterval, Slot, SlotList};

/// How a slot start is compared with a busy interval's start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMatch {
    /// Compare at minute granularity; seconds and below are ignored on both sides.
    #[default]
    Minute,
    /// Compare exact instants.
    Exact,
}

/// Remove every slot that conflicts with `busy`, keeping the input order.
///
/// The busy list may be in any order and may overlap. Cost is
/// `O(slots * busy)`, which is fine for one day's worth of both.
pub fn filter_slots(slots: &SlotList, busy: &[BusyInterval]) -> SlotList {
    filter_slots_with(slots, busy, StartMatch::default())
}

/// [`filter_slots`] with an explicit [`StartMatch`] rule.
pub fn filter_slots_with(slots: &SlotList, busy: &[BusyInterval], rule: StartMatch) -> SlotList {
    let kept: Vec<Slot> = slots
        .iter()
        .filter(|slot| !busy.iter().any(|b| conflicts(slot, b, rule)))
        .copied()
        .collect();

    tracing::debug!(
        candidates = slots.len(),
        busy = busy.len(),
        kept = kept.len(),
        "filtered slots against busy intervals"
    );

    SlotList::from_sorted(kept)
}

/// True when `slot` is blocked by `busy` under `rule`.
pub fn conflicts(slot: &Slot, busy: &BusyInterval, rule: StartMatch) -> bool {
    let same_start = match rule {
        StartMatch::Minute => slot.start_minute() == truncate_to_minute(busy.start),
        StartMatch::Exact => slot.start == busy.start,
    };
    same_start || busy.strictly_contains(slot.start)
}
