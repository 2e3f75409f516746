//! Meeting slot placement

use slotter_core::SlotTable;

/// First slot index free in both tables, scanning from slot 0.
///
/// Only indices present in both tables are considered.
pub fn find_mutual_slot(a: &SlotTable, b: &SlotTable) -> Option<usize> {
    (0..a.len().min(b.len())).find(|&slot| a.is_free(slot) && b.is_free(slot))
}

/// Strategy for choosing the slot of a new meeting
pub trait SlotStrategy: Send + Sync {
    /// Pick a slot free for both participants, if any
    fn find_slot(&self, mentor: &SlotTable, fellow: &SlotTable) -> Option<usize>;
}

/// Earliest mutually free slot
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFit;

impl SlotStrategy for FirstFit {
    fn find_slot(&self, mentor: &SlotTable, fellow: &SlotTable) -> Option<usize> {
        find_mutual_slot(mentor, fellow)
    }
}
