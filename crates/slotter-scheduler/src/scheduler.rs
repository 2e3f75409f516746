//! Main scheduler logic

use slotter_core::{
    BlockOutcome, BlockRequests, BlockSchedule, RequestList, SchedulerConfig, SlotterError,
    SlotterResult, TimeBlock, UnschedulableBlock,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::placement::{FirstFit, SlotStrategy};

/// Schedule one time block with first-fit placement.
///
/// Mentors are processed in request-list order and each mentor's fellows in
/// the order listed. Blank entries and entries past
/// `config.request_columns` are skipped. The first pairing with no mutually
/// free slot fails the whole block; nothing placed before it is returned.
pub fn schedule_time_block(
    requests: &RequestList,
    config: &SchedulerConfig,
) -> Result<BlockSchedule, UnschedulableBlock> {
    place_block(&FirstFit, requests, config)
}

fn place_block(
    strategy: &dyn SlotStrategy,
    requests: &RequestList,
    config: &SchedulerConfig,
) -> Result<BlockSchedule, UnschedulableBlock> {
    let slot_count = config.slot_count;
    let mut schedule = BlockSchedule::default();

    for (mentor, fellows) in requests.iter() {
        let mentor_slots = schedule.mentors.entry(mentor, slot_count);

        let requested = fellows
            .iter()
            .take(config.request_columns)
            .filter_map(|f| f.as_deref())
            .map(str::trim)
            .filter(|f| !f.is_empty());

        for fellow in requested {
            let fellow_slots = schedule.fellows.entry(fellow, slot_count);

            let slot = strategy
                .find_slot(mentor_slots, fellow_slots)
                .ok_or_else(|| UnschedulableBlock {
                    mentor: mentor.to_string(),
                    fellow: fellow.to_string(),
                    slot_count,
                })?;

            mentor_slots.book(slot, fellow);
            fellow_slots.book(slot, mentor);

            debug!(mentor = mentor, fellow = fellow, slot = slot, "Meeting placed");
        }
    }

    Ok(schedule)
}

/// Scheduler runs block scheduling with a fixed configuration and strategy
#[derive(Clone)]
pub struct Scheduler {
    /// Slot and request-column capacities
    config: SchedulerConfig,
    /// Slot selection strategy
    strategy: Arc<dyn SlotStrategy>,
}

impl Scheduler {
    /// Create a new first-fit scheduler
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_strategy(config, Arc::new(FirstFit))
    }

    /// Create a scheduler with a custom slot strategy
    pub fn with_strategy(config: SchedulerConfig, strategy: Arc<dyn SlotStrategy>) -> Self {
        info!(
            slot_count = config.slot_count,
            request_columns = config.request_columns,
            "Scheduler initialized"
        );

        Self { config, strategy }
    }

    /// Schedule a single time block
    pub fn schedule_block(&self, block: &TimeBlock, requests: &RequestList) -> BlockOutcome {
        let result = place_block(self.strategy.as_ref(), requests, &self.config);

        match &result {
            Ok(schedule) => {
                info!(
                    block = %block,
                    mentors = schedule.mentors.len(),
                    fellows = schedule.fellows.len(),
                    meetings = schedule.meeting_count(),
                    "Time block scheduled"
                );
            }
            Err(e) => {
                warn!(
                    block = %block,
                    mentor = %e.mentor,
                    fellow = %e.fellow,
                    "Time block unschedulable"
                );
            }
        }

        result.into()
    }

    /// Schedule every block in order. An unschedulable block does not stop
    /// the remaining ones.
    pub fn schedule_all(&self, blocks: BlockRequests) -> Vec<(TimeBlock, BlockOutcome)> {
        blocks
            .into_iter()
            .map(|(block, requests)| {
                let outcome = self.schedule_block(&block, &requests);
                (block, outcome)
            })
            .collect()
    }

    /// Schedule every block on the blocking thread pool.
    ///
    /// Blocks share no state, so each runs on its own task. Results come back
    /// in input block order.
    pub async fn schedule_all_parallel(
        &self,
        blocks: BlockRequests,
    ) -> SlotterResult<Vec<(TimeBlock, BlockOutcome)>> {
        let handles: Vec<_> = blocks
            .into_iter()
            .map(|(block, requests)| {
                let scheduler = self.clone();
                tokio::task::spawn_blocking(move || {
                    let outcome = scheduler.schedule_block(&block, &requests);
                    (block, outcome)
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            let result = handle
                .await
                .map_err(|e| SlotterError::Internal(format!("Scheduling task failed: {}", e)))?;
            results.push(result);
        }

        Ok(results)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotter_core::SlotTable;

    fn requests(entries: &[(&str, &[&str])]) -> RequestList {
        entries
            .iter()
            .map(|(mentor, fellows)| {
                let fellows = fellows
                    .iter()
                    .map(|f| if f.is_empty() { None } else { Some(f.to_string()) });
                (*mentor, fellows.collect::<Vec<_>>())
            })
            .collect()
    }

    fn slots(table: &SlotTable) -> Vec<Option<&str>> {
        (0..table.len()).map(|i| table.get(i)).collect()
    }

    #[test]
    fn test_shared_fellow_takes_next_slot() {
        let list = requests(&[("A", &["X"]), ("B", &["X"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::default()).unwrap();

        let a = schedule.mentors.get("A").unwrap();
        let b = schedule.mentors.get("B").unwrap();
        let x = schedule.fellows.get("X").unwrap();

        assert_eq!(a.get(0), Some("X"));
        assert_eq!(b.get(0), None);
        assert_eq!(b.get(1), Some("X"));
        assert_eq!(x.get(0), Some("A"));
        assert_eq!(x.get(1), Some("B"));
        assert_eq!(x.len(), 9);
    }

    #[test]
    fn test_single_slot_overflow_fails() {
        let list = requests(&[("A", &["X", "Y"])]);
        let result = schedule_time_block(&list, &SchedulerConfig::new(1, 6));

        assert_eq!(
            result,
            Err(UnschedulableBlock {
                mentor: "A".to_string(),
                fellow: "Y".to_string(),
                slot_count: 1,
            })
        );
    }

    #[test]
    fn test_blank_entries_skipped() {
        let list = requests(&[("A", &["", "X", "  "])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::default()).unwrap();

        let a = schedule.mentors.get("A").unwrap();
        assert_eq!(a.get(0), Some("X"));
        assert_eq!(a.booked().count(), 1);
        assert_eq!(schedule.fellows.len(), 1);
    }

    #[test]
    fn test_mentor_without_requests_gets_empty_table() {
        let list = requests(&[("A", &[]), ("B", &["X"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::default()).unwrap();

        let a = schedule.mentors.get("A").unwrap();
        assert!(a.is_unbooked());
        assert_eq!(a.len(), 9);
        assert!(schedule
            .fellows
            .iter()
            .all(|(_, t)| t.booked().all(|(_, m)| m != "A")));
    }

    #[test]
    fn test_unrequested_fellow_absent() {
        let list = requests(&[("A", &["X"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::default()).unwrap();

        assert!(!schedule.fellows.contains("Y"));
        assert_eq!(schedule.fellows.names(), &["X".to_string()]);
    }

    #[test]
    fn test_mentor_order_drives_placement() {
        let list = requests(&[("B", &["X"]), ("A", &["X"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::default()).unwrap();

        let x = schedule.fellows.get("X").unwrap();
        assert_eq!(slots(x)[..2], [Some("B"), Some("A")]);
        assert_eq!(schedule.mentors.names(), &["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_requests_beyond_column_count_ignored() {
        let list = requests(&[("A", &["X", "Y", "Z"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::new(9, 2)).unwrap();

        assert_eq!(schedule.meeting_count(), 2);
        assert!(!schedule.fellows.contains("Z"));
    }

    #[test]
    fn test_repeated_fellow_books_two_slots() {
        let list = requests(&[("A", &["X", "X"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::new(3, 6)).unwrap();

        let a = schedule.mentors.get("A").unwrap();
        assert_eq!(slots(a), vec![Some("X"), Some("X"), None]);
    }

    #[test]
    fn test_late_conflict_fails_whole_block() {
        let list = requests(&[("A", &["X"]), ("B", &["Y", "X"])]);
        let result = schedule_time_block(&list, &SchedulerConfig::new(1, 6));

        let err = result.unwrap_err();
        assert_eq!(err.mentor, "B");
        assert_eq!(err.fellow, "X");
    }

    #[test]
    fn test_greedy_may_reject_schedulable_block() {
        // A valid assignment exists (A:X@0, B:Y@1, C:Y@0 and X@1), but
        // first-fit puts Y at slot 0 for B and leaves C nothing mutual.
        let list = requests(&[("A", &["X"]), ("B", &["Y"]), ("C", &["X", "Y"])]);
        let result = schedule_time_block(&list, &SchedulerConfig::new(2, 6));

        assert_eq!(result.unwrap_err().fellow, "Y");
    }

    #[test]
    fn test_interleaved_requests_fit() {
        let list = requests(&[("A", &["X", "Y"]), ("B", &["Y", "X"])]);
        let schedule = schedule_time_block(&list, &SchedulerConfig::new(2, 6)).unwrap();

        let b = schedule.mentors.get("B").unwrap();
        assert_eq!(slots(b), vec![Some("Y"), Some("X")]);
        assert_eq!(slots(schedule.fellows.get("Y").unwrap()), vec![Some("B"), Some("A")]);
    }

    #[test]
    fn test_schedule_all_continues_after_failure() {
        let mut blocks = BlockRequests::new();
        *blocks.entry(TimeBlock::new("Monday", "AM")) = requests(&[("A", &["X", "Y"])]);
        *blocks.entry(TimeBlock::new("Monday", "PM")) = requests(&[("B", &["X"])]);

        let scheduler = Scheduler::new(SchedulerConfig::new(1, 6));
        let outcomes = scheduler.schedule_all(blocks);

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, TimeBlock::new("Monday", "AM"));
        assert!(!outcomes[0].1.is_scheduled());
        assert!(outcomes[1].1.is_scheduled());
    }

    struct LastFit;

    impl SlotStrategy for LastFit {
        fn find_slot(&self, mentor: &SlotTable, fellow: &SlotTable) -> Option<usize> {
            (0..mentor.len().min(fellow.len()))
                .rev()
                .find(|&i| mentor.is_free(i) && fellow.is_free(i))
        }
    }

    #[test]
    fn test_custom_strategy() {
        let scheduler = Scheduler::with_strategy(SchedulerConfig::new(3, 6), Arc::new(LastFit));
        let list = requests(&[("A", &["X"])]);
        let outcome = scheduler.schedule_block(&TimeBlock::new("Monday", "AM"), &list);

        let schedule = outcome.schedule().unwrap();
        assert_eq!(schedule.mentors.get("A").unwrap().get(2), Some("X"));
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let mut blocks = BlockRequests::new();
        for day in ["Monday", "Tuesday", "Wednesday"] {
            for period in ["AM", "PM"] {
                *blocks.entry(TimeBlock::new(day, period)) =
                    requests(&[("A", &["X", "Y"]), ("B", &["Y", "X"]), ("C", &["Z"])]);
            }
        }
        *blocks.entry(TimeBlock::new("Thursday", "AM")) = requests(&[("A", &["X", "Y", "Z"])]);

        let scheduler = Scheduler::new(SchedulerConfig::new(2, 6));
        let sequential = scheduler.schedule_all(blocks.clone());
        let parallel = scheduler.schedule_all_parallel(blocks).await.unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.len(), 7);
        assert!(parallel[..6].iter().all(|(_, outcome)| outcome.is_scheduled()));
        assert!(!parallel[6].1.is_scheduled());
    }
}
