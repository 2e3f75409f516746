//! Time block, request and schedule type definitions

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::UnschedulableBlock;

/// An independent scheduling unit, e.g. Monday AM
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Day label as given in the input
    pub day: String,
    /// Half-day period label (AM/PM)
    pub period: String,
}

impl TimeBlock {
    pub fn new(day: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            period: period.into(),
        }
    }
}

impl std::fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.period)
    }
}

/// One participant's slots within a time block.
///
/// Each position is either free or holds the name of the counterpart met in
/// that slot. The length is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotTable(Vec<Option<String>>);

impl SlotTable {
    /// Create a table with `slot_count` free slots
    pub fn new(slot_count: usize) -> Self {
        Self(vec![None; slot_count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no slot is booked
    pub fn is_unbooked(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.0.get(slot).and_then(|s| s.as_deref())
    }

    /// True if `slot` exists and is unassigned
    pub fn is_free(&self, slot: usize) -> bool {
        matches!(self.0.get(slot), Some(None))
    }

    /// Record `who` in `slot`, returning whatever was there before
    pub fn book(&mut self, slot: usize, who: &str) -> Option<String> {
        self.0
            .get_mut(slot)
            .and_then(|s| s.replace(who.to_string()))
    }

    /// Booked slots in slot order
    pub fn booked(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|name| (i, name)))
    }
}

/// Mentor requests for one time block.
///
/// Mentors are kept in an explicit sequence; that sequence is the order in
/// which the scheduler processes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestList {
    order: Vec<String>,
    requests: HashMap<String, Vec<Option<String>>>,
}

impl RequestList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a mentor's requests.
    ///
    /// A mentor inserted again keeps its original position and has its
    /// requests replaced. Returns the replaced requests, if any.
    pub fn insert(
        &mut self,
        mentor: impl Into<String>,
        requests: Vec<Option<String>>,
    ) -> Option<Vec<Option<String>>> {
        match self.requests.entry(mentor.into()) {
            Entry::Occupied(mut e) => Some(e.insert(requests)),
            Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(requests);
                None
            }
        }
    }

    /// Mentors in processing order
    pub fn mentors(&self) -> &[String] {
        &self.order
    }

    pub fn requests(&self, mentor: &str) -> Option<&[Option<String>]> {
        self.requests.get(mentor).map(Vec::as_slice)
    }

    /// Mentors with their requests, in processing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<String>])> {
        self.order.iter().map(move |m| {
            let requests = self.requests.get(m).map(Vec::as_slice).unwrap_or(&[]);
            (m.as_str(), requests)
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<M, R> FromIterator<(M, R)> for RequestList
where
    M: Into<String>,
    R: IntoIterator<Item = Option<String>>,
{
    fn from_iter<I: IntoIterator<Item = (M, R)>>(iter: I) -> Self {
        let mut list = RequestList::new();
        for (mentor, requests) in iter {
            list.insert(mentor, requests.into_iter().collect());
        }
        list
    }
}

/// Participant name to slot table, in first-encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleBook {
    order: Vec<String>,
    tables: HashMap<String, SlotTable>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a participant's table, creating an all-free one on first use
    pub fn entry(&mut self, name: &str, slot_count: usize) -> &mut SlotTable {
        match self.tables.entry(name.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(SlotTable::new(slot_count))
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SlotTable> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Participants and their tables in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotTable)> {
        self.order
            .iter()
            .filter_map(move |name| self.tables.get(name).map(|t| (name.as_str(), t)))
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Serialize for ScheduleBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, table) in self.iter() {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}

/// Completed schedules for one time block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockSchedule {
    /// Mentor name to fellows met per slot
    pub mentors: ScheduleBook,
    /// Fellow name to mentors met per slot
    pub fellows: ScheduleBook,
}

impl BlockSchedule {
    /// Number of meetings booked in the block
    pub fn meeting_count(&self) -> usize {
        self.mentors
            .iter()
            .map(|(_, table)| table.booked().count())
            .sum()
    }
}

/// Request lists for every time block.
///
/// Blocks are grouped by day in first-seen day order, and by first-seen
/// period within a day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockRequests {
    order: Vec<TimeBlock>,
    blocks: HashMap<TimeBlock, RequestList>,
}

impl BlockRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the request list for a block, creating an empty one on first use
    pub fn entry(&mut self, block: TimeBlock) -> &mut RequestList {
        match self.blocks.entry(block) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let day = &e.key().day;
                let position = match self.order.iter().rposition(|b| &b.day == day) {
                    Some(last_of_day) => last_of_day + 1,
                    None => self.order.len(),
                };
                self.order.insert(position, e.key().clone());
                e.insert(RequestList::new())
            }
        }
    }

    pub fn get(&self, block: &TimeBlock) -> Option<&RequestList> {
        self.blocks.get(block)
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TimeBlock, &RequestList)> {
        self.order
            .iter()
            .filter_map(move |b| self.blocks.get(b).map(|r| (b, r)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl IntoIterator for BlockRequests {
    type Item = (TimeBlock, RequestList);
    type IntoIter = std::vec::IntoIter<(TimeBlock, RequestList)>;

    fn into_iter(mut self) -> Self::IntoIter {
        let blocks: Vec<_> = self
            .order
            .into_iter()
            .filter_map(|b| self.blocks.remove(&b).map(|r| (b, r)))
            .collect();
        blocks.into_iter()
    }
}

/// Result of scheduling one time block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BlockOutcome {
    /// Every requested pairing was placed
    Scheduled(BlockSchedule),
    /// Some pairing could not be placed; no partial schedule is kept
    Unschedulable(UnschedulableBlock),
}

impl BlockOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, BlockOutcome::Scheduled(_))
    }

    pub fn schedule(&self) -> Option<&BlockSchedule> {
        match self {
            BlockOutcome::Scheduled(s) => Some(s),
            BlockOutcome::Unschedulable(_) => None,
        }
    }
}

impl From<Result<BlockSchedule, UnschedulableBlock>> for BlockOutcome {
    fn from(result: Result<BlockSchedule, UnschedulableBlock>) -> Self {
        match result {
            Ok(schedule) => BlockOutcome::Scheduled(schedule),
            Err(e) => BlockOutcome::Unschedulable(e),
        }
    }
}
