//! slotter-scheduler: Greedy meeting slot scheduler
//!
//! This crate assigns mentor/fellow meetings to slots within time blocks:
//! - Mutual free-slot search
//! - Single-pass first-fit placement per time block
//! - Independent processing of many blocks, optionally in parallel

pub mod placement;
pub mod scheduler;

pub use placement::{find_mutual_slot, FirstFit, SlotStrategy};
pub use scheduler::{schedule_time_block, Scheduler};
