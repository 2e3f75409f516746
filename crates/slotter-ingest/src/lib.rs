//! slotter-ingest: Request input for slotter
//!
//! This crate turns a mentor request CSV into per-time-block request lists:
//! - Column layout driven by configuration
//! - Rows for unconfirmed time blocks are skipped
//! - Block and mentor order follow the file

pub mod reader;

pub use reader::{read_requests, read_requests_from_path};
