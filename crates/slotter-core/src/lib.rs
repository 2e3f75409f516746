//! slotter-core: Core types and configuration for the slotter scheduler
//!
//! This crate provides the fundamental types used throughout slotter:
//! - Time blocks, slot tables and per-participant schedule books
//! - Ordered per-block request lists
//! - Configuration types
//! - Error handling

pub mod config;
pub mod error;
pub mod model;

pub use config::*;
pub use error::*;
pub use model::*;
