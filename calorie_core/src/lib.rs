#![forbid(unsafe_code)]

//! Core domain model and business logic for the calorie tracker.
//!
//! This crate provides:
//! - Domain types (meals, workouts, plain records)
//! - Persistence (key-value store, tracker records)
//! - The tracker and its render seam
//! - Input validation, filtering and CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod storage;
pub mod stats;
pub mod view;
pub mod tracker;
pub mod input;
pub mod filter;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, DEFAULT_CALORIE_LIMIT};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use storage::Storage;
pub use stats::Stats;
pub use view::{NullView, View};
pub use tracker::Tracker;
pub use input::{parse_limit, ItemInput};
