//! # xcube Common Library
//!
//! Shared code for the xcube tools:
//! - Card list models (raw listing entries, resolved records, cubes)
//! - Collector number ordering
//! - Error type
//! - Configuration loading
//! - Logging setup

pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use collector::compare_collector_numbers;
pub use error::{Error, Result};
pub use models::{RawCollection, RawItem, ResolvedCollection, ResolvedRecord};
