//! Test Helper Utilities
//!
//! Shared fakes and fixtures for testing xcube-gen

#![allow(dead_code)]

pub mod fakes;
pub mod log_capture;

// Re-export commonly used items
pub use fakes::{sample_catalog, sample_oracle, FakeCatalog, FakeOracle};
pub use log_capture::{capture_logs, LogCapture};
