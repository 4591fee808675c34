//! tonal-test - Regression test framework for Tonal
//!
//! Regression tests record every comparison in a [`RegParams`] and
//! report all failures at the end, rather than stopping at the first
//! mismatch:
//!
//! ```ignore
//! use tonal_test::RegParams;
//!
//! let mut rp = RegParams::new("histogram_stats");
//! rp.compare_values(4.0, histogram.get_count(HistogramChannel::Value, 0, 255), 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
