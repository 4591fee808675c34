//! Regression test parameters and operations

use crate::error::{TestError, TestResult};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare computed values with expectations (default)
    #[default]
    Compare,
    /// Also print every compared value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running comparison index and every failure,
/// so that one run reports all mismatches instead of stopping at the
/// first.
pub struct RegParams {
    /// Name of the test (e.g., "histogram_stats")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        if self.display() {
            eprintln!("  [{}] expected {}, actual {}", self.index, expected, actual);
        }

        match check_value(self.index, expected, actual, delta) {
            Ok(()) => true,
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Compare two slices element by element
    ///
    /// Counts as a single comparison; the first differing element is
    /// reported.
    pub fn compare_slices(&mut self, expected: &[f64], actual: &[f64], delta: f64) -> bool {
        self.index += 1;

        let result = if expected.len() != actual.len() {
            Err(TestError::LengthMismatch {
                index: self.index,
                expected: expected.len(),
                actual: actual.len(),
            })
        } else {
            expected
                .iter()
                .zip(actual)
                .try_for_each(|(&e, &a)| check_value(self.index, e, a, delta))
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Record a boolean check
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        self.compare_values(f64::from(u8::from(expected)), f64::from(u8::from(actual)), 0.0)
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    fn fail(&mut self, err: TestError) {
        let msg = format!("Failure in {}_reg: {}", self.test_name, err);
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }
}

fn check_value(index: usize, expected: f64, actual: f64, delta: f64) -> TestResult<()> {
    let diff = (expected - actual).abs();
    // NaN never compares within delta
    if diff <= delta {
        Ok(())
    } else {
        Err(TestError::ValueMismatch {
            index,
            expected,
            actual,
            delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("compare"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert_eq!(rp.index(), 2);
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.compare_values(0.0, f64::NAN, 1.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 2);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_slices() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_slices(&[1.0, 2.0], &[1.0, 2.0], 0.0));
        assert!(!rp.compare_slices(&[1.0, 2.0], &[1.0], 0.0));
        assert!(!rp.compare_slices(&[1.0, 2.0], &[1.0, 3.0], 0.5));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_bool() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_bool(true, true));
        assert!(!rp.compare_bool(true, false));
    }
}
