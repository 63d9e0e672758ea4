//! Aggregated outcome of one spec run.

use std::fmt;

/// One recorded expectation failure.
#[derive(Debug, Clone)]
pub struct Failure {
    /// Zero-based registration index of the failed expectation.
    pub index: usize,
    /// Which facet of the response the expectation covered.
    pub facet: &'static str,
    /// Human-readable mismatch description.
    pub message: String,
}

/// The aggregated outcome of one spec run.
///
/// Failures appear in registration order; evaluation never reorders and
/// never stops early on a recorded mismatch.
#[derive(Debug, Clone)]
pub struct Report {
    name: String,
    evaluated: usize,
    failures: Vec<Failure>,
}

impl Report {
    pub(crate) fn new(name: String, evaluated: usize) -> Self {
        Self {
            name,
            evaluated,
            failures: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, index: usize, facet: &'static str, message: String) {
        self.failures.push(Failure {
            index,
            facet,
            message,
        });
    }

    /// Returns `true` when every expectation held.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.failures.is_empty()
    }

    /// The diagnostic name the spec was created with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of expectations evaluated.
    #[must_use]
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// The recorded failures, in registration order.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return write!(
                f,
                "spec '{}': {} expectation(s) passed",
                self.name, self.evaluated
            );
        }

        writeln!(
            f,
            "spec '{}': {} of {} expectation(s) failed",
            self.name,
            self.failures.len(),
            self.evaluated
        )?;
        for failure in &self.failures {
            writeln!(f, "  [{}] {}: {}", failure.index, failure.facet, failure.message)?;
        }
        Ok(())
    }
}
