//! Runners for cmlint's data-driven tests.
//!
//! The cases live in the workspace `tests/` dir:
//! - `tests/lexer/tokens.txt`: one `input => tokens` case per line
//! - `tests/assembler/*.test`: blocks of source and the commands it assembles to
//!
//! Each runner returns a [`TestSummary`] that the kernel's integration tests
//! print and assert on.

pub mod assembler;
pub mod lexer;
pub mod sexpr;

use std::fmt;

/// Outcome of one data-file case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail { expected: String, actual: String },
}

impl TestResult {
    /// Compare rendered output against the expectation.
    pub fn compare(expected: &str, actual: String) -> Self {
        if actual == expected {
            TestResult::Pass
        } else {
            TestResult::Fail {
                expected: expected.to_string(),
                actual,
            }
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass)
    }

    pub fn is_fail(&self) -> bool {
        !self.is_pass()
    }
}

/// A failing case and where it sits in its data file.
#[derive(Debug, Clone)]
pub struct TestFailure {
    pub name: String,
    pub line: usize,
    pub expected: String,
    pub actual: String,
}

/// Tally of a whole data file.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<TestFailure>,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: TestResult) {
        match result {
            TestResult::Pass => self.passed += 1,
            TestResult::Fail { expected, actual } => {
                self.failed += 1;
                self.failures.push(TestFailure {
                    name: name.into(),
                    line,
                    expected,
                    actual,
                });
            }
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} cases: {} passed, {} failed", self.total(), self.passed, self.failed)?;
        for failure in &self.failures {
            writeln!(f, "line {}: {}", failure.line, failure.name)?;
            writeln!(f, "  want: {}", failure.expected)?;
            writeln!(f, "  got:  {}", failure.actual)?;
        }
        Ok(())
    }
}
