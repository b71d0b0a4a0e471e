//! Assembler test file parser and runner.
//!
//! Parses the `tests/assembler/*.test` format:
//!
//! ```text
//! # test: name
//! # expect: ok | error
//! ---
//! <list-file source>
//! ---
//! <one s-expression per command, or the error code>
//! ===
//! ```

use cmlint_kernel::parse;

use crate::sexpr::format_commands;
use crate::{TestResult, TestSummary};

/// A single assembler test case.
#[derive(Debug, Clone)]
pub struct AssemblerTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// The input source code. Always ends with a newline.
    pub input: String,
    /// What we expect from assembling.
    pub expected: AssemblerExpectation,
}

/// What we expect from assembling an input.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblerExpectation {
    /// Expected commands as S-expressions, one per line.
    Ok(String),
    /// Expected error code, e.g. `unclosed-parens`.
    Error(String),
}

/// Parse the *.test file format into test cases.
pub fn parse_assembler_tests(content: &str) -> Vec<AssemblerTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();

        let Some(name) = line.strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        let mut expect_ok = true;
        if let Some(expect) = lines.get(i).and_then(|l| l.trim().strip_prefix("# expect:")) {
            expect_ok = expect.trim() == "ok";
            i += 1;
        }

        // Skip to first ---
        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i += 1;

        let mut input = String::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input.push_str(lines[i]);
            input.push('\n');
            i += 1;
        }
        i += 1;

        let mut expected_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            expected_lines.push(lines[i].trim());
            i += 1;
        }
        i += 1;

        let expected_str = expected_lines
            .into_iter()
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let expected = if expect_ok {
            AssemblerExpectation::Ok(expected_str)
        } else {
            AssemblerExpectation::Error(expected_str)
        };

        cases.push(AssemblerTestCase {
            name,
            line_number: start_line,
            input,
            expected,
        });
    }

    cases
}

impl AssemblerTestCase {
    /// Run this test case and return the result.
    pub fn run(&self) -> TestResult {
        match (parse(&self.input), &self.expected) {
            (Ok(commands), AssemblerExpectation::Ok(expected)) => {
                TestResult::compare(expected, format_commands(&commands))
            }
            (Ok(commands), AssemblerExpectation::Error(code)) => TestResult::Fail {
                expected: format!("error: {code}"),
                actual: format_commands(&commands),
            },
            (Err(err), AssemblerExpectation::Error(code)) => {
                TestResult::compare(&format!("error: {code}"), format!("error: {}", err.code()))
            }
            (Err(err), AssemblerExpectation::Ok(expected)) => TestResult::Fail {
                expected: expected.clone(),
                actual: format!("error: {} ({err})", err.code()),
            },
        }
    }
}

/// Run all assembler test cases and return a summary.
pub fn run_assembler_tests(cases: &[AssemblerTestCase]) -> TestSummary {
    let mut summary = TestSummary::new();

    for case in cases {
        let result = case.run();
        summary.record(&case.name, case.line_number, result);
    }

    summary
}
