//! cmlint command-line front end.
//!
//! Reads list files, assembles them, runs the rule registry and prints the
//! verdicts. The binary in `main.rs` only sets up logging and calls [`run`].

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;

use cmlint_kernel::diagnostic;
use cmlint_kernel::{
    CommandSequence, LintConfig, LintReport, Linter, ParseError, RuleRegistry, Span, Verdict,
};

/// Lint CMake list files.
#[derive(Debug, Parser)]
#[command(name = "cmlint", version, about)]
pub struct Cli {
    /// Files to lint.
    #[arg(value_name = "FILE", required_unless_present = "list_rules")]
    pub files: Vec<PathBuf>,

    /// Configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run only this rule. Repeatable; overrides the config file.
    #[arg(short = 'r', long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,

    /// Print the assembled command listing.
    #[arg(short = 'l', long)]
    pub list_commands: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print registered rules and exit.
    #[arg(long)]
    pub list_rules: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Result of a whole run. Later variants are worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Clean,
    RuleFailed,
    Error,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::RuleFailed => 1,
            Outcome::Error => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<&'a CommandSequence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdicts: Option<&'a BTreeMap<String, Verdict>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Serialize)]
struct ErrorReport {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<Span>,
}

#[derive(Serialize)]
struct RuleInfo<'a> {
    name: &'a str,
    description: &'a str,
}

/// Build the linter from the config file, then apply any `--rule` overrides.
pub fn build_linter(cli: &Cli) -> Result<Linter> {
    if cli.rules.is_empty() {
        let config = LintConfig::load(cli.config.as_deref())?;
        return Ok(Linter::from_config(&config));
    }

    let mut registry = RuleRegistry::with_defaults();
    for name in &cli.rules {
        if !registry.contains(name) {
            bail!("unknown rule `{name}` (see --list-rules)");
        }
    }
    registry.retain(|name| cli.rules.iter().any(|r| r == name));
    Ok(Linter::new(registry))
}

/// Run the linter over every file named on the command line.
///
/// Verdicts and listings go to `out`, diagnostics to `err`. Every file is
/// processed even after a failure; the worst outcome is returned.
pub fn run(cli: &Cli, color: bool, out: &mut impl Write, err: &mut impl Write) -> Result<Outcome> {
    if cli.list_rules {
        list_rules(cli.format, out)?;
        return Ok(Outcome::Clean);
    }

    let linter = build_linter(cli)?;
    let printer = Printer {
        format: cli.format,
        color,
        list_commands: cli.list_commands,
        headers: cli.files.len() > 1,
    };

    let mut worst = Outcome::Clean;
    for path in &cli.files {
        let outcome = lint_file(&linter, path, &printer, out, err)?;
        worst = worst.max(outcome);
    }
    Ok(worst)
}

fn lint_file(
    linter: &Linter,
    path: &Path,
    printer: &Printer,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Outcome> {
    let _span = tracing::info_span!("file", path = %path.display()).entered();

    let source = match std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
    {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(error = %e, "skipping unreadable file");
            printer.read_error(path, &e, out, err)?;
            return Ok(Outcome::Error);
        }
    };

    match linter.lint_source(&source) {
        Ok(report) => {
            printer.report(path, &report, out)?;
            Ok(if report.passed() {
                Outcome::Clean
            } else {
                Outcome::RuleFailed
            })
        }
        Err(e) => {
            printer.parse_error(path, &source, &e, out, err)?;
            Ok(Outcome::Error)
        }
    }
}

fn list_rules(format: Format, out: &mut impl Write) -> Result<()> {
    let registry = RuleRegistry::with_defaults();
    let rules = registry.describe();
    match format {
        Format::Text => {
            let width = rules.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
            for (name, description) in rules {
                writeln!(out, "{name:width$}  {description}")?;
            }
        }
        Format::Json => {
            let rules: Vec<_> = rules
                .into_iter()
                .map(|(name, description)| RuleInfo { name, description })
                .collect();
            writeln!(out, "{}", serde_json::to_string(&rules)?)?;
        }
    }
    Ok(())
}

struct Printer {
    format: Format,
    color: bool,
    list_commands: bool,
    headers: bool,
}

impl Printer {
    fn report(&self, path: &Path, report: &LintReport, out: &mut impl Write) -> Result<()> {
        if self.format == Format::Json {
            let json = FileReport {
                file: path.display().to_string(),
                commands: self.list_commands.then_some(&report.commands),
                verdicts: Some(&report.verdicts),
                error: None,
            };
            writeln!(out, "{}", serde_json::to_string(&json)?)?;
            return Ok(());
        }

        if self.headers {
            writeln!(out, "==> {} <==", path.display())?;
        }
        if self.list_commands {
            write!(out, "{}", report.commands.listing())?;
        }
        for (rule, verdict) in &report.verdicts {
            match verdict {
                Verdict::Pass => writeln!(out, "{rule}: {}", self.paint_pass())?,
                Verdict::Fail { offenders } => {
                    let names: Vec<&str> = offenders
                        .iter()
                        .filter_map(|&i| report.commands.get(i))
                        .map(|c| c.name())
                        .collect();
                    writeln!(out, "{rule}: {} ({})", self.paint_fail(), names.join(", "))?;
                }
            }
        }
        Ok(())
    }

    fn parse_error(
        &self,
        path: &Path,
        source: &str,
        error: &ParseError,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<()> {
        let file = path.display().to_string();
        match self.format {
            Format::Json => {
                let json = FileReport {
                    file,
                    commands: None,
                    verdicts: None,
                    error: Some(ErrorReport {
                        code: error.code(),
                        message: error.to_string(),
                        span: Some(error.span()),
                    }),
                };
                writeln!(out, "{}", serde_json::to_string(&json)?)?;
            }
            Format::Text => write!(err, "{}", diagnostic::render(source, &file, error))?,
        }
        Ok(())
    }

    fn read_error(
        &self,
        path: &Path,
        error: &anyhow::Error,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<()> {
        match self.format {
            Format::Json => {
                let json = FileReport {
                    file: path.display().to_string(),
                    commands: None,
                    verdicts: None,
                    error: Some(ErrorReport {
                        code: "read-error",
                        message: format!("{error:#}"),
                        span: None,
                    }),
                };
                writeln!(out, "{}", serde_json::to_string(&json)?)?;
            }
            Format::Text => writeln!(err, "error: {error:#}")?,
        }
        Ok(())
    }

    fn paint_pass(&self) -> String {
        if self.color {
            "PASS".green().bold().to_string()
        } else {
            "PASS".to_string()
        }
    }

    fn paint_fail(&self) -> String {
        if self.color {
            "FAIL".red().bold().to_string()
        } else {
            "FAIL".to_string()
        }
    }
}
