//! The lint driver: tokenize, assemble, then run every rule.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info_span, warn};

use crate::assembler::assemble;
use crate::command::CommandSequence;
use crate::config::LintConfig;
use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::rules::{RuleRegistry, Verdict};

/// Result of linting one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub commands: CommandSequence,
    pub verdicts: BTreeMap<String, Verdict>,
}

impl LintReport {
    /// True when every rule passed.
    pub fn passed(&self) -> bool {
        self.verdicts.values().all(Verdict::is_pass)
    }

    /// Failing rules with their verdicts, by name.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &Verdict)> {
        self.verdicts
            .iter()
            .filter(|(_, v)| !v.is_pass())
            .map(|(name, v)| (name.as_str(), v))
    }
}

#[derive(Debug, Clone)]
pub struct Linter {
    registry: RuleRegistry,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(RuleRegistry::with_defaults())
    }
}

impl Linter {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Built-in rules, filtered by the config's enable/disable lists.
    pub fn from_config(config: &LintConfig) -> Self {
        let mut registry = RuleRegistry::with_defaults();
        for name in config.rules.mentioned() {
            if !registry.contains(name) {
                warn!(rule = name, "config mentions unknown rule");
            }
        }
        registry.retain(|name| config.rules.allows(name));
        Self::new(registry)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Lint one source. A structural error means no verdicts at all.
    pub fn lint_source(&self, source: &str) -> Result<LintReport, ParseError> {
        let span = info_span!("lint", bytes = source.len());
        let _enter = span.enter();

        let commands = assemble(tokenize(source))?;
        debug!(commands = commands.len(), "assembly complete");

        let verdicts = self.registry.evaluate(&commands);
        Ok(LintReport { commands, verdicts })
    }
}
