//! Rule registry and verdicts.
//!
//! A rule is a pure check over an assembled [`CommandSequence`]. Rules don't
//! share state, so evaluation order never changes a verdict and removing one
//! rule never affects another.

mod access_specifier;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use crate::command::CommandSequence;

pub use access_specifier::AccessSpecifierRule;

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    /// Indices into the command sequence of each violating command.
    Fail { offenders: Vec<usize> },
}

impl Verdict {
    /// `Pass` when `offenders` is empty.
    pub fn from_offenders(offenders: Vec<usize>) -> Self {
        if offenders.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail { offenders }
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn offenders(&self) -> &[usize] {
        match self {
            Verdict::Pass => &[],
            Verdict::Fail { offenders } => offenders,
        }
    }
}

/// A named, pure check over a command sequence.
pub trait Rule: Send + Sync {
    /// Registry key. Kebab-case by convention.
    fn name(&self) -> &str;

    /// One-line summary for `--list-rules`.
    fn description(&self) -> &str;

    fn check(&self, commands: &CommandSequence) -> Verdict;
}

/// Registry of available rules.
#[derive(Default, Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in rule.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AccessSpecifierRule);
        registry
    }

    /// Register a rule, replacing any rule with the same name.
    pub fn register(&mut self, rule: impl Rule + 'static) {
        let name = rule.name().to_string();
        self.rules.insert(name, Arc::new(rule));
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.remove(name)
    }

    /// Keep only the rules whose name satisfies `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.rules.retain(|name, _| keep(name));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// List all rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.rules.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        let mut out: Vec<_> = self
            .rules
            .values()
            .map(|r| (r.name(), r.description()))
            .collect();
        out.sort();
        out
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every registered rule.
    pub fn evaluate(&self, commands: &CommandSequence) -> BTreeMap<String, Verdict> {
        self.rules
            .iter()
            .map(|(name, rule)| {
                let verdict = rule.check(commands);
                tracing::debug!(rule = %name, pass = verdict.is_pass(), "rule evaluated");
                (name.clone(), verdict)
            })
            .collect()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse;

    struct NonEmpty;

    impl Rule for NonEmpty {
        fn name(&self) -> &str {
            "non-empty"
        }

        fn description(&self) -> &str {
            "At least one command"
        }

        fn check(&self, commands: &CommandSequence) -> Verdict {
            if commands.is_empty() {
                Verdict::Fail { offenders: Vec::new() }
            } else {
                Verdict::Pass
            }
        }
    }

    struct NoMessage;

    impl Rule for NoMessage {
        fn name(&self) -> &str {
            "no-message"
        }

        fn description(&self) -> &str {
            "Forbid message()"
        }

        fn check(&self, commands: &CommandSequence) -> Verdict {
            Verdict::from_offenders(
                commands
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.name_eq_ignore_ascii_case("message"))
                    .map(|(i, _)| i)
                    .collect(),
            )
        }
    }

    #[test]
    fn register_and_get() {
        let mut registry = RuleRegistry::new();
        registry.register(NonEmpty);

        assert!(registry.contains("non-empty"));
        assert!(registry.get("non-empty").is_some());
        assert!(!registry.contains("nonexistent"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn names_sorted() {
        let mut registry = RuleRegistry::new();
        registry.register(NonEmpty);
        registry.register(NoMessage);
        registry.register(AccessSpecifierRule);

        assert_eq!(registry.names(), vec!["access-specifier", "no-message", "non-empty"]);
    }

    #[test]
    fn defaults_hold_access_specifier() {
        let registry = RuleRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["access-specifier"]);
    }

    #[test]
    fn evaluate_collects_every_rule() {
        let mut registry = RuleRegistry::with_defaults();
        registry.register(NoMessage);
        registry.register(NonEmpty);

        let commands = parse("message(hi)\ntarget_sources(lib a.cpp)\n").unwrap();
        let verdicts = registry.evaluate(&commands);

        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts["non-empty"], Verdict::Pass);
        assert_eq!(verdicts["no-message"], Verdict::Fail { offenders: vec![0] });
        assert_eq!(verdicts["access-specifier"], Verdict::Fail { offenders: vec![1] });
    }

    #[test]
    fn removing_a_rule_leaves_others_alone() {
        let commands = parse("message(hi)\n").unwrap();
        let mut registry = RuleRegistry::new();
        registry.register(NoMessage);
        registry.register(NonEmpty);
        let before = registry.evaluate(&commands);

        assert!(registry.remove("non-empty").is_some());
        let after = registry.evaluate(&commands);
        assert_eq!(after.len(), 1);
        assert_eq!(after["no-message"], before["no-message"]);
    }

    #[test]
    fn retain_filters_by_name() {
        let mut registry = RuleRegistry::with_defaults();
        registry.register(NonEmpty);
        registry.retain(|name| name != "non-empty");
        assert_eq!(registry.names(), vec!["access-specifier"]);
    }

    #[test]
    fn verdict_helpers() {
        assert!(Verdict::from_offenders(vec![]).is_pass());
        let fail = Verdict::from_offenders(vec![2, 5]);
        assert!(!fail.is_pass());
        assert_eq!(fail.offenders(), &[2, 5]);
    }

    #[test]
    fn verdict_json_shape() {
        assert_eq!(serde_json::to_string(&Verdict::Pass).unwrap(), r#""pass""#);
        assert_eq!(
            serde_json::to_string(&Verdict::Fail { offenders: vec![1] }).unwrap(),
            r#"{"fail":{"offenders":[1]}}"#
        );
    }
}
