//! `access-specifier`: target-scoped commands must say who sees their effect.

use crate::command::{Command, CommandSequence};

use super::{Rule, Verdict};

/// Commands whose arguments must include PUBLIC, PRIVATE or INTERFACE.
const TARGET_SCOPED_COMMANDS: [&str; 8] = [
    "target_compile_definitions",
    "target_compile_options",
    "target_include_directories",
    "target_link_directories",
    "target_link_options",
    "target_link_libraries",
    "target_precompile_headers",
    "target_sources",
];

const ACCESS_SPECIFIERS: [&str; 3] = ["PUBLIC", "PRIVATE", "INTERFACE"];

// TODO: target_link_libraries has a legacy signature with no specifier at
// all; it is flagged like the others until there is a way to opt it out.

/// Fails for every target-scoped command with no access specifier argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessSpecifierRule;

impl AccessSpecifierRule {
    fn is_target_scoped(command: &Command) -> bool {
        TARGET_SCOPED_COMMANDS
            .iter()
            .any(|name| command.name_eq_ignore_ascii_case(name))
    }

    fn has_specifier(command: &Command) -> bool {
        command.arguments().iter().any(|arg| {
            ACCESS_SPECIFIERS
                .iter()
                .any(|specifier| arg.eq_ignore_ascii_case(specifier))
        })
    }
}

impl Rule for AccessSpecifierRule {
    fn name(&self) -> &str {
        "access-specifier"
    }

    fn description(&self) -> &str {
        "target_* commands must use PUBLIC, PRIVATE or INTERFACE"
    }

    fn check(&self, commands: &CommandSequence) -> Verdict {
        Verdict::from_offenders(
            commands
                .iter()
                .enumerate()
                .filter(|(_, c)| Self::is_target_scoped(c) && !Self::has_specifier(c))
                .map(|(i, _)| i)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse;
    use rstest::rstest;

    fn check(source: &str) -> Verdict {
        AccessSpecifierRule.check(&parse(source).unwrap())
    }

    #[test]
    fn missing_specifier_fails() {
        assert_eq!(
            check("target_sources(mylib a.cpp)\n"),
            Verdict::Fail { offenders: vec![0] }
        );
    }

    #[test]
    fn private_passes() {
        assert_eq!(check("target_sources(mylib PRIVATE a.cpp)\n"), Verdict::Pass);
    }

    #[rstest]
    #[case("target_compile_definitions")]
    #[case("target_compile_options")]
    #[case("target_include_directories")]
    #[case("target_link_directories")]
    #[case("target_link_options")]
    #[case("target_link_libraries")]
    #[case("target_precompile_headers")]
    #[case("target_sources")]
    fn every_target_command_is_checked(#[case] name: &str) {
        assert!(!check(&format!("{name}(lib x)\n")).is_pass());
        assert!(check(&format!("{name}(lib INTERFACE x)\n")).is_pass());
    }

    #[rstest]
    #[case("TARGET_SOURCES(lib public a.cpp)\n")]
    #[case("Target_Sources(lib Private a.cpp)\n")]
    #[case("target_sources(lib \"interface\" a.cpp)\n")]
    fn comparison_ignores_case(#[case] source: &str) {
        assert!(check(source).is_pass());
    }

    #[test]
    fn other_commands_are_ignored() {
        assert!(check("add_library(lib a.cpp)\nmessage(hi)\n").is_pass());
        assert!(check("").is_pass());
    }

    #[test]
    fn specifier_must_be_whole_argument() {
        assert!(!check("target_sources(lib PUBLIC_HEADERS a.h)\n").is_pass());
    }

    #[test]
    fn every_offender_is_reported() {
        let source = "\
target_sources(a x.cpp)
target_sources(b PUBLIC y.cpp)
add_executable(c z.cpp)
target_link_libraries(c a)
";
        assert_eq!(check(source), Verdict::Fail { offenders: vec![0, 3] });
    }
}
