//! Property tests for the assembler and rule engine.

use std::collections::BTreeMap;

use cmlint_kernel::rules::AccessSpecifierRule;
use cmlint_kernel::{
    assemble, parse, Command, CommandSequence, ParseError, Rule, RuleRegistry, Token, TokenKind,
    Verdict,
};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}"
}

fn argument() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,6}",
        "[a-z0-9./-]{1,8}".prop_map(|s| format!("x{s}")),
        "[a-z ]{0,8}".prop_map(|s| format!("\"{s}\"")),
    ]
}

fn command_line() -> impl Strategy<Value = (String, Vec<String>)> {
    (name(), prop::collection::vec(argument(), 0..5))
}

fn render(lines: &[(String, Vec<String>)]) -> String {
    lines
        .iter()
        .map(|(name, args)| format!("{}({})\n", name, args.join(" ")))
        .collect()
}

/// What the assembler should hand back for an argument as written.
fn expected_text(arg: &str) -> &str {
    arg.strip_prefix('"')
        .and_then(|a| a.strip_suffix('"'))
        .unwrap_or(arg)
}

struct CountRule;

impl Rule for CountRule {
    fn name(&self) -> &str {
        "at-most-three"
    }
    fn description(&self) -> &str {
        "No more than three commands"
    }
    fn check(&self, commands: &CommandSequence) -> Verdict {
        Verdict::from_offenders((3..commands.len()).collect())
    }
}

struct NoEmptyArgs;

impl Rule for NoEmptyArgs {
    fn name(&self) -> &str {
        "no-empty-args"
    }
    fn description(&self) -> &str {
        "Every command takes arguments"
    }
    fn check(&self, commands: &CommandSequence) -> Verdict {
        Verdict::from_offenders(
            commands
                .iter()
                .enumerate()
                .filter(|(_, c)| c.arguments().is_empty())
                .map(|(i, _)| i)
                .collect(),
        )
    }
}

proptest! {
    #[test]
    fn one_command_per_line_in_order(lines in prop::collection::vec(command_line(), 0..12)) {
        let commands = parse(&render(&lines)).unwrap();
        prop_assert_eq!(commands.len(), lines.len());
        for (command, (name, args)) in commands.iter().zip(&lines) {
            prop_assert_eq!(command.name(), name.as_str());
            let expected: Vec<&str> = args.iter().map(|a| expected_text(a)).collect();
            let actual: Vec<&str> = command.arguments().iter().map(String::as_str).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn assembly_is_idempotent(lines in prop::collection::vec(command_line(), 0..8)) {
        let source = render(&lines);
        prop_assert_eq!(parse(&source), parse(&source));
    }

    #[test]
    fn unclosed_never_yields_partial_output(
        lines in prop::collection::vec(command_line(), 0..5),
        (name, args) in command_line(),
    ) {
        let source = format!("{}{}({}\n", render(&lines), name, args.join(" "));
        let result = parse(&source);
        prop_assert!(
            matches!(result, Err(ParseError::UnclosedParens { .. })),
            "got {:?}",
            result
        );
    }

    #[test]
    fn nested_parens_keep_position(
        (name, before) in command_line(),
        inner in prop::collection::vec("[a-z]{1,4}", 0..3),
        after in prop::collection::vec("[a-z]{1,4}", 0..3),
    ) {
        let source = format!(
            "{}({} ({}) {})\n",
            name,
            before.join(" "),
            inner.join(" "),
            after.join(" ")
        );
        let commands = parse(&source).unwrap();
        prop_assert_eq!(commands.len(), 1);

        let mut expected: Vec<String> = before.iter().map(|a| expected_text(a).to_string()).collect();
        expected.push("(".into());
        expected.extend(inner.iter().cloned());
        expected.push(")".into());
        expected.extend(after.iter().cloned());
        prop_assert_eq!(commands[0].arguments(), expected.as_slice());
    }

    #[test]
    fn invalid_token_inside_arguments_always_fails(
        prefix in prop::collection::vec(prop_oneof![
            Just(TokenKind::Space),
            Just(TokenKind::Newline),
            Just(TokenKind::ArgumentUnquoted),
            Just(TokenKind::ParenOpen),
        ], 0..6),
    ) {
        let mut tokens = vec![
            Token::new(TokenKind::Identifier, "cmd"),
            Token::new(TokenKind::ParenOpen, "("),
        ];
        tokens.extend(prefix.into_iter().map(|k| Token::new(k, "x")));
        tokens.push(Token::new(TokenKind::Invalid, "\\"));
        let result = assemble(tokens);
        prop_assert!(matches!(result, Err(ParseError::InvalidToken { .. })), "got {:?}", result);
    }

    #[test]
    fn rule_order_does_not_matter(
        lines in prop::collection::vec(command_line(), 0..8),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let commands = parse(&render(&lines)).unwrap();

        let mut baseline = BTreeMap::new();
        for rule in [&AccessSpecifierRule as &dyn Rule, &CountRule, &NoEmptyArgs] {
            baseline.insert(rule.name().to_string(), rule.check(&commands));
        }

        let mut registry = RuleRegistry::new();
        for i in order {
            match i {
                0 => registry.register(AccessSpecifierRule),
                1 => registry.register(CountRule),
                _ => registry.register(NoEmptyArgs),
            }
        }
        prop_assert_eq!(registry.evaluate(&commands), baseline);
    }
}

#[test]
fn empty_name_is_never_emitted() {
    let tokens = vec![
        Token::new(TokenKind::Identifier, ""),
        Token::new(TokenKind::ParenOpen, "("),
        Token::new(TokenKind::ArgumentUnquoted, "a"),
        Token::new(TokenKind::ParenClose, ")"),
        Token::new(TokenKind::Newline, "\n"),
        Token::new(TokenKind::Identifier, "real"),
        Token::new(TokenKind::ParenOpen, "("),
        Token::new(TokenKind::ParenClose, ")"),
    ];
    let commands = assemble(tokens).unwrap();
    assert_eq!(commands.as_slice(), &[Command::new("real", vec![]).unwrap()]);
}
