//! Human-readable rendering of parse errors.

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

use crate::error::ParseError;

/// Render `error` against `source` as a labelled report.
///
/// Colour is off so the output is stable in logs and tests.
pub fn render(source: &str, filename: &str, error: &ParseError) -> String {
    let span = clamp(error.span(), source.len());
    let label = match error {
        ParseError::UnclosedParens { .. } => "this command is never closed",
        ParseError::UnexpectedIdentifier { .. } => "start a new line before this command",
        ParseError::InvalidToken { .. } => "not valid here",
        _ => "here",
    };

    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, (filename, span.clone()))
        .with_config(
            Config::default()
                .with_color(false)
                .with_index_type(IndexType::Byte),
        )
        .with_code(error.code())
        .with_message(error.to_string())
        .with_label(Label::new((filename, span)).with_message(label))
        .finish()
        .write((filename, Source::from(source)), &mut out);

    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        // Fall back to the bare message if the report can't be laid out.
        Err(_) => format!("{filename}: error[{}]: {error}", error.code()),
    }
}

fn clamp(span: std::ops::Range<usize>, len: usize) -> std::ops::Range<usize> {
    let start = span.start.min(len);
    let end = span.end.clamp(start, len);
    start..end
}
