//! Miette diagnostic wrapper for template and context problems.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![expect(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;
use thiserror::Error;
use zero_template::parser::Unterminated;

/// A miette-compatible diagnostic pointing into a template or context file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(zt::check))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Diagnostic for a block opener with no closer.
    pub fn unterminated(path: &Path, content: &str, unterminated: Unterminated) -> Self {
        let kind = unterminated.kind;
        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (unterminated.offset, kind.opener().len()).into(),
            message: format!("#{kind} block is never closed"),
            help: Some(format!(
                "add {} after the block body; until then the opener renders as text",
                kind.closer()
            )),
        }
    }

    /// Diagnostic for a context file that failed to parse.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // Convert line:column to byte offset.
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: format!("invalid JSON: {err}"),
            help: None,
        }
    }
}
