//! Error and warning types for rendering.

use std::io;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::BlockKind;

/// Errors that occur while loading a template from a source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No template is stored under this name.
    #[error("template not found: '{name}'")]
    NotFound { name: String },

    /// The name is absolute or escapes the source root.
    #[error("invalid template name '{name}': must be relative and stay inside the views directory")]
    InvalidName { name: String },

    /// File I/O error when reading the template.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An error that prevents rendering.
///
/// Everything else that can go wrong in a template (missing paths, wrong
/// shapes, empty ranges, unclosed blocks) renders silently and is reported
/// as a [`RenderWarning`] at most.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The top-level context is not text, a list or a record.
    #[error("invalid context: expected a string, array or object at the top level, found {found}")]
    InvalidContext { found: &'static str },
}

/// A diagnostic collected while rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderWarning {
    /// `{{ path }}` did not resolve and was left in place.
    #[error("unresolved variable '{path}'{}", did_you_mean(suggestion.as_deref()))]
    UnresolvedVariable {
        path: String,
        suggestion: Option<String>,
    },

    /// `{{ path }}` resolved to a list or record and was left in place.
    #[error("variable '{path}' is a {found}, not text")]
    NotText { path: String, found: &'static str },

    /// A block target is missing or not a list; the block rendered empty.
    #[error("#{block} target '{target}' is {found}, expected a list")]
    NotAList {
        block: BlockKind,
        target: String,
        found: &'static str,
    },

    /// A `#for` list item was not text and was skipped.
    #[error("#for '{target}' skipped item {index}: {found} is not text")]
    SkippedItem {
        target: String,
        index: usize,
        found: &'static str,
    },

    /// A block body contains an opener of the same kind.
    #[error("nested #{block} inside #{block} '{target}' is not supported; the outer block ends at the first closer")]
    NestedBlock { block: BlockKind, target: String },

    /// An opener with no closer after it; it was left in place.
    #[error("#{block} opened at byte {offset} has no closing tag")]
    UnterminatedBlock { block: BlockKind, offset: usize },
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion
        .map(|s| format!(", did you mean '{s}'?"))
        .unwrap_or_default()
}

/// Maximum edit distance for a name to count as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Returns candidates within a small edit distance of `name`, closest first.
///
/// Ties are broken alphabetically so the result does not depend on the
/// iteration order of `candidates`.
pub fn compute_suggestions<I, S>(name: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scored: Vec<(usize, String)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate = candidate.as_ref();
            let distance = levenshtein(name, candidate);
            (distance <= MAX_SUGGESTION_DISTANCE && candidate != name)
                .then(|| (distance, candidate.to_string()))
        })
        .collect();
    scored.sort();
    scored.into_iter().map(|(_, candidate)| candidate).collect()
}
