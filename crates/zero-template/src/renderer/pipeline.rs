//! The three-pass render pipeline.
//!
//! Passes run in a fixed order:
//! 1. `each` blocks, whose bodies hold markers scoped to the loop item
//! 2. `for` blocks, substituting `{{ index }}` / `{{ item }}` only
//! 3. variables, resolved against the root over whatever markers remain
//!
//! `each` has to go first: its item-scoped markers would otherwise be
//! resolved (or left unresolved) against the root by the variable pass.

use std::ops::Range;

use serde_json::Value as Json;
use tracing::debug;

use crate::parser::{BlockKind, Unterminated, scan_blocks};
use crate::renderer::each::expand_each;
use crate::renderer::for_loop::expand_for_blocks;
use crate::renderer::variables::interpolate;
use crate::renderer::{RenderContext, RenderError, RenderWarning};
use crate::types::Value;

/// Output of [`render_with_warnings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The rendered text, identical to what [`render`] returns.
    pub output: String,
    /// Diagnostics for markers that rendered silently.
    pub warnings: Vec<RenderWarning>,
}

/// Render `template` against `context`.
///
/// Rendering cannot fail: markers that do not resolve are left in place and
/// blocks whose target is missing render as nothing.
///
/// # Example
///
/// ```
/// use zero_template::{context, render};
///
/// let ctx = context! { "user" => context! { "name" => "Ada" } };
/// assert_eq!(render("Hi {{ user.name }}!", &ctx), "Hi Ada!");
/// assert_eq!(render("{{ missing.path }}", &ctx), "{{ missing.path }}");
/// ```
pub fn render(template: &str, context: &Value) -> String {
    render_with_warnings(template, context).output
}

/// Render `template` and also return the diagnostics collected on the way.
pub fn render_with_warnings(template: &str, context: &Value) -> Rendered {
    let mut ctx = RenderContext::new(context);
    let output = render_in(template, &mut ctx);
    let warnings = ctx.take_warnings();
    debug!(warnings = warnings.len(), "render finished");
    Rendered { output, warnings }
}

/// Convert a JSON context and render `template` against it.
///
/// # Errors
///
/// Returns [`RenderError::InvalidContext`] when `context` is a number,
/// boolean or `null`. Nothing is rendered in that case.
pub fn render_json(template: &str, context: &Json) -> Result<String, RenderError> {
    let value = Value::try_from(context)?;
    Ok(render(template, &value))
}

/// Run the three passes with an existing context.
///
/// Unclosed openers of both kinds are reported with offsets into `template`.
pub fn render_in(template: &str, ctx: &mut RenderContext<'_>) -> String {
    let output = expand_each(template, ctx);
    report_unterminated(scan_blocks(template, BlockKind::For).unterminated, ctx);
    let output = expand_for_blocks(&output, ctx);
    interpolate(&output, ctx)
}

/// Build a new string from `input` with the given ranges replaced.
///
/// Ranges must be sorted and non-overlapping, which is what the scanner
/// produces. Text between ranges is copied through unchanged.
pub(crate) fn splice<S: AsRef<str>>(
    input: &str,
    replacements: impl IntoIterator<Item = (Range<usize>, S)>,
) -> String {
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;
    for (span, replacement) in replacements {
        output.push_str(&input[cursor..span.start]);
        output.push_str(replacement.as_ref());
        cursor = span.end;
    }
    output.push_str(&input[cursor..]);
    output
}

pub(crate) fn report_unterminated(unterminated: Option<Unterminated>, ctx: &mut RenderContext<'_>) {
    if let Some(Unterminated { kind, offset }) = unterminated {
        ctx.add_warning(RenderWarning::UnterminatedBlock {
            block: kind,
            offset,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_copies_text_between_ranges() {
        let out = splice("a[b]c[d]e", [(1..4, "B"), (5..8, "")]);
        assert_eq!(out, "aBce");
    }

    #[test]
    fn splice_without_replacements_is_identity() {
        let out = splice("plain", Vec::<(Range<usize>, String)>::new());
        assert_eq!(out, "plain");
    }
}
