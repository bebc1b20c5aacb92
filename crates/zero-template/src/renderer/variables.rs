//! Variable interpolation: the last pass, also used for `each` bodies.

use std::ops::Range;

use tracing::{debug, trace};

use crate::parser::{Variable, scan_variables};
use crate::renderer::pipeline::splice;
use crate::renderer::{RenderContext, RenderWarning};
use crate::types::Value;

/// Replace every `{{ path }}` that resolves to text.
///
/// Markers that do not resolve, or resolve to a list or record, stay in the
/// output verbatim. In an `each` item context a miss is not reported, since
/// the marker still reaches the root in the variable pass.
pub fn interpolate(template: &str, ctx: &mut RenderContext<'_>) -> String {
    let variables = scan_variables(template);
    debug!(markers = variables.len(), "interpolating variables");

    let replacements: Vec<(Range<usize>, &str)> = variables
        .iter()
        .filter_map(|variable| resolve(variable, ctx))
        .collect();
    splice(template, replacements)
}

fn resolve<'v>(
    variable: &Variable<'_>,
    ctx: &mut RenderContext<'v>,
) -> Option<(Range<usize>, &'v str)> {
    match ctx.lookup(variable.path) {
        Some(Value::Text(text)) => {
            trace!(path = variable.path, "resolved variable");
            Some((variable.span.clone(), text.as_str()))
        }
        Some(other) => {
            ctx.add_warning(RenderWarning::NotText {
                path: variable.path.to_string(),
                found: other.kind(),
            });
            None
        }
        None if ctx.is_item_scope() => {
            trace!(path = variable.path, "left for the root pass");
            None
        }
        None => {
            let suggestion = ctx.suggest_path(variable.path);
            ctx.add_warning(RenderWarning::UnresolvedVariable {
                path: variable.path.to_string(),
                suggestion,
            });
            None
        }
    }
}
