//! `{{#each path}}...{{#end_each}}` expansion, the first pass.

use tracing::{debug, trace};

use crate::parser::{Block, BlockKind, scan_blocks};
use crate::renderer::pipeline::{report_unterminated, splice};
use crate::renderer::variables::interpolate;
use crate::renderer::{RenderContext, RenderWarning};
use crate::types::Value;

/// Expand every `each` block in `template`.
///
/// Each body is interpolated once per list item with the item as root.
/// A target that is missing or not a list renders as nothing.
pub fn expand_each(template: &str, ctx: &mut RenderContext<'_>) -> String {
    let scan = scan_blocks(template, BlockKind::Each);
    debug!(blocks = scan.blocks.len(), "expanding each blocks");
    report_unterminated(scan.unterminated, ctx);

    let replacements: Vec<_> = scan
        .blocks
        .iter()
        .map(|block| (block.span.clone(), expand_block(block, ctx)))
        .collect();
    splice(template, replacements)
}

fn expand_block(block: &Block<'_>, ctx: &mut RenderContext<'_>) -> String {
    let path = block.path();
    if block.body.contains(BlockKind::Each.opener()) {
        ctx.add_warning(RenderWarning::NestedBlock {
            block: BlockKind::Each,
            target: path.to_string(),
        });
    }

    let target = ctx.lookup(path);
    let Some(items) = target.and_then(Value::as_list) else {
        ctx.add_warning(RenderWarning::NotAList {
            block: BlockKind::Each,
            target: path.to_string(),
            found: target.map_or("missing", Value::kind),
        });
        return String::new();
    };
    trace!(path, items = items.len(), "each target resolved");

    let mut output = String::new();
    for item in items {
        let mut scope = RenderContext::for_item(item);
        output.push_str(&interpolate(block.body, &mut scope));
        ctx.merge_warnings_from(&mut scope);
    }
    output
}
