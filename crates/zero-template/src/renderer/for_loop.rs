//! `{{#for target}}...{{#end_for}}` expansion, the second pass.
//!
//! For bodies are scalar only. The body is copied once per iteration with the
//! literal token `{{ index }}` (ranges) or `{{ item }}` (lists) replaced; no
//! other marker inside the body is touched here.

use tracing::{debug, trace};

use crate::parser::{Block, BlockKind, ForTarget, parse_for_target, scan_blocks};
use crate::renderer::pipeline::{report_unterminated, splice};
use crate::renderer::{RenderContext, RenderWarning};
use crate::types::Value;

/// Token replaced by the current integer of a range loop.
pub const INDEX_TOKEN: &str = "{{ index }}";

/// Token replaced by the current text of a list loop.
pub const ITEM_TOKEN: &str = "{{ item }}";

/// Expand every `for` block in `template`.
pub fn expand_for(template: &str, ctx: &mut RenderContext<'_>) -> String {
    let scan = scan_blocks(template, BlockKind::For);
    report_unterminated(scan.unterminated, ctx);
    expand_scanned(template, &scan.blocks, ctx)
}

/// Expand `for` blocks without reporting an unclosed opener.
///
/// Used after the `each` pass, where offsets into `template` no longer match
/// the text the caller wrote.
pub(crate) fn expand_for_blocks(template: &str, ctx: &mut RenderContext<'_>) -> String {
    let scan = scan_blocks(template, BlockKind::For);
    expand_scanned(template, &scan.blocks, ctx)
}

fn expand_scanned(template: &str, blocks: &[Block<'_>], ctx: &mut RenderContext<'_>) -> String {
    debug!(blocks = blocks.len(), "expanding for blocks");
    let replacements: Vec<_> = blocks
        .iter()
        .map(|block| (block.span.clone(), expand_block(block, ctx)))
        .collect();
    splice(template, replacements)
}

fn expand_block(block: &Block<'_>, ctx: &mut RenderContext<'_>) -> String {
    if block.body.contains(BlockKind::For.opener()) {
        ctx.add_warning(RenderWarning::NestedBlock {
            block: BlockKind::For,
            target: block.path().to_string(),
        });
    }

    match parse_for_target(block.target) {
        ForTarget::Range { start, end } => {
            trace!(start, end, "for range");
            // `start > end` is an empty range.
            (start..=end)
                .map(|index| block.body.replace(INDEX_TOKEN, &index.to_string()))
                .collect()
        }
        ForTarget::Path(path) => expand_list(block.body, path, ctx),
    }
}

fn expand_list(body: &str, path: &str, ctx: &mut RenderContext<'_>) -> String {
    let target = ctx.lookup(path);
    let Some(items) = target.and_then(Value::as_list) else {
        ctx.add_warning(RenderWarning::NotAList {
            block: BlockKind::For,
            target: path.to_string(),
            found: target.map_or("missing", Value::kind),
        });
        return String::new();
    };
    trace!(path, items = items.len(), "for list resolved");

    let mut output = String::new();
    for (index, item) in items.iter().enumerate() {
        match item.as_text() {
            Some(text) => output.push_str(&body.replace(ITEM_TOKEN, text)),
            None => ctx.add_warning(RenderWarning::SkippedItem {
                target: path.to_string(),
                index,
                found: item.kind(),
            }),
        }
    }
    output
}
