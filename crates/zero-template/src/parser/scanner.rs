//! Marker scanner using winnow.
//!
//! Finds, in one left-to-right sweep, the non-overlapping markers of a single
//! category:
//! - Blocks: the opener, a target running to the first `}}`, and a body
//!   running to the first closer
//! - Variables: `{{`, content running to the first `}}`, `}}`, where the
//!   trimmed content must not start with `#` or span lines
//!
//! Matching is lazy in both places, so an inner opener inside a body is just
//! body text and the block ends at the first closer.

use super::ast::{Block, BlockKind, BlockScan, ForTarget, Marker, Outline, Unterminated, Variable};
use winnow::ascii::dec_int;
use winnow::combinator::{delimited, eof, separated_pair, terminated};
use winnow::prelude::*;
use winnow::token::take_until;

/// Scan `input` for complete blocks of one kind.
pub fn scan_blocks(input: &str, kind: BlockKind) -> BlockScan<'_> {
    let mut scan = BlockScan::default();
    let mut offset = 0;

    while let Some(found) = input[offset..].find(kind.opener()) {
        let start = offset + found;
        let mut remaining = &input[start..];
        let Ok((target, body)) = block(kind, &mut remaining) else {
            // Nothing after this opener closes it, so no later opener can
            // be closed either.
            scan.unterminated = Some(Unterminated {
                kind,
                offset: start,
            });
            break;
        };
        let end = input.len() - remaining.len();
        scan.blocks.push(Block {
            kind,
            target,
            body,
            span: start..end,
        });
        offset = end;
    }

    scan
}

/// Scan `input` for `{{ path }}` markers.
pub fn scan_variables(input: &str) -> Vec<Variable<'_>> {
    let mut variables = Vec::new();
    let mut offset = 0;

    while let Some(found) = input[offset..].find("{{") {
        let start = offset + found;
        let mut remaining = &input[start..];
        match variable(&mut remaining) {
            Ok(path) => {
                let end = input.len() - remaining.len();
                variables.push(Variable {
                    path,
                    span: start..end,
                });
                offset = end;
            }
            // `{` is one byte, so this stays on a char boundary.
            Err(_) => offset = start + 1,
        }
    }

    variables
}

/// Classify the target of a `for` block.
pub fn parse_for_target(target: &str) -> ForTarget<'_> {
    let target = target.trim();
    let mut remaining = target;
    match range(&mut remaining) {
        Ok((start, end)) => ForTarget::Range { start, end },
        Err(_) => ForTarget::Path(target),
    }
}

/// Collect every block and every variable outside a block, by position.
///
/// Both block kinds are scanned against `input` itself, so a `for` block
/// inside an `each` body is listed as well.
pub fn outline(input: &str) -> Outline<'_> {
    let mut outline = Outline::default();
    let mut blocks = Vec::new();

    for kind in [BlockKind::Each, BlockKind::For] {
        let scan = scan_blocks(input, kind);
        blocks.extend(scan.blocks);
        outline.unterminated.extend(scan.unterminated);
    }

    let variables = scan_variables(input).into_iter().filter(|variable| {
        !blocks
            .iter()
            .any(|block| block.span.contains(&variable.span.start))
    });

    outline.markers = blocks
        .iter()
        .cloned()
        .map(Marker::Block)
        .chain(variables.map(Marker::Variable))
        .collect();
    outline.markers.sort_by_key(|marker| marker.span().start);
    outline.unterminated.sort_by_key(|u| u.offset);
    outline
}

/// Calculate 1-based line and column of a byte offset.
pub fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let consumed = &input[..offset.min(input.len())];
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}

/// Parse opener, target, body and closer; yields (target, body).
fn block<'i>(kind: BlockKind, input: &mut &'i str) -> ModalResult<(&'i str, &'i str)> {
    (
        delimited(kind.opener(), take_until(0.., "}}"), "}}"),
        terminated(take_until(0.., kind.closer()), kind.closer()),
    )
        .parse_next(input)
}

/// Parse a variable marker; yields the trimmed path.
fn variable<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited("{{", take_until(0.., "}}"), "}}")
        .map(str::trim)
        .verify(|path: &str| !path.starts_with('#') && !path.contains(is_line_break))
        .parse_next(input)
}

/// Parse `start...end` spanning the whole input.
fn range(input: &mut &str) -> ModalResult<(i64, i64)> {
    terminated(separated_pair(dec_int, "...", dec_int), eof).parse_next(input)
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_target_runs_to_first_close_braces() {
        let scan = scan_blocks("{{#each a.b}}x{{#end_each}}", BlockKind::Each);
        assert_eq!(scan.blocks.len(), 1);
        assert_eq!(scan.blocks[0].target, "a.b");
        assert_eq!(scan.blocks[0].body, "x");
        assert_eq!(scan.blocks[0].span, 0..27);
        assert_eq!(scan.unterminated, None);
    }

    #[test]
    fn block_body_ends_at_first_closer() {
        let input = "{{#each a}}1{{#each b}}2{{#end_each}}3{{#end_each}}";
        let scan = scan_blocks(input, BlockKind::Each);
        assert_eq!(scan.blocks.len(), 1);
        assert_eq!(scan.blocks[0].body, "1{{#each b}}2");
        assert_eq!(&input[scan.blocks[0].span.end..], "3{{#end_each}}");
    }

    #[test]
    fn opener_without_closer_is_unterminated() {
        let scan = scan_blocks("ok {{#for 1...2}} never closed", BlockKind::For);
        assert!(scan.blocks.is_empty());
        assert_eq!(
            scan.unterminated,
            Some(Unterminated {
                kind: BlockKind::For,
                offset: 3
            })
        );
    }

    #[test]
    fn opener_requires_space() {
        let scan = scan_blocks("{{#each}}x{{#end_each}}", BlockKind::Each);
        assert!(scan.blocks.is_empty());
    }

    #[test]
    fn variable_skips_hash_prefixed_content() {
        let vars = scan_variables("{{#end_for}} {{ name }}");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].path, "name");
        assert_eq!(vars[0].span, 13..23);
    }

    #[test]
    fn variable_content_may_not_span_lines() {
        let vars = scan_variables("{{ a\nb }} {{\n c \n}}");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].path, "c");
    }

    #[test]
    fn variable_first_close_braces_wins() {
        let vars = scan_variables("{{{ a }}}");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].path, "{ a");
        assert_eq!(vars[0].span, 0..8);
    }

    #[test]
    fn for_target_range_and_path() {
        assert_eq!(
            parse_for_target(" -2...3 "),
            ForTarget::Range { start: -2, end: 3 }
        );
        assert_eq!(parse_for_target("1...x"), ForTarget::Path("1...x"));
        assert_eq!(parse_for_target("1...2...3"), ForTarget::Path("1...2...3"));
        assert_eq!(parse_for_target("tags"), ForTarget::Path("tags"));
    }

    #[test]
    fn line_column_counts_from_one() {
        assert_eq!(line_column("ab\ncd", 0), (1, 1));
        assert_eq!(line_column("ab\ncd", 4), (2, 2));
    }
}
