//! Marker types produced by the scanner.
//!
//! Markers borrow from the scanned text and carry byte spans into it, so a
//! pass can rebuild its output by copying the text between spans.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

/// The two block forms a template can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `{{#each path}}...{{#end_each}}`, iterating records.
    Each,
    /// `{{#for target}}...{{#end_for}}`, iterating scalars or a range.
    For,
}

impl BlockKind {
    /// The opening tag up to and including the space before the target.
    pub fn opener(self) -> &'static str {
        match self {
            BlockKind::Each => "{{#each ",
            BlockKind::For => "{{#for ",
        }
    }

    /// The closing tag.
    pub fn closer(self) -> &'static str {
        match self {
            BlockKind::Each => "{{#end_each}}",
            BlockKind::For => "{{#end_for}}",
        }
    }

    /// Keyword used in the tags.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Each => "each",
            BlockKind::For => "for",
        }
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// A complete block: opener, target, body and closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub kind: BlockKind,
    /// Raw text between the opener and the first `}}`.
    pub target: &'a str,
    /// Raw text between the opener's `}}` and the closer.
    pub body: &'a str,
    /// Byte range of the whole block, closer included.
    pub span: Range<usize>,
}

impl<'a> Block<'a> {
    /// The target with surrounding whitespace removed.
    pub fn path(&self) -> &'a str {
        self.target.trim()
    }
}

/// A `{{ path }}` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable<'a> {
    /// Trimmed marker content.
    pub path: &'a str,
    /// Byte range of the marker, braces included.
    pub span: Range<usize>,
}

/// How a `for` block iterates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForTarget<'a> {
    /// `start...end`, inclusive. Empty when `start > end`.
    Range { start: i64, end: i64 },
    /// A key path expected to resolve to a list of text.
    Path(&'a str),
}

/// An opener that has no matching closer after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unterminated {
    pub kind: BlockKind,
    /// Byte offset of the opener.
    pub offset: usize,
}

/// Result of scanning one block kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockScan<'a> {
    /// Matched blocks in document order.
    pub blocks: Vec<Block<'a>>,
    pub unterminated: Option<Unterminated>,
}

/// Any marker found by [`outline`](super::outline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker<'a> {
    Block(Block<'a>),
    Variable(Variable<'a>),
}

impl Marker<'_> {
    /// Byte range of the marker in the outlined text.
    pub fn span(&self) -> &Range<usize> {
        match self {
            Marker::Block(block) => &block.span,
            Marker::Variable(variable) => &variable.span,
        }
    }
}

/// Static summary of a template's markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outline<'a> {
    /// Blocks and top-level variables, ordered by position.
    pub markers: Vec<Marker<'a>>,
    /// Openers without closers, ordered by position.
    pub unterminated: Vec<Unterminated>,
}
