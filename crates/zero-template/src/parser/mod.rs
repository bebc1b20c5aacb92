//! Template marker scanner.
//!
//! This module recognizes the three marker forms (`{{#each}}` blocks,
//! `{{#for}}` blocks and `{{ }}` variables) and reports where they are. It
//! never fails: text that does not form a complete marker is plain text.

pub mod ast;
mod scanner;

pub use ast::*;
pub use scanner::{line_column, outline, parse_for_target, scan_blocks, scan_variables};
