//! Template renderer.
//!
//! This module provides the render pipeline that resolves `each` blocks,
//! `for` blocks and `{{ }}` variables against a [`Value`](crate::Value),
//! plus the template sources and views that sit in front of it.

mod context;
mod each;
mod error;
mod for_loop;
mod pipeline;
mod source;
mod variables;
mod views;

pub use context::RenderContext;
pub use each::expand_each;
pub use error::{LoadError, RenderError, RenderWarning, compute_suggestions};
pub use for_loop::{INDEX_TOKEN, ITEM_TOKEN, expand_for};
pub use pipeline::{Rendered, render, render_in, render_json, render_with_warnings};
pub use source::{DirectorySource, MemorySource, TemplateSource};
pub use variables::interpolate;
pub use views::{DEFAULT_FALLBACK, Views};
