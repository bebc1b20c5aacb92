//! CLI command implementations.

mod check;
mod context_args;
mod render;

pub use check::{run_check, CheckArgs};
pub use render::{run_render, RenderArgs};
