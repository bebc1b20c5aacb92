//! Output helpers for the CLI.

pub mod diagnostic;
pub mod table;

pub use diagnostic::TemplateDiagnostic;
