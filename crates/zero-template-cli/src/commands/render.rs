//! Implementation of the `zt render` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{miette, Report};
use serde::Serialize;
use tracing::debug;
use zero_template::{DirectorySource, Views};

use super::context_args::{ContextArgs, ContextError};
use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template name, relative to the views directory
    pub name: String,

    /// Views directory
    #[arg(long, env = "ZT_VIEWS_DIR", default_value = ".")]
    pub views: PathBuf,

    /// Template rendered instead when NAME cannot be loaded
    #[arg(long, env = "ZT_FALLBACK")]
    pub fallback: Option<PathBuf>,

    #[command(flatten)]
    pub context: ContextArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub output: String,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let context = match args.context.load() {
        Ok(context) => context,
        Err(e) => {
            report_context_error(&e);
            return Ok(e.exit_code());
        }
    };

    let fallback = args
        .fallback
        .as_ref()
        .map(|path| {
            read_to_string(path)
                .map_err(|e| miette!("Cannot read fallback template {}: {}", path.display(), e))
        })
        .transpose()?;

    debug!(views = %args.views.display(), name = %args.name, "rendering view");
    let views = Views::builder()
        .source(DirectorySource::new(&args.views))
        .maybe_fallback(fallback)
        .build();

    match views.render(&args.name, &context) {
        Ok(output) => {
            if args.json {
                let result = RenderResult { output };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result)
                        .map_err(|e| miette!("Cannot serialize output: {}", e))?
                );
            } else {
                print!("{}", output);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .map_err(|e| miette!("Cannot serialize error: {}", e))?
                );
            } else {
                eprintln!("Render error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}

/// Print a context failure, with a source snippet for JSON syntax errors.
pub fn report_context_error(err: &ContextError) {
    match err {
        ContextError::Parse {
            path,
            content,
            source,
        } => {
            let diagnostic = TemplateDiagnostic::from_json_error(path, content, source);
            eprintln!("{:?}", Report::new(diagnostic));
        }
        ContextError::Read { .. } => eprintln!("{}", err),
    }
}
