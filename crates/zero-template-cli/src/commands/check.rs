//! Implementation of the `zt check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{miette, Report};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use zero_template::parser::{line_column, outline, Marker, Outline};
use zero_template::{render_with_warnings, Value};

use super::context_args::ContextArgs;
use super::render::report_context_error;
use crate::output::table::{format_marker_table, MarkerRow};
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template file to check
    pub file: PathBuf,

    /// Render against this context and report what did not resolve
    #[command(flatten)]
    pub context: ContextArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for check results.
#[derive(Debug, Serialize)]
struct CheckJson {
    markers: Vec<MarkerJson>,
    unterminated: Vec<MarkerJson>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MarkerJson {
    kind: String,
    target: String,
    line: usize,
    column: usize,
}

impl From<MarkerRow> for MarkerJson {
    fn from(row: MarkerRow) -> Self {
        MarkerJson {
            kind: row.kind,
            target: row.target,
            line: row.line,
            column: row.column,
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let content = read_to_string(&args.file)
        .map_err(|e| miette!("Cannot read template {}: {}", args.file.display(), e))?;
    let outline = outline(&content);

    let warnings = if args.context.is_given() {
        let json = match args.context.load() {
            Ok(json) => json,
            Err(e) => {
                report_context_error(&e);
                return Ok(e.exit_code());
            }
        };
        let value = match Value::try_from(&json) {
            Ok(value) => value,
            Err(e) => {
                eprintln!("Render error: {}", e);
                return Ok(exitcode::DATAERR);
            }
        };
        render_with_warnings(&content, &value)
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect()
    } else {
        Vec::new()
    };

    let clean = outline.unterminated.is_empty() && warnings.is_empty();

    if args.json {
        let output = CheckJson {
            markers: marker_rows(&content, &outline)
                .into_iter()
                .map(MarkerJson::from)
                .collect(),
            unterminated: unterminated_rows(&content, &outline)
                .into_iter()
                .map(MarkerJson::from)
                .collect(),
            warnings,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output)
                .map_err(|e| miette!("Cannot serialize output: {}", e))?
        );
    } else {
        println!("{}", format_marker_table(&marker_rows(&content, &outline)));
        for unterminated in &outline.unterminated {
            let diagnostic = TemplateDiagnostic::unterminated(&args.file, &content, *unterminated);
            eprintln!("{:?}", Report::new(diagnostic));
        }
        for warning in &warnings {
            eprintln!(
                "{}: {}",
                "warning".if_supports_color(Stream::Stderr, |text| text.yellow()),
                warning
            );
        }
        if clean {
            println!("{} no problems found", args.file.display());
        }
    }

    Ok(if clean {
        exitcode::OK
    } else {
        exitcode::DATAERR
    })
}

fn marker_rows(content: &str, outline: &Outline<'_>) -> Vec<MarkerRow> {
    outline
        .markers
        .iter()
        .map(|marker| {
            let (kind, target) = match marker {
                Marker::Block(block) => (block.kind.name(), block.path()),
                Marker::Variable(variable) => ("var", variable.path),
            };
            let (line, column) = line_column(content, marker.span().start);
            MarkerRow {
                kind: kind.to_string(),
                target: target.to_string(),
                line,
                column,
            }
        })
        .collect()
}

fn unterminated_rows(content: &str, outline: &Outline<'_>) -> Vec<MarkerRow> {
    outline
        .unterminated
        .iter()
        .map(|unterminated| {
            let (line, column) = line_column(content, unterminated.offset);
            MarkerRow {
                kind: unterminated.kind.name().to_string(),
                target: String::new(),
                line,
                column,
            }
        })
        .collect()
}
