//! Context input shared by the commands: a JSON file plus `-s` assignments.

use std::fs::read_to_string;
use std::io;
use std::path::PathBuf;

use serde_json::{Map, Value as Json};
use thiserror::Error;

/// Where the render context comes from.
#[derive(Debug, Default, clap::Args)]
pub struct ContextArgs {
    /// JSON file with the render context
    #[arg(short = 'c', long = "context")]
    pub file: Option<PathBuf>,

    /// Text value in key.path=value format (repeatable, applied after --context)
    #[arg(short = 's', long = "set", value_parser = parse_assignment)]
    pub sets: Vec<(String, String)>,
}

/// Failure to build the context.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("cannot read context file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("context file {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ContextError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ContextError::Read { .. } => exitcode::NOINPUT,
            ContextError::Parse { .. } => exitcode::DATAERR,
        }
    }
}

impl ContextArgs {
    /// Whether any context input was given.
    pub fn is_given(&self) -> bool {
        self.file.is_some() || !self.sets.is_empty()
    }

    /// Build the JSON context. Without a file the base is an empty object.
    pub fn load(&self) -> Result<Json, ContextError> {
        let mut context = match &self.file {
            Some(path) => {
                let content = read_to_string(path).map_err(|source| ContextError::Read {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&content).map_err(|source| ContextError::Parse {
                    path: path.clone(),
                    content: content.clone(),
                    source,
                })?
            }
            None => Json::Object(Map::new()),
        };
        for (key, value) in &self.sets {
            assign(&mut context, key, value);
        }
        Ok(context)
    }
}

/// Parse a key.path=value assignment.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid assignment '{}': expected key.path=value", s))?;
    if key.split('.').all(str::is_empty) {
        return Err(format!("invalid assignment '{}': empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Set `path` in `target` to a string, creating objects along the way.
///
/// Anything in the way that is not an object is replaced by one.
fn assign(target: &mut Json, path: &str, value: &str) {
    let mut current = target;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        if !current.is_object() {
            *current = Json::Object(Map::new());
        }
        let Json::Object(fields) = current else {
            return;
        };
        current = fields
            .entry(segment.to_string())
            .or_insert_with(|| Json::Object(Map::new()));
    }
    *current = Json::String(value.to_string());
}
