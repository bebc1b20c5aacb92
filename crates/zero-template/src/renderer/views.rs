//! Named views: load a template from a source, render it, fall back on failure.

use bon::Builder;
use serde_json::Value as Json;
use tracing::warn;

use crate::context;
use crate::renderer::{LoadError, RenderError, TemplateSource, render};
use crate::types::Value;

/// Fallback page used when no other fallback is configured.
pub const DEFAULT_FALLBACK: &str = "<h1>Rendering error</h1>\n\
<p>The template <code>{{ error.filename }}</code> could not be loaded.</p>\n";

/// Renders templates by name from a [`TemplateSource`].
///
/// When a template cannot be loaded, the fallback template is rendered instead
/// against `{error: {filename, message}}`, so a page always comes back.
///
/// # Example
///
/// ```
/// use zero_template::{MemorySource, Views, context};
///
/// let source: MemorySource = [("hello.html", "Hello {{ name }}")].into_iter().collect();
/// let views = Views::builder()
///     .source(source)
///     .fallback("missing: {{ error.filename }}")
///     .build();
///
/// let ctx = context! { "name" => "Ada" };
/// assert_eq!(views.render_value("hello.html", &ctx), "Hello Ada");
/// assert_eq!(views.render_value("nope.html", &ctx), "missing: nope.html");
/// ```
#[derive(Debug, Builder)]
#[builder(on(String, into))]
pub struct Views<S: TemplateSource> {
    /// Where templates are loaded from.
    source: S,

    /// Template rendered when loading fails.
    #[builder(default = DEFAULT_FALLBACK.to_string())]
    fallback: String,
}

impl<S: TemplateSource> Views<S> {
    /// Create views over `source` with the default fallback page.
    pub fn new(source: S) -> Self {
        Views::builder().source(source).build()
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The fallback template.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Load a template without rendering it.
    pub fn load(&self, name: &str) -> Result<String, LoadError> {
        self.source.load(name)
    }

    /// Convert a JSON context and render the view `name` against it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidContext`] when `context` is not a string,
    /// array or object. The context is checked before the template is loaded.
    pub fn render(&self, name: &str, context: &Json) -> Result<String, RenderError> {
        let value = Value::try_from(context)?;
        Ok(self.render_value(name, &value))
    }

    /// Render the view `name`, or the fallback page if it cannot be loaded.
    pub fn render_value(&self, name: &str, context: &Value) -> String {
        match self.source.load(name) {
            Ok(template) => render(&template, context),
            Err(error) => {
                warn!(name, %error, "template load failed, rendering fallback");
                render(&self.fallback, &error_context(name, &error))
            }
        }
    }
}

/// Context handed to the fallback template.
fn error_context(name: &str, error: &LoadError) -> Value {
    context! {
        "error" => context! {
            "filename" => name,
            "message" => error.to_string(),
        },
    }
}
