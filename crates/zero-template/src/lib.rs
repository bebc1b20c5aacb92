pub mod parser;
pub mod renderer;
pub mod types;

pub use renderer::{
    DirectorySource, LoadError, MemorySource, RenderContext, RenderError, RenderWarning, Rendered,
    TemplateSource, Views, render, render_json, render_with_warnings,
};
pub use types::Value;

/// Creates a [`Value::Record`] from key-value pairs.
///
/// Values are converted via `Into<Value>`, so you can pass strings, vectors,
/// or nested `context!` records directly.
///
/// # Example
///
/// ```
/// use zero_template::{context, Value};
///
/// let ctx = context! { "name" => "Ada", "langs" => vec!["en", "fr"] };
/// assert_eq!(ctx.lookup("name").and_then(Value::as_text), Some("Ada"));
/// assert_eq!(context! {}, Value::Record(Default::default()));
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Value::Record(::std::collections::HashMap::new())
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            $crate::Value::Record(map)
        }
    };
}
