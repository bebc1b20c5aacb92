mod value;

pub(crate) use value::json_kind;
pub use value::Value;
