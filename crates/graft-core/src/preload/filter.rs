use crate::value::Value;
use serde::Serialize;
use std::fmt;

///
/// Filter
///
/// The single batch lookup handed to a finder: rows whose `column`
/// is one of `values`. `values` holds distinct keys in first-seen order,
/// in lookup-key form (see [`Value::into_key`]).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Filter {
    pub column: String,
    pub values: Vec<Value>,
}

impl Filter {
    #[must_use]
    pub const fn new(column: String, values: Vec<Value>) -> Self {
        Self { column, values }
    }

    /// Parameterized expression, e.g. `serialNumber IN (?)`.
    /// The placeholder binds `values`.
    #[must_use]
    pub fn expression(&self) -> String {
        format!("{} IN (?)", self.column)
    }

    /// Text keys, for finders backed by string-keyed stores.
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().filter_map(Value::as_text)
    }

    /// Whether `value` is one of the requested keys. Signed and unsigned
    /// integers of equal value match.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        self.values.iter().any(|key| key.key_eq(value))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IN (", self.column)?;
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write_literal(f, value)?;
        }
        write!(f, ")")
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
        Value::Int(v) => write!(f, "{v}"),
        Value::Uint(v) => write!(f, "{v}"),
        Value::Float64(v) => write!(f, "{v}"),
        Value::Bool(v) => write!(f, "{v}"),
        other => write!(f, "<{}>", other.kind_label()),
    }
}

///
/// TESTS
///
