//! Mixed-type parameter values and their string form.
//!
//! Query parameters, form fields and headers are declared as [`Params`], a map
//! from names to [`ParamValue`]s. Before anything reaches the wire the map is
//! reduced to plain strings with [`stringify`].
//!
//! # Examples
//!
//! ```rust
//! use restyle::options::{stringify, Params, ParamValue};
//!
//! let mut params = Params::new();
//! params.insert("a".into(), ParamValue::from(1));
//! params.insert("b".into(), ParamValue::from("x"));
//!
//! let flat = stringify(&params).unwrap();
//! assert_eq!(flat["a"], "1");
//! assert_eq!(flat["b"], "x");
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// Parameter map keyed by name. Ordered, so encoded output is deterministic.
pub type Params = BTreeMap<String, ParamValue>;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Passed through unchanged.
    Str(String),
    /// Signed integer, rendered in decimal.
    Int(i64),
    /// Unsigned integer, rendered in decimal.
    UInt(u64),
    /// Float, rendered in its shortest round-trip form (`2.0` renders as `2`).
    Float(f64),
    /// Rendered as `true` or `false`.
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::UInt(u) => write!(f, "{}", u),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::$variant(value as $wide)
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt as u64: u8, u16, u32, u64, usize);

/// Reduce a parameter map to plain strings.
///
/// Returns `None` for an empty map: "no parameters" and "parameters present but
/// empty" are not distinguished.
pub fn stringify(params: &Params) -> Option<BTreeMap<String, String>> {
    if params.is_empty() {
        return None;
    }

    Some(
        params
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    ParamValue::Str(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect(),
    )
}
