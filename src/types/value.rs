//! Variable values, including file uploads.

use indexmap::IndexMap;
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use super::Upload;

/// Ordered mapping of variable name to value.
///
/// Iteration follows insertion order, which is also the order in which the
/// query rewriter substitutes placeholders.
pub type Variables = IndexMap<String, InputValue>;

/// A value bound to a GraphQL variable.
///
/// Mirrors the JSON data model with one extra leaf: [`InputValue::Upload`],
/// a file that travels as a multipart part instead of inside the JSON text.
///
/// # Example
///
/// ```rust
/// use graphql_upload_link::{InputValue, Upload};
///
/// let id: InputValue = 42.into();
/// let name: InputValue = "Ada".into();
/// let avatar: InputValue = Upload::from_bytes(vec![0x89, 0x50]).into();
///
/// assert!(id.is_number());
/// assert!(!name.is_number());
/// assert!(avatar.is_upload());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputValue {
    /// Null value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value (64-bit signed).
    Integer(i64),

    /// Floating-point value (64-bit).
    Float(f64),

    /// String value.
    String(String),

    /// List of values.
    List(Vec<InputValue>),

    /// Nested input object, in insertion order.
    Object(IndexMap<String, InputValue>),

    /// A file attachment.
    Upload(Upload),
}

impl InputValue {
    /// Returns `true` if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, InputValue::Null)
    }

    /// Returns `true` for integer and float values.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, InputValue::Integer(_) | InputValue::Float(_))
    }

    /// Returns `true` if this is a file upload.
    #[inline]
    pub fn is_upload(&self) -> bool {
        matches!(self, InputValue::Upload(_))
    }

    /// Returns the string value if this is a String variant.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InputValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value if this is an Integer variant.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            InputValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the upload if this is an Upload variant.
    #[inline]
    pub fn as_upload(&self) -> Option<&Upload> {
        match self {
            InputValue::Upload(upload) => Some(upload),
            _ => None,
        }
    }

    /// Returns `true` if an upload appears anywhere in this value.
    pub fn contains_upload(&self) -> bool {
        match self {
            InputValue::Upload(_) => true,
            InputValue::List(items) => items.iter().any(InputValue::contains_upload),
            InputValue::Object(fields) => fields.values().any(InputValue::contains_upload),
            _ => false,
        }
    }
}

// Uploads and non-finite floats have no JSON form. Serializing them fails so a
// body that still holds them never reaches the wire.
impl Serialize for InputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InputValue::Null => serializer.serialize_unit(),
            InputValue::Bool(b) => serializer.serialize_bool(*b),
            InputValue::Integer(i) => serializer.serialize_i64(*i),
            InputValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            InputValue::Float(f) => Err(S::Error::custom(format!(
                "non-finite number {f} cannot be represented"
            ))),
            InputValue::String(s) => serializer.serialize_str(s),
            InputValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            InputValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            InputValue::Upload(_) => Err(S::Error::custom(
                "file upload must be extracted before serialization",
            )),
        }
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Bool(value)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Integer(value as i64)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Integer(value)
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        InputValue::Integer(value as i64)
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Float(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::String(value.to_owned())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::String(value)
    }
}

impl From<Upload> for InputValue {
    fn from(value: Upload) -> Self {
        InputValue::Upload(value)
    }
}

impl<T: Into<InputValue>> From<Vec<T>> for InputValue {
    fn from(value: Vec<T>) -> Self {
        InputValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => InputValue::Null,
        }
    }
}

impl From<serde_json::Value> for InputValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => InputValue::Null,
            Value::Bool(b) => InputValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => InputValue::Integer(i),
                None => InputValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => InputValue::String(s),
            Value::Array(items) => InputValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(fields) => InputValue::Object(
                fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}
