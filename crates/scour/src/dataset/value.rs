//! Cell values and column type tags.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};

/// A single cell in a dataset.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Whole number.
    Integer(i64),
    /// Floating-point number. `NaN` is treated as missing.
    Float(f64),
    /// Free text.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// Calendar date and time.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns true if the value is missing.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value, if it is a non-missing number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    /// Borrow the text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The column type this value would imply on its own.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            _ if self.is_null() => None,
            Value::Integer(_) => Some(DType::Integer),
            Value::Float(_) => Some(DType::Float),
            Value::Str(_) => Some(DType::Text),
            Value::Bool(_) => Some(DType::Boolean),
            Value::DateTime(_) => Some(DType::DateTime),
            Value::Null => None,
        }
    }

    /// Hashable identity used for duplicate and distinct-value detection.
    ///
    /// Numbers compare by value, so `2` and `2.0` share a key.
    pub fn key(&self) -> ValueKey {
        match self {
            _ if self.is_null() => ValueKey::Null,
            Value::Integer(i) => ValueKey::Int(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    ValueKey::Int(*f as i64)
                } else {
                    ValueKey::Float(f.to_bits())
                }
            }
            Value::Str(s) => ValueKey::Str(s.clone()),
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::DateTime(dt) => ValueKey::DateTime(*dt),
            Value::Null => ValueKey::Null,
        }
    }

    /// Total ordering used for tie-breaking and min/max.
    ///
    /// Nulls sort first, then numbers, booleans, date-times and strings.
    pub fn compare(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                _ if v.is_null() => 0,
                Value::Integer(_) | Value::Float(_) => 1,
                Value::Bool(_) => 2,
                Value::DateTime(_) => 3,
                Value::Str(_) => 4,
                Value::Null => 0,
            }
        }

        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => rank(self).cmp(&rank(other)),
            },
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            _ if self.is_null() => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{:.1}", x)
                } else {
                    write!(f, "{}", x)
                }
            }
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            Value::Null => Ok(()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            _ if self.is_null() => serializer.serialize_none(),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::DateTime(_) => serializer.collect_str(self),
            Value::Null => serializer.serialize_none(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Hashable identity of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Int(i64),
    Float(u64),
    Str(String),
    Bool(bool),
    DateTime(NaiveDateTime),
}

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// True/false values.
    Boolean,
    /// Date and time values.
    DateTime,
    /// Text, or a mix of representations.
    Text,
}

impl DType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Integer | DType::Float)
    }

    /// Short label used in logs and metadata.
    pub fn label(&self) -> &'static str {
        match self {
            DType::Integer => "integer",
            DType::Float => "float",
            DType::Boolean => "boolean",
            DType::DateTime => "datetime",
            DType::Text => "string",
        }
    }

    /// Infer the storage type of a column from its values.
    ///
    /// Integers mixed with floats widen to `Float`; any other mix, and a
    /// column with no non-null values, is `Text`.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> DType {
        let mut inferred: Option<DType> = None;
        for value in values {
            let Some(dtype) = value.dtype() else {
                continue;
            };
            inferred = Some(match (inferred, dtype) {
                (None, d) => d,
                (Some(a), b) if a == b => a,
                (Some(a), b) if a.is_numeric() && b.is_numeric() => DType::Float,
                _ => return DType::Text,
            });
        }
        inferred.unwrap_or(DType::Text)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
