// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Row values and field coercion
//!
//! Introspection rows carry a small set of scalar kinds. [`ColumnValue`] is
//! implemented for every field type an entity may declare and performs the
//! coercion from a row value into that type:
//! - integers: range-checked narrowing from Int, 0/1 from Bool, numeric Text
//! - bool: Bool, non-zero Int, or Text `true/false/yes/no/1/0`
//! - String: Text as-is, Int and Bool rendered
//! - `Option<V>`: Null becomes `None`, anything else coerces as `V`

use crate::error::CoercionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One column value of an introspection row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value kind, used in coercion messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i16> for Value {
    fn from(i: i16) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A field type that can be populated from a row [`Value`].
pub trait ColumnValue: Sized + Send + Sync + 'static {
    /// Whether the type can represent an absent value.
    const NULLABLE: bool = false;

    /// Name of the field type, used in descriptor errors.
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Result<Self, CoercionError>;

    fn to_value(&self) -> Value;
}

impl ColumnValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Null => Err(CoercionError::UnexpectedNull),
        }
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ColumnValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(i) => Ok(*i != 0),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(CoercionError::Mismatch {
                    expected: "bool",
                    found: "text",
                }),
            },
            Value::Null => Err(CoercionError::UnexpectedNull),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_integer_column_value {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl ColumnValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Result<Self, CoercionError> {
                    match value {
                        Value::Int(i) => <$ty>::try_from(*i).map_err(|_| CoercionError::OutOfRange {
                            value: *i,
                            target: stringify!($ty),
                        }),
                        Value::Bool(b) => Ok(<$ty>::from(*b)),
                        Value::Text(s) => {
                            s.trim().parse::<$ty>().map_err(|_| CoercionError::Mismatch {
                                expected: stringify!($ty),
                                found: "text",
                            })
                        }
                        Value::Null => Err(CoercionError::UnexpectedNull),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

impl_integer_column_value!(i16, i32, i64);

impl<V: ColumnValue> ColumnValue for Option<V> {
    const NULLABLE: bool = true;
    const TYPE_NAME: &'static str = V::TYPE_NAME;

    fn from_value(value: &Value) -> Result<Self, CoercionError> {
        match value {
            Value::Null => Ok(None),
            other => V::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}
