//! Primitive data types and literal values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Static type of a value
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    /// Numbers (always floating point at runtime)
    Number,
    /// Text
    String,
    /// `true` / `false`
    Boolean,
    /// Untyped, compatible with everything
    Object,
}

impl DataType {
    /// Maps a type keyword; a missing annotation means [`DataType::Object`]
    #[must_use]
    pub fn from_keyword(keyword: Option<&str>) -> Option<Self> {
        match keyword {
            None => Some(Self::Object),
            Some("num") => Some(Self::Number),
            Some("string") => Some(Self::String),
            Some("bool") => Some(Self::Boolean),
            Some("object") => Some(Self::Object),
            Some(_) => None,
        }
    }

    /// Whether a value of type `other` may be used where `self` is expected
    ///
    /// `Object` on either side always matches. Numbers also accept booleans,
    /// which the target runtime coerces to `1` and `0`.
    #[must_use]
    pub fn is_compatible(self, other: Self) -> bool {
        match (self, other) {
            (Self::Object, _) | (_, Self::Object) => true,
            (Self::Number, Self::Boolean) => true,
            _ => self == other,
        }
    }

    /// Value given to a declaration without an initializer
    #[must_use]
    pub fn default_value(self) -> Literal {
        match self {
            Self::Number => Literal::Number(0.0),
            Self::Boolean => Literal::Boolean(false),
            Self::String | Self::Object => Literal::Text(String::new()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Number => "num",
            Self::String => "string",
            Self::Boolean => "bool",
            Self::Object => "object",
        })
    }
}

/// A compile-time literal value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal
    Number(f64),
    /// String literal
    Text(String),
    /// Boolean literal
    Boolean(bool),
}

impl Literal {
    /// Static type of the literal
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        match self {
            Self::Number(_) => DataType::Number,
            Self::Text(_) => DataType::String,
            Self::Boolean(_) => DataType::Boolean,
        }
    }

    /// The numeric value, if this is a number
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => formatter.write_str(&format_number(*value)),
            Self::Text(value) => formatter.write_str(value),
            Self::Boolean(value) => write!(formatter, "{value}"),
        }
    }
}

/// Formats a number the way the target runtime prints it
///
/// Integral values have no fractional part: `5.0` prints as `5`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_is_compatible_both_ways() {
        for other in [DataType::Number, DataType::String, DataType::Boolean] {
            assert!(DataType::Object.is_compatible(other));
            assert!(other.is_compatible(DataType::Object));
        }
    }

    #[test]
    fn test_number_and_string_are_distinct() {
        assert!(!DataType::Number.is_compatible(DataType::String));
        assert!(!DataType::String.is_compatible(DataType::Number));
        assert!(DataType::Number.is_compatible(DataType::Boolean));
        assert!(!DataType::Boolean.is_compatible(DataType::Number));
    }

    #[test]
    fn test_default_values() {
        assert_eq!(DataType::Number.default_value(), Literal::Number(0.0));
        assert_eq!(DataType::Boolean.default_value(), Literal::Boolean(false));
        assert_eq!(DataType::String.default_value(), Literal::Text(String::new()));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(DataType::from_keyword(None), Some(DataType::Object));
        assert_eq!(DataType::from_keyword(Some("num")), Some(DataType::Number));
        assert_eq!(DataType::from_keyword(Some("float")), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-2.0), "-2");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(Literal::Number(3.0).to_string(), "3");
    }
}
