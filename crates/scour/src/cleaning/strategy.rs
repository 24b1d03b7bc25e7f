//! Cleaning strategies.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::dataset::Value;

/// How to fill the missing values of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStrategy {
    /// Mean of the non-null numeric values.
    Mean,
    /// Median of the non-null numeric values.
    Median,
    /// Most frequent non-null value, or "Unknown" for an empty column.
    Mode,
    /// Drop every row where the column is null.
    Drop,
    /// Replace nulls with a fixed value.
    Literal(Value),
}

impl FillStrategy {
    /// Fill with a fixed value.
    pub fn literal(value: impl Into<Value>) -> Self {
        FillStrategy::Literal(value.into())
    }
}

impl FromStr for FillStrategy {
    type Err = Infallible;

    /// Parse a strategy token. Anything that is not a known token is a literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mean" => FillStrategy::Mean,
            "median" => FillStrategy::Median,
            "mode" => FillStrategy::Mode,
            "drop" => FillStrategy::Drop,
            other => FillStrategy::literal(other),
        })
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::Mean => f.write_str("mean"),
            FillStrategy::Median => f.write_str("median"),
            FillStrategy::Mode => f.write_str("mode"),
            FillStrategy::Drop => f.write_str("drop"),
            FillStrategy::Literal(value) => write!(f, "'{}'", value),
        }
    }
}

/// Which copy of a duplicated row survives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Keep {
    /// Keep the first occurrence.
    #[default]
    First,
    /// Keep the last occurrence.
    Last,
}

impl FromStr for Keep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(Keep::First),
            "last" => Ok(Keep::Last),
            _ => Err(format!("Unknown keep policy: {}. Use first or last.", s)),
        }
    }
}

impl fmt::Display for Keep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keep::First => write!(f, "first"),
            Keep::Last => write!(f, "last"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("mean".parse::<FillStrategy>(), Ok(FillStrategy::Mean));
        assert_eq!("median".parse::<FillStrategy>(), Ok(FillStrategy::Median));
        assert_eq!("mode".parse::<FillStrategy>(), Ok(FillStrategy::Mode));
        assert_eq!("drop".parse::<FillStrategy>(), Ok(FillStrategy::Drop));
    }

    #[test]
    fn test_unknown_token_is_literal() {
        assert_eq!(
            "Unknown".parse::<FillStrategy>(),
            Ok(FillStrategy::literal("Unknown"))
        );
        assert_eq!(
            "Mean".parse::<FillStrategy>(),
            Ok(FillStrategy::literal("Mean"))
        );
    }

    #[test]
    fn test_parse_keep() {
        assert_eq!("first".parse::<Keep>(), Ok(Keep::First));
        assert_eq!("LAST".parse::<Keep>(), Ok(Keep::Last));
        assert!("middle".parse::<Keep>().is_err());
    }
}
