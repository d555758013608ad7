//! Operands and literals
//!
//! An [`Operand`] is what the query says; a [`QueryLiteral`] is what it means for a given user
//! once an operand resolver has expanded it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::names::quote_if_needed;

/// A single literal written in the query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SingleValue {
    Long(i64),
    String(String),
}

impl SingleValue {
    pub fn as_string(&self) -> String {
        match self {
            Self::Long(n) => n.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    pub fn to_literal(&self) -> QueryLiteral {
        match self {
            Self::Long(n) => QueryLiteral::Long(*n),
            Self::String(s) => QueryLiteral::String(s.clone()),
        }
    }
}

impl From<i64> for SingleValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<&str> for SingleValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SingleValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Function call operand, e.g. `cascadeOption(10, 20)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionOperand {
    pub name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl FunctionOperand {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Operand of a terminal clause
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Single(SingleValue),
    Multi(Vec<Operand>),
    Function(FunctionOperand),
    Empty,
}

impl Operand {
    pub fn string(value: impl Into<String>) -> Self {
        Self::Single(SingleValue::String(value.into()))
    }

    pub fn long(value: i64) -> Self {
        Self::Single(SingleValue::Long(value))
    }

    pub fn function(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::Function(FunctionOperand::new(name, args))
    }

    /// List of single values
    pub fn multi<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SingleValue>,
    {
        Self::Multi(values.into_iter().map(|v| Self::Single(v.into())).collect())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_function(&self) -> Option<&FunctionOperand> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl From<SingleValue> for Operand {
    fn from(value: SingleValue) -> Self {
        Self::Single(value)
    }
}

impl From<FunctionOperand> for Operand {
    fn from(value: FunctionOperand) -> Self {
        Self::Function(value)
    }
}

impl fmt::Display for SingleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(&quote_if_needed(s)),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write!(f, "{value}"),
            Self::Empty => f.write_str("EMPTY"),
            Self::Function(func) => {
                let args: Vec<_> = func.args.iter().map(|a| quote_if_needed(a)).collect();
                write!(f, "{}({})", func.name, args.join(", "))
            }
            Self::Multi(values) => {
                let values: Vec<_> = values.iter().map(ToString::to_string).collect();
                write!(f, "({})", values.join(", "))
            }
        }
    }
}

/// A resolved concrete value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryLiteral {
    String(String),
    Long(i64),
    Empty,
}

impl QueryLiteral {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Raw string form; `None` for the empty literal
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Long(n) => Some(n.to_string()),
            Self::Empty => None,
        }
    }

    pub fn long_value(&self) -> Option<i64> {
        match self {
            Self::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Operand this literal would be written back as
    pub fn to_operand(&self) -> Operand {
        match self {
            Self::String(s) => Operand::string(s.clone()),
            Self::Long(n) => Operand::long(*n),
            Self::Empty => Operand::Empty,
        }
    }
}

impl fmt::Display for QueryLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Long(n) => write!(f, "{n}"),
            Self::Empty => f.write_str("EMPTY"),
        }
    }
}
