//! Clause operators
//!
//! The fixed operator set of structured queries. Parsing and rendering use the JQL
//! spellings; `negate` is what pushes a NOT down onto a terminal clause.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operators that can appear in a terminal clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Equals (=)
    Equals,
    /// Not equals (!=)
    NotEquals,
    /// Contains text (~)
    Like,
    /// Does not contain text (!~)
    NotLike,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanEquals,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanEquals,
    /// One of a list (in)
    In,
    /// None of a list (not in)
    NotIn,
    /// Is (used with EMPTY)
    Is,
    /// Is not (used with EMPTY)
    IsNot,
    /// Had the value at some point (was)
    Was,
    /// Never had the value (was not)
    WasNot,
    /// Value changed (changed)
    Changed,
}

impl Operator {
    pub const ALL: [Operator; 15] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Like,
        Operator::NotLike,
        Operator::GreaterThan,
        Operator::GreaterThanEquals,
        Operator::LessThan,
        Operator::LessThanEquals,
        Operator::In,
        Operator::NotIn,
        Operator::Is,
        Operator::IsNot,
        Operator::Was,
        Operator::WasNot,
        Operator::Changed,
    ];

    /// Parse operator from its JQL spelling; keywords are case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == normalized)
    }

    /// JQL spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::Was => "was",
            Self::WasNot => "was not",
            Self::Changed => "changed",
        }
    }

    /// Logical complement, if the operator set has one
    pub fn negate(&self) -> Option<Self> {
        let negated = match self {
            Self::Equals => Self::NotEquals,
            Self::NotEquals => Self::Equals,
            Self::Like => Self::NotLike,
            Self::NotLike => Self::Like,
            Self::GreaterThan => Self::LessThanEquals,
            Self::LessThanEquals => Self::GreaterThan,
            Self::GreaterThanEquals => Self::LessThan,
            Self::LessThan => Self::GreaterThanEquals,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::Is => Self::IsNot,
            Self::IsNot => Self::Is,
            Self::Was => Self::WasNot,
            Self::WasNot => Self::Was,
            Self::Changed => return None,
        };
        Some(negated)
    }

    /// Operators whose operand is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Operators that exclude the values they name
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Self::NotEquals | Self::NotLike | Self::NotIn | Self::IsNot | Self::WasNot
        )
    }

    /// Operators answered against the change history rather than current values
    pub fn is_history(&self) -> bool {
        matches!(self, Self::Was | Self::WasNot | Self::Changed)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
