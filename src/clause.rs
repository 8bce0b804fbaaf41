//! Default clause type: an if/else-if/else condition with a numeric value.
//!
//! The condition is kept as an unparsed expression string. Parsing and
//! evaluating it against graph edges is the evaluator's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClauseError;
use crate::model::canonical_number;
use crate::traits::Clause;

/// Position of a clause within an if/else-if/else chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    If,
    ElseIf,
    Else,
}

impl ClauseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseKind::If => "if",
            ClauseKind::ElseIf => "else_if",
            ClauseKind::Else => "else",
        }
    }
}

/// A single conditional rule of a custom model.
///
/// Serialized as `{"if": "<condition>", "value": <number>}`, with `else_if`
/// or `else` in place of `if` for chained clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClause", into = "RawClause")]
pub struct ConditionalClause {
    kind: ClauseKind,
    condition: String,
    value: f64,
}

impl ConditionalClause {
    pub fn new(kind: ClauseKind, condition: impl Into<String>, value: f64) -> Self {
        let condition = match kind {
            ClauseKind::Else => String::new(),
            _ => condition.into(),
        };
        Self {
            kind,
            condition,
            value,
        }
    }

    pub fn if_then(condition: impl Into<String>, value: f64) -> Self {
        Self::new(ClauseKind::If, condition, value)
    }

    pub fn else_if_then(condition: impl Into<String>, value: f64) -> Self {
        Self::new(ClauseKind::ElseIf, condition, value)
    }

    pub fn otherwise(value: f64) -> Self {
        Self::new(ClauseKind::Else, "", value)
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    /// The unparsed condition expression. Empty for `else` clauses.
    pub fn condition(&self) -> &str {
        &self.condition
    }
}

impl Clause for ConditionalClause {
    fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for ConditionalClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug quoting keeps delimiters inside a condition unambiguous.
        write!(
            f,
            "{{{}: {:?}, value: {}}}",
            self.kind.as_str(),
            self.condition,
            canonical_number(self.value)
        )
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClause {
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    if_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    else_if: Option<String>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    else_condition: Option<String>,
    value: f64,
}

impl TryFrom<RawClause> for ConditionalClause {
    type Error = ClauseError;

    fn try_from(raw: RawClause) -> Result<Self, Self::Error> {
        let selectors = [
            (ClauseKind::If, raw.if_condition),
            (ClauseKind::ElseIf, raw.else_if),
            (ClauseKind::Else, raw.else_condition),
        ];
        let found = selectors.iter().filter(|(_, c)| c.is_some()).count();
        if found > 1 {
            return Err(ClauseError::AmbiguousSelector { found });
        }

        selectors
            .into_iter()
            .find_map(|(kind, condition)| condition.map(|c| Self::new(kind, c, raw.value)))
            .ok_or(ClauseError::MissingSelector)
    }
}

impl From<ConditionalClause> for RawClause {
    fn from(clause: ConditionalClause) -> Self {
        let mut raw = RawClause {
            if_condition: None,
            else_if: None,
            else_condition: None,
            value: clause.value,
        };
        match clause.kind {
            ClauseKind::If => raw.if_condition = Some(clause.condition),
            ClauseKind::ElseIf => raw.else_if = Some(clause.condition),
            ClauseKind::Else => raw.else_condition = Some(String::new()),
        }
        raw
    }
}
