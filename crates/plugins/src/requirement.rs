// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Version constraints as the registry reports them, e.g. `">= 4.7, < 5.0"`.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Operator, then a dotted version (digits, letters, dashes for prereleases).
static CONSTRAINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(=|!=|>=|<=|>|<|~>)?\s*([0-9]+[0-9A-Za-z]*(?:[.-][0-9A-Za-z]+)*)\s*$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Pessimistic,
}

impl Op {
    fn parse(op: &str) -> Option<Self> {
        Some(match op {
            "=" => Op::Eq,
            "!=" => Op::NotEq,
            ">" => Op::Gt,
            "<" => Op::Lt,
            ">=" => Op::GtEq,
            "<=" => Op::LtEq,
            "~>" => Op::Pessimistic,
            _ => return None,
        })
    }

    fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::NotEq => "!=",
            Op::Gt => ">",
            Op::Lt => "<",
            Op::GtEq => ">=",
            Op::LtEq => "<=",
            Op::Pessimistic => "~>",
        }
    }
}

/// One `op version` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Op,
    pub version: String,
}

impl Constraint {
    /// Parse `">= 4.7"`, `"~>4.0"` or a bare `"4.0"` (meaning `= 4.0`).
    pub fn parse(text: &str) -> Option<Self> {
        let caps = CONSTRAINT.captures(text)?;
        let op = match caps.get(1) {
            Some(op) => Op::parse(op.as_str())?,
            None => Op::Eq,
        };
        Some(Self {
            op,
            version: caps[2].to_string(),
        })
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op.as_str(), self.version)
    }
}

/// The full requirement a package places on a dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    constraints: Vec<Constraint>,
}

impl Requirement {
    /// Split on `", "` and parse each piece.
    ///
    /// Repeated constraints collapse to the first occurrence. An empty
    /// string is the unconstrained requirement `>= 0`. Returns `None` when
    /// any piece is not a constraint.
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return Some(Self::default());
        }

        let mut constraints: Vec<Constraint> = Vec::new();
        for piece in text.split(", ") {
            let constraint = Constraint::parse(piece)?;
            if !constraints.contains(&constraint) {
                constraints.push(constraint);
            }
        }
        Some(Self { constraints })
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Each constraint rendered as `"op version"`.
    pub fn requirements_list(&self) -> Vec<String> {
        self.constraints.iter().map(ToString::to_string).collect()
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Self {
            constraints: vec![Constraint {
                op: Op::GtEq,
                version: "0".to_string(),
            }],
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.requirements_list().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_registry_format() {
        let req = Requirement::parse(">= 4.7, < 5.0").unwrap();
        assert_eq!(req.requirements_list(), vec![">= 4.7", "< 5.0"]);
        assert_eq!(req.to_string(), ">= 4.7, < 5.0");
    }

    #[test]
    fn test_normalizes_spacing_and_bare_versions() {
        assert_eq!(Requirement::parse("~>4.0").unwrap().to_string(), "~> 4.0");
        assert_eq!(Requirement::parse("2.3.1").unwrap().to_string(), "= 2.3.1");
        assert_eq!(
            Requirement::parse(">=  4.0.0.rc1, !=4.1").unwrap().to_string(),
            ">= 4.0.0.rc1, != 4.1"
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let req = Requirement::parse(">= 4.0, >= 4.0, < 5").unwrap();
        assert_eq!(req.constraints().len(), 2);
        assert_eq!(req.to_string(), ">= 4.0, < 5");
    }

    #[test]
    fn test_empty_is_unconstrained() {
        assert_eq!(Requirement::parse("").unwrap().to_string(), ">= 0");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Requirement::parse("whatever").is_none());
        assert!(Requirement::parse(">= 4.0, =< 5").is_none());
        assert!(Requirement::parse(">=").is_none());
    }
}
