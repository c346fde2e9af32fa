//! Transitive closure of the asserted relation.
//!
//! Three interchangeable strategies share the [`RelationMatrix`] model:
//!
//! - **Union of powers** ([`power_union`]): `A ∪ A² ∪ … ∪ A^(C-1)` with
//!   early stopping and an alert for the early-stopping heuristic
//! - **Warshall** ([`warshall`]): the classical O(C³) in-place algorithm
//! - **Hybrid** ([`hybrid`]): OWL reasoning over the ontology store, cleaned
//!   up by union of powers to recover cycle-induced reflexivity

pub mod hybrid;
pub mod power_union;
pub mod warshall;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matrix::RelationMatrix;

/// How the engine derives its closure relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClosureMethod {
    /// No closure: the asserted relation is the result.
    None,
    /// Union of powers.
    #[default]
    PowerUnion,
    /// Warshall's algorithm.
    Warshall,
    /// External OWL reasoning plus union-of-powers cleanup.
    Reasoning,
}

impl ClosureMethod {
    /// The numeric code used in configuration (0–3).
    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::PowerUnion => 1,
            Self::Warshall => 2,
            Self::Reasoning => 3,
        }
    }

    /// Whether a closure relation is computed at all.
    pub fn computes_closure(self) -> bool {
        self != Self::None
    }
}

impl TryFrom<u8> for ClosureMethod {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::PowerUnion),
            2 => Ok(Self::Warshall),
            3 => Ok(Self::Reasoning),
            other => Err(ConfigError::UnknownClosureMethod {
                code: other.to_string(),
            }),
        }
    }
}

impl From<ClosureMethod> for u8 {
    fn from(method: ClosureMethod) -> Self {
        method.code()
    }
}

impl FromStr for ClosureMethod {
    type Err = ConfigError;

    /// Accepts the numeric code or a name (`none`, `power-union`, `warshall`, `reasoning`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "0" | "none" => Ok(Self::None),
            "1" | "power-union" | "union-of-powers" => Ok(Self::PowerUnion),
            "2" | "warshall" => Ok(Self::Warshall),
            "3" | "reasoning" | "owl" => Ok(Self::Reasoning),
            _ => Err(ConfigError::UnknownClosureMethod {
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ClosureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::PowerUnion => "power-union",
            Self::Warshall => "warshall",
            Self::Reasoning => "reasoning",
        };
        write!(f, "{name}")
    }
}

/// Union the identity relation into `matrix`: `clamp(matrix + I, max = 1)`.
///
/// Consumes the final matrix and returns its replacement.
pub fn merge_reflexivity(matrix: RelationMatrix) -> RelationMatrix {
    matrix.with_identity()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_codes_roundtrip() {
        for code in 0u8..=3 {
            let method = ClosureMethod::try_from(code).unwrap();
            assert_eq!(method.code(), code);
        }
    }

    #[test]
    fn unknown_method_code_is_config_error() {
        let err = ClosureMethod::try_from(4).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownClosureMethod { .. }));
        assert!("five".parse::<ClosureMethod>().is_err());
    }

    #[test]
    fn method_parses_names_and_codes() {
        assert_eq!("warshall".parse::<ClosureMethod>().unwrap(), ClosureMethod::Warshall);
        assert_eq!("Power_Union".parse::<ClosureMethod>().unwrap(), ClosureMethod::PowerUnion);
        assert_eq!("3".parse::<ClosureMethod>().unwrap(), ClosureMethod::Reasoning);
        assert!(!ClosureMethod::None.computes_closure());
    }

    #[test]
    fn reflexivity_merge_is_idempotent() {
        let m = RelationMatrix::from_pairs(3, [(0, 1), (1, 1)]);
        let once = merge_reflexivity(m);
        let twice = merge_reflexivity(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.diagonal(), vec![0, 1, 2]);
        assert_eq!(once.get(0, 1), 1.0);
        assert_eq!(once.get(1, 0), 0.0);
    }
}
