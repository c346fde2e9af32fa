//! Warshall's transitive closure (Schmidt & Ströhlein, §3.2).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::matrix::RelationMatrix;

/// Cell update used by the inner loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WarshallVariant {
    /// `mat[row, k] = mat[row, k] OR mat[col, k]`.
    #[default]
    BooleanOr,
    /// `mat[row, k] += mat[col, k]`, clamped after each `(row, col)` pass.
    AddAndClamp,
}

impl FromStr for WarshallVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "boolean_or" => Ok(Self::BooleanOr),
            "add_and_clamp" => Ok(Self::AddAndClamp),
            _ => Err(ConfigError::UnknownWarshallVariant { name: s.to_string() }),
        }
    }
}

impl TryFrom<String> for WarshallVariant {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WarshallVariant> for String {
    fn from(variant: WarshallVariant) -> Self {
        variant.to_string()
    }
}

impl fmt::Display for WarshallVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BooleanOr => write!(f, "boolean_or"),
            Self::AddAndClamp => write!(f, "add_and_clamp"),
        }
    }
}

/// Compute the transitive closure of `relation` with Warshall's algorithm.
///
/// Works on a copy; `relation` is left untouched.
pub fn transitive_closure(relation: &RelationMatrix, variant: WarshallVariant) -> RelationMatrix {
    let n = relation.size();
    let mut mat = relation.clone();

    for col in 0..n {
        for row in 0..n {
            if !mat.contains(row, col) {
                continue;
            }
            match variant {
                WarshallVariant::BooleanOr => mat.or_row_from(row, col),
                WarshallVariant::AddAndClamp => mat.add_row_from_clamped(row, col),
            }
        }
    }

    tracing::debug!(size = n, %variant, pairs = mat.count_nonzero(), "warshall finished");
    mat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_closure() {
        let m = RelationMatrix::from_pairs(4, [(0, 1), (1, 2), (2, 3)]);
        let tc = transitive_closure(&m, WarshallVariant::BooleanOr);
        assert_eq!(tc.count_nonzero(), 6);
        assert!(tc.contains(0, 3));
        assert!(!tc.contains(3, 0));
        // Input is not mutated.
        assert_eq!(m.count_nonzero(), 3);
    }

    #[test]
    fn variants_agree() {
        let m = RelationMatrix::from_pairs(5, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 4)]);
        let a = transitive_closure(&m, WarshallVariant::BooleanOr);
        let b = transitive_closure(&m, WarshallVariant::AddAndClamp);
        assert_eq!(a, b);
        assert!(b.is_binary());
    }

    #[test]
    fn cycle_sets_diagonal() {
        let m = RelationMatrix::from_pairs(2, [(0, 1), (1, 0)]);
        let tc = transitive_closure(&m, WarshallVariant::BooleanOr);
        assert!(tc.is_full());
    }

    #[test]
    fn variant_names() {
        assert_eq!("boolean_OR".parse::<WarshallVariant>().unwrap(), WarshallVariant::BooleanOr);
        assert_eq!(
            "add-and-clamp".parse::<WarshallVariant>().unwrap(),
            WarshallVariant::AddAndClamp
        );
        let err = "xor".parse::<WarshallVariant>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownWarshallVariant { .. }));
    }
}
