//! Union-of-powers transitive closure.
//!
//! For a C-entity relation `A`, no simple path is longer than C−1 edges and no
//! simple cycle longer than C, so the transitive closure is
//! `A ∪ A² ∪ … ∪ A^C` (Schmidt & Ströhlein, *Relations and Graphs*, §3.2.1).
//! The last power only contributes diagonal cells of cycles that visit every
//! entity. Most hierarchies stop producing anything new after a handful of
//! powers, so the loop watches the running union and stops once it settles.
//!
//! Stopping because the union merely stopped changing rests on the
//! hypothesis that an unchanged union never changes again. The loop keeps
//! checking that hypothesis and reports a violation through
//! [`PowerUnionOutcome::alert`] instead of failing.

use serde::{Deserialize, Serialize};

use crate::matrix::RelationMatrix;

/// Tuning knobs for the union-of-powers loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUnionOptions {
    /// Extra powers to compute beyond the A^C bound (diagnostics only).
    pub extra_powers: usize,
    /// Number of repeated unions tolerated before stopping.
    pub patience: usize,
    /// Whether to stop before the bound once the union settles.
    pub early_stopping: bool,
}

impl Default for PowerUnionOptions {
    fn default() -> Self {
        Self {
            extra_powers: 0,
            patience: 0,
            early_stopping: true,
        }
    }
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The latest power was empty; every later power is empty too.
    PowerExhausted,
    /// The union became the universal relation.
    Saturated,
    /// The union repeated more than `patience` times.
    PatienceExceeded,
    /// Every power up to the bound was computed.
    BoundReached,
}

/// Result of a union-of-powers run.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUnionOutcome {
    /// The (possibly approximate) transitive closure.
    pub closure: RelationMatrix,
    /// Set when an unchanged union was later followed by a changed one.
    /// Re-verify such inputs with Warshall's algorithm.
    pub alert: bool,
    /// Highest power computed (1 when the loop never ran).
    pub max_power: usize,
    /// Why the loop ended.
    pub stop_reason: StopReason,
}

/// Compute the transitive closure of `relation` by union of powers.
pub fn transitive_closure(relation: &RelationMatrix, options: &PowerUnionOptions) -> PowerUnionOutcome {
    let n = relation.size();
    let upper_bound = n + options.extra_powers;

    let mut power = relation.clone();
    let mut union = relation.clone();
    let mut previous_union = RelationMatrix::zeros(n);

    let mut repeats = 0usize;
    let mut unions_equal = false;
    let mut alert = false;
    let mut max_power = 1;
    let mut stop_reason = StopReason::BoundReached;

    for k in 2..=upper_bound {
        power = power.product(relation);
        union = union.union(&power);
        max_power = k;

        if union == previous_union {
            if !unions_equal {
                tracing::trace!(power = k, "union identical to predecessor");
            }
            unions_equal = true;
        } else {
            if unions_equal {
                tracing::warn!(power = k, "union changed after a repeat");
                alert = true;
            }
            unions_equal = false;
        }
        previous_union = union.clone();

        if !options.early_stopping {
            continue;
        }

        if unions_equal {
            repeats += 1;
            let reason = if power.is_zero() {
                Some(StopReason::PowerExhausted)
            } else if union.is_full() {
                Some(StopReason::Saturated)
            } else if repeats > options.patience {
                // The closure may be incomplete here if the hypothesis fails.
                Some(StopReason::PatienceExceeded)
            } else {
                None
            };
            if let Some(reason) = reason {
                stop_reason = reason;
                break;
            }
        } else {
            repeats = 0;
        }
    }

    tracing::debug!(
        max_power,
        bound = n,
        ?stop_reason,
        alert,
        "union of powers finished"
    );

    union.clamp_max(1.0);
    PowerUnionOutcome {
        closure: union,
        alert,
        max_power,
        stop_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> RelationMatrix {
        RelationMatrix::from_pairs(n, (0..n.saturating_sub(1)).map(|i| (i, i + 1)))
    }

    fn run(m: &RelationMatrix) -> PowerUnionOutcome {
        transitive_closure(m, &PowerUnionOptions::default())
    }

    #[test]
    fn chain_of_five_has_ten_pairs() {
        let out = run(&chain(5));
        assert_eq!(out.closure.count_nonzero(), 10);
        for i in 0..5 {
            for j in 0..5 {
                assert_eq!(out.closure.contains(i, j), i < j, "cell ({i}, {j})");
            }
        }
        assert!(!out.alert);
    }

    #[test]
    fn self_loop_survives() {
        let m = RelationMatrix::from_pairs(1, [(0, 0)]);
        let out = run(&m);
        assert_eq!(out.closure.get(0, 0), 1.0);
        assert_eq!(out.max_power, 1);
        assert_eq!(out.stop_reason, StopReason::BoundReached);
    }

    #[test]
    fn two_cycle_induces_reflexivity() {
        let m = RelationMatrix::from_pairs(2, [(0, 1), (1, 0)]);
        let out = run(&m);
        assert!(out.closure.is_full());
        assert_eq!(out.max_power, 2);

        let m = RelationMatrix::from_pairs(3, [(0, 1), (1, 0)]);
        let out = run(&m);
        assert_eq!(out.closure.pairs(), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn stops_when_power_exhausted() {
        let m = RelationMatrix::from_pairs(6, [(0, 1), (1, 2)]);
        let out = run(&m);
        assert_eq!(out.stop_reason, StopReason::PowerExhausted);
        assert!(out.max_power < 5);
        assert_eq!(out.closure.count_nonzero(), 3);
    }

    #[test]
    fn stops_when_saturated() {
        let n = 4;
        let all: Vec<_> = (0..n).flat_map(|i| (0..n).map(move |j| (i, j))).collect();
        let m = RelationMatrix::from_pairs(n, all);
        let out = run(&m);
        assert_eq!(out.stop_reason, StopReason::Saturated);
        assert!(out.closure.is_full());
    }

    #[test]
    fn disabled_early_stopping_reaches_bound() {
        let opts = PowerUnionOptions {
            early_stopping: false,
            extra_powers: 3,
            ..Default::default()
        };
        let out = transitive_closure(&chain(5), &opts);
        assert_eq!(out.stop_reason, StopReason::BoundReached);
        assert_eq!(out.max_power, 8);
        assert_eq!(out.closure, run(&chain(5)).closure);
        assert!(!out.alert);
    }

    #[test]
    fn patience_delays_stopping() {
        // A 3-cycle among five entities never exhausts its powers.
        let m = RelationMatrix::from_pairs(5, [(0, 1), (1, 2), (2, 0)]);
        let eager = run(&m);
        let patient = transitive_closure(
            &m,
            &PowerUnionOptions {
                patience: 1,
                ..Default::default()
            },
        );
        assert_eq!(eager.stop_reason, StopReason::PatienceExceeded);
        assert!(patient.max_power > eager.max_power);
        assert_eq!(eager.closure, patient.closure);
    }

    #[test]
    fn empty_relation() {
        let out = run(&RelationMatrix::zeros(0));
        assert_eq!(out.closure.size(), 0);
        let out = run(&RelationMatrix::zeros(4));
        assert!(out.closure.is_zero());
    }
}
