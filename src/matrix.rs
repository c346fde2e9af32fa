//! Square binary relation matrices.
//!
//! A [`RelationMatrix`] stores a C×C relation in row-major order with cells in
//! `{0.0, 1.0}`. Logical union is computed as addition followed by clamping,
//! and relational composition as a matrix product followed by clamping, so
//! every matrix handed out by this module is binary again.

use serde::{Deserialize, Serialize};

/// A C×C binary matrix encoding a homogeneous binary relation.
///
/// Cell `(i, j) == 1.0` means entity `i` relates to entity `j` (child → parent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMatrix {
    size: usize,
    cells: Vec<f32>,
}

impl RelationMatrix {
    /// The empty relation over `size` entities.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// The identity relation over `size` entities.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size);
        for i in 0..size {
            m.set(i, i);
        }
        m
    }

    /// Build a matrix from `(row, col)` pairs. Out-of-range pairs are ignored.
    pub fn from_pairs(size: usize, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut m = Self::zeros(size);
        for (row, col) in pairs {
            if row < size && col < size {
                m.set(row, col);
            }
        }
        m
    }

    /// Matrix dimension C.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[row * self.size + col]
    }

    /// Whether `(row, col)` is in the relation.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != 0.0
    }

    /// Put `(row, col)` into the relation.
    pub fn set(&mut self, row: usize, col: usize) {
        let size = self.size;
        self.cells[row * size + col] = 1.0;
    }

    /// One row of the matrix.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// `row[target] = row[target] OR row[source]`, cell by cell.
    pub fn or_row_from(&mut self, target: usize, source: usize) {
        let n = self.size;
        for k in 0..n {
            if self.cells[source * n + k] != 0.0 {
                self.cells[target * n + k] = 1.0;
            }
        }
    }

    /// `row[target] += row[source]`, then clamp that row to 1.
    pub fn add_row_from_clamped(&mut self, target: usize, source: usize) {
        let n = self.size;
        for k in 0..n {
            let sum = self.cells[target * n + k] + self.cells[source * n + k];
            self.cells[target * n + k] = sum.min(1.0);
        }
    }

    /// Clamp every cell to at most `max`.
    pub fn clamp_max(&mut self, max: f32) {
        for cell in &mut self.cells {
            if *cell > max {
                *cell = max;
            }
        }
    }

    /// Logical union: `clamp(self + other, max = 1)`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn union(&self, other: &Self) -> Self {
        assert_eq!(self.size, other.size, "relation dimensions must match");
        let mut out = self.clone();
        for (cell, rhs) in out.cells.iter_mut().zip(&other.cells) {
            *cell += rhs;
        }
        out.clamp_max(1.0);
        out
    }

    /// Relational composition: `clamp(self · other, max = 1)`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn product(&self, other: &Self) -> Self {
        assert_eq!(self.size, other.size, "relation dimensions must match");
        let n = self.size;
        let mut out = Self::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let lhs = self.cells[i * n + k];
                if lhs == 0.0 {
                    continue;
                }
                for j in 0..n {
                    out.cells[i * n + j] += lhs * other.cells[k * n + j];
                }
            }
        }
        out.clamp_max(1.0);
        out
    }

    /// Union with the identity relation, consuming `self`.
    pub fn with_identity(self) -> Self {
        let identity = Self::identity(self.size);
        self.union(&identity)
    }

    /// Number of non-zero cells.
    pub fn count_nonzero(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0.0).count()
    }

    /// Whether the relation is empty.
    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|&c| c == 0.0)
    }

    /// Whether the relation is universal (every cell set).
    pub fn is_full(&self) -> bool {
        self.count_nonzero() == self.cells.len()
    }

    /// Whether every cell is 0.0 or 1.0.
    pub fn is_binary(&self) -> bool {
        self.cells.iter().all(|&c| c == 0.0 || c == 1.0)
    }

    /// All `(row, col)` pairs in the relation, in row-major order.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let n = self.size;
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.contains(i, j))
            .collect()
    }

    /// Indices `i` with `(i, i)` in the relation.
    pub fn diagonal(&self) -> Vec<usize> {
        (0..self.size).filter(|&i| self.contains(i, i)).collect()
    }
}
