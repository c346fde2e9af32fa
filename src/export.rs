//! Export types for serializing engine results.
//!
//! [`ResultSnapshot`] captures the result relation together with its entity
//! list and the settings that produced it, suitable for JSON export.
//! [`PairExport`] is the label-resolved form used for human-readable listings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::EntityCatalog;
use crate::closure::ClosureMethod;
use crate::error::ExportError;
use crate::matrix::RelationMatrix;

/// Serializable snapshot of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    /// Entity names in index order.
    pub entities: Vec<String>,
    /// Non-zero cells of the result relation as `(child, parent)` indices.
    pub pairs: Vec<(usize, usize)>,
    /// Closure method code used.
    pub closure_method: ClosureMethod,
    /// Whether the identity was merged into the result.
    pub include_reflexivity: bool,
    /// Union-of-powers alert raised while computing the closure.
    pub alert: bool,
}

impl ResultSnapshot {
    pub fn new(
        entities: &[String],
        result: &RelationMatrix,
        closure_method: ClosureMethod,
        include_reflexivity: bool,
        alert: bool,
    ) -> Self {
        Self {
            entities: entities.to_vec(),
            pairs: result.pairs(),
            closure_method,
            include_reflexivity,
            alert,
        }
    }

    /// Rebuild the result relation from the stored pairs.
    pub fn to_matrix(&self) -> RelationMatrix {
        RelationMatrix::from_pairs(self.entities.len(), self.pairs.iter().copied())
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ExportError> {
        serde_json::to_string_pretty(self).map_err(|e| ExportError::Serialize {
            message: e.to_string(),
        })
    }

    /// Write pretty-printed JSON to `path`.
    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| ExportError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), pairs = self.pairs.len(), "exported result");
        Ok(())
    }
}

/// One related pair with resolved labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairExport {
    /// Child entity index.
    pub child: usize,
    /// Child short name.
    pub child_label: String,
    /// Parent entity index.
    pub parent: usize,
    /// Parent short name.
    pub parent_label: String,
}

/// Every non-zero cell of `matrix`, labelled with catalog short names.
pub fn labelled_pairs(catalog: &EntityCatalog, matrix: &RelationMatrix) -> Vec<PairExport> {
    matrix
        .pairs()
        .into_iter()
        .map(|(child, parent)| PairExport {
            child,
            child_label: catalog.short_name(child).unwrap_or_default().to_string(),
            parent,
            parent_label: catalog.short_name(parent).unwrap_or_default().to_string(),
        })
        .collect()
}
