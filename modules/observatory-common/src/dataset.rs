use std::collections::HashSet;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ObservatoryError;
use crate::types::{Risk, Solution};

/// A complete snapshot of both collections, as shipped in `data/*.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SeedDataset {
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

impl SeedDataset {
    /// Read and validate a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, ObservatoryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ObservatoryError::Dataset(format!("cannot read {}: {e}", path.display()))
        })?;
        let dataset: SeedDataset = serde_json::from_str(&raw).map_err(|e| {
            ObservatoryError::Dataset(format!("cannot parse {}: {e}", path.display()))
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Ids must be unique within each collection. Dangling cross-references
    /// are allowed.
    pub fn validate(&self) -> Result<(), ObservatoryError> {
        if let Some(id) = first_duplicate(self.risks.iter().map(|r| r.id.as_str())) {
            return Err(ObservatoryError::Dataset(format!("duplicate risk id {id}")));
        }
        if let Some(id) = first_duplicate(self.solutions.iter().map(|s| s.id.as_str())) {
            return Err(ObservatoryError::Dataset(format!(
                "duplicate solution id {id}"
            )));
        }
        Ok(())
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SeedDataset)
    }
}

fn first_duplicate<'a>(ids: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
