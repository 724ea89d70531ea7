//! Whole-target build plans.
//!
//! A plan resolves every identifier in the mapping for one target. Modules
//! with nothing on the target's candidate chain are listed as skipped: they
//! exist only for other platforms. Any other failure aborts the plan, with
//! every failing module reported.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use crate::core::{ModuleIdentifier, PlatformTarget, Variant};
use crate::resolver::errors::{PlanError, ResolutionError};
use crate::resolver::mapping::{select, VariantMapping};
use crate::util::hash::Fingerprint;

/// The artifact chosen for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub artifact: PathBuf,
    pub variant: Variant,
}

/// Resolved artifacts for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub target: PlatformTarget,
    pub fingerprint: String,
    pub modules: BTreeMap<ModuleIdentifier, PlanEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<ModuleIdentifier>,
}

impl BuildPlan {
    pub fn get(&self, identifier: &ModuleIdentifier) -> Option<&PlanEntry> {
        self.modules.get(identifier)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl VariantMapping {
    /// Resolve every module for `target`.
    ///
    /// Modules are independent, so they are resolved in parallel.
    pub fn plan(&self, target: &PlatformTarget) -> Result<BuildPlan, PlanError> {
        let candidates = self.candidates(target).map_err(|e| PlanError {
            target: target.to_string(),
            errors: vec![e],
        })?;

        let results: Vec<(ModuleIdentifier, Result<Option<PlanEntry>, ResolutionError>)> = self
            .modules
            .par_iter()
            .map(|(identifier, module)| {
                let selected = select(identifier, module, &candidates, target).map(|found| {
                    found.map(|artifact| PlanEntry {
                        artifact: artifact.path.clone(),
                        variant: artifact.variant.clone(),
                    })
                });
                (identifier.clone(), selected)
            })
            .collect();

        let mut modules = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        for (identifier, result) in results {
            match result {
                Ok(Some(entry)) => {
                    modules.insert(identifier, entry);
                }
                Ok(None) => skipped.push(identifier),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            errors.sort_by(|a, b| a.identifier().cmp(&b.identifier()));
            return Err(PlanError {
                target: target.to_string(),
                errors,
            });
        }

        skipped.sort();

        let mut fp = Fingerprint::new();
        fp.update_str(self.fingerprint()).update_str(target.name());

        tracing::debug!(
            "plan for `{}`: {} resolved, {} skipped",
            target,
            modules.len(),
            skipped.len()
        );

        Ok(BuildPlan {
            target: target.clone(),
            fingerprint: fp.finish(),
            modules,
            skipped,
        })
    }
}
