//! Package consistency checks.
//!
//! Duplicate artifacts are errors: any resolution landing on them fails, so
//! they are reported up front for every target at once. Modules that
//! resolve for some targets but not others are only warnings, since
//! platform-only modules are legitimate.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::core::{ModuleIdentifier, Workspace};
use crate::ops::resolve::load_mapping;
use crate::resolver::{ResolutionError, VariantMapping};
use crate::util::diagnostic::Diagnostic;

/// Result of checking a package.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub modules: usize,
    pub targets: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Check the workspace on disk.
pub fn check_workspace(ws: &Workspace) -> Result<CheckReport> {
    let mapping = load_mapping(ws)?;
    Ok(check_mapping(&mapping))
}

/// Check an already-built mapping against every declared target.
pub fn check_mapping(mapping: &VariantMapping) -> CheckReport {
    let mut diagnostics = Vec::new();

    for conflict in mapping.conflicts() {
        let mut diag = Diagnostic::error(format!(
            "duplicate `{}` artifacts for `{}`",
            conflict.variant, conflict.identifier
        ));
        if let Some(first) = conflict.candidates.first() {
            diag = diag.with_location(first.path.clone());
        }
        for artifact in &conflict.candidates {
            diag = diag.with_context(format!("candidate {}", artifact.path.display()));
        }
        diagnostics.push(diag.with_suggestion("Delete or rename all but one of the candidates"));
    }

    let mut uncovered: BTreeMap<&ModuleIdentifier, Vec<String>> = BTreeMap::new();
    let targets: Vec<_> = mapping.platforms().targets().collect();

    for identifier in mapping.identifiers() {
        for target in &targets {
            if let Err(ResolutionError::ModuleNotFound { .. }) = mapping.resolve(identifier, target) {
                uncovered.entry(identifier).or_default().push(target.to_string());
            }
        }
    }

    for (identifier, missing) in uncovered {
        let mut diag = Diagnostic::warning(format!(
            "module `{}` has no artifact for {}",
            identifier,
            missing
                .iter()
                .map(|t| format!("`{}`", t))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        for artifact in mapping.artifacts(identifier) {
            diag = diag.with_context(format!("found {}", artifact.path.display()));
        }
        diagnostics.push(diag.with_suggestion(format!(
            "Add a fallback artifact for `{}` if it is meant to be shared",
            identifier
        )));
    }

    tracing::debug!(
        "checked {} modules against {} targets: {} diagnostics",
        mapping.len(),
        targets.len(),
        diagnostics.len()
    );

    CheckReport {
        modules: mapping.len(),
        targets: targets.len(),
        diagnostics,
    }
}
