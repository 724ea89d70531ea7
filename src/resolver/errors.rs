//! Resolution error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::PlatformError;
use crate::util::diagnostic::{suggestions, Diagnostic};

fn list_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        "none".to_string()
    } else {
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Fatal error resolving a module for a target.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolutionError {
    /// No artifact on the target's candidate chain, and no fallback.
    #[error(
        "module `{identifier}` not found for target `{target}` (considered: {})",
        list_paths(.considered)
    )]
    #[diagnostic(
        code(duet::resolve::not_found),
        help("Add a fallback artifact or a variant for this target")
    )]
    ModuleNotFound {
        identifier: String,
        target: String,
        considered: Vec<PathBuf>,
    },

    /// More than one artifact fills the slot resolution would pick.
    #[error(
        "`{identifier}` has {} `{variant}` artifacts for target `{target}`: {}",
        .candidates.len(),
        list_paths(.candidates)
    )]
    #[diagnostic(
        code(duet::resolve::duplicate_variant),
        help("Keep exactly one artifact per module and platform")
    )]
    DuplicateVariant {
        identifier: String,
        target: String,
        variant: String,
        candidates: Vec<PathBuf>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Platform(#[from] PlatformError),
}

impl ResolutionError {
    /// The module identifier involved, if any.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            ResolutionError::ModuleNotFound { identifier, .. }
            | ResolutionError::DuplicateVariant { identifier, .. } => Some(identifier),
            ResolutionError::Platform(_) => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolutionError::ModuleNotFound {
                identifier,
                target,
                considered,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "module `{}` not found for target `{}`",
                    identifier, target
                ));

                if considered.is_empty() {
                    diag = diag
                        .with_context("no artifact shares this identifier")
                        .with_suggestion(suggestions::CHECK_IDENTIFIER);
                } else {
                    for path in considered {
                        diag = diag.with_context(format!("considered {}", path.display()));
                    }
                    diag = diag
                        .with_suggestion(format!(
                            "Add a fallback artifact for `{}` (no platform suffix)",
                            identifier
                        ))
                        .with_suggestion(format!(
                            "Add a `{}` variant or one for a parent platform",
                            target
                        ));
                }

                diag
            }

            ResolutionError::DuplicateVariant {
                identifier,
                target,
                variant,
                candidates,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "duplicate `{}` artifacts for `{}`",
                    variant, identifier
                ))
                .with_context(format!("while resolving for target `{}`", target));

                for path in candidates {
                    diag = diag.with_context(format!("candidate {}", path.display()));
                }

                diag.with_suggestion("Delete or rename all but one of the candidates")
            }

            ResolutionError::Platform(err) => Diagnostic::error(err.to_string())
                .with_suggestion(suggestions::LIST_TARGETS),
        }
    }
}

/// A build plan could not be produced; every failure is collected.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("{} module(s) failed to resolve for target `{target}`", .errors.len())]
#[diagnostic(code(duet::resolve::plan_failed))]
pub struct PlanError {
    pub target: String,
    #[related]
    pub errors: Vec<ResolutionError>,
}
