//! Command implementations

pub mod check;
pub mod completions;
pub mod init;
pub mod plan;
pub mod resolve;
pub mod targets;

use duet::core::{ManifestError, PlatformError};
use duet::resolver::{PlanError, ResolutionError};
use duet::util::diagnostic::{emit, suggestions, Diagnostic};

/// Print the structured diagnostic behind `err`, if it has one.
///
/// The error itself is still returned to `main`, which prints its one-line
/// summary and sets the exit status.
pub fn report(err: anyhow::Error, color: bool) -> anyhow::Error {
    if let Some(resolution) = err.downcast_ref::<ResolutionError>() {
        emit(&resolution.to_diagnostic(), color);
    } else if let Some(platform) = err.downcast_ref::<PlatformError>() {
        emit(&ResolutionError::Platform(platform.clone()).to_diagnostic(), color);
    } else if let Some(plan) = err.downcast_ref::<PlanError>() {
        for failure in &plan.errors {
            emit(&failure.to_diagnostic(), color);
        }
        emit(
            &Diagnostic::note(format!("{} module(s) failed", plan.errors.len()))
                .with_suggestion(suggestions::RUN_CHECK),
            color,
        );
    } else if let Some(manifest) = err.downcast_ref::<ManifestError>() {
        emit(
            &Diagnostic::error(manifest.to_string()).with_suggestion(suggestions::NO_MANIFEST),
            color,
        );
        return anyhow::anyhow!("no package found");
    }
    err
}
