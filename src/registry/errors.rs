//! Registry wiring errors.
//!
//! Every variant is a host-shell wiring defect. They are raised at the point
//! of use and never replaced by a default implementation.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RegistryError {
    /// A lookup found no binding anywhere on its scope chain.
    #[error(
        "no `{capability}` bound for scope `{scope}` (shell `{shell}`, platform `{platform}`), requested at {call_site}"
    )]
    #[diagnostic(
        code(duet::registry::binding_omitted),
        help("Bind the capability in the host shell at or above this scope")
    )]
    BindingOmitted {
        capability: String,
        shell: String,
        platform: String,
        scope: String,
        call_site: String,
    },

    /// Two different interface types share one capability name.
    #[error(
        "capability `{capability}` is bound as `{expected}` in scope `{scope}`, cannot also bind `{found}`"
    )]
    #[diagnostic(
        code(duet::registry::contract_mismatch),
        help("Each capability name must belong to exactly one interface")
    )]
    ContractMismatch {
        capability: String,
        expected: String,
        found: String,
        scope: String,
    },

    /// The same interface bound twice in one scope.
    #[error("capability `{capability}` is already bound in scope `{scope}`")]
    #[diagnostic(
        code(duet::registry::duplicate_binding),
        help("Open a child scope to override a binding")
    )]
    DuplicateBinding { capability: String, scope: String },
}

impl RegistryError {
    /// Name of the capability involved.
    pub fn capability(&self) -> &str {
        match self {
            RegistryError::BindingOmitted { capability, .. }
            | RegistryError::ContractMismatch { capability, .. }
            | RegistryError::DuplicateBinding { capability, .. } => capability,
        }
    }
}
