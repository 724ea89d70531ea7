//! Binding scopes.
//!
//! A [`Scope`] is one node of a host shell's ownership chain. The shell
//! creates the root; each subtree boundary opens a child that borrows its
//! parent, so a subtree always unmounts before the subtree that encloses it.
//!
//! Bindings are attached by value (`scope.bind(..)` consumes and returns the
//! scope), which fixes them before any child can be opened or any lookup can
//! observe them. Lookups walk outward from the calling scope and the first
//! binding found wins.

use std::any::Any;
use std::panic::Location;
use std::sync::Arc;

use crate::registry::capability::{Capability, CapabilityKey};
use crate::registry::errors::RegistryError;

struct Binding {
    key: CapabilityKey,
    /// Always an `Arc<C>` for the `C` named by `key`.
    value: Box<dyn Any + Send + Sync>,
}

/// A subtree's set of capability bindings plus a link to its parent.
pub struct Scope<'p> {
    shell: Arc<str>,
    platform: Arc<str>,
    path: String,
    parent: Option<&'p Scope<'p>>,
    bindings: Vec<Binding>,
}

impl Scope<'static> {
    /// A root scope; only host shells create these.
    pub(crate) fn root(shell: Arc<str>, platform: Arc<str>) -> Self {
        tracing::debug!("opened root scope for shell `{}` ({})", shell, platform);
        Scope {
            path: "root".to_string(),
            shell,
            platform,
            parent: None,
            bindings: Vec::new(),
        }
    }
}

impl<'p> Scope<'p> {
    /// Open a child scope for a nested subtree.
    pub fn child(&self, label: impl AsRef<str>) -> Scope<'_> {
        Scope {
            shell: Arc::clone(&self.shell),
            platform: Arc::clone(&self.platform),
            path: format!("{}/{}", self.path, label.as_ref()),
            parent: Some(self),
            bindings: Vec::new(),
        }
    }

    /// Bind `implementation` as this subtree's `C`.
    ///
    /// Shadows any binding of `C` in enclosing scopes for lookups made at or
    /// below this scope.
    pub fn bind<C: ?Sized + Capability>(mut self, implementation: Arc<C>) -> Result<Self, RegistryError> {
        let key = CapabilityKey::of::<C>();

        if self.bindings.iter().any(|b| b.key == key) {
            return Err(RegistryError::DuplicateBinding {
                capability: key.name().to_string(),
                scope: self.path.clone(),
            });
        }

        for (scope, binding) in self.chain().flat_map(|s| s.bindings.iter().map(move |b| (s, b))) {
            if binding.key.name() == key.name() && binding.key != key {
                return Err(RegistryError::ContractMismatch {
                    capability: key.name().to_string(),
                    expected: binding.key.type_name().to_string(),
                    found: key.type_name().to_string(),
                    scope: scope.path.clone(),
                });
            }
        }

        tracing::debug!("bound `{}` in {}:{}", key, self.shell, self.path);
        self.bindings.push(Binding {
            key,
            value: Box::new(implementation),
        });
        Ok(self)
    }

    /// The nearest enclosing implementation of `C`.
    ///
    /// Fails with [`RegistryError::BindingOmitted`] when no scope on the chain
    /// binds `C`; the error records the caller's source location.
    #[track_caller]
    pub fn lookup<C: ?Sized + Capability>(&self) -> Result<Arc<C>, RegistryError> {
        let key = CapabilityKey::of::<C>();

        for scope in self.chain() {
            if let Some(binding) = scope.bindings.iter().find(|b| b.key == key) {
                let value: &(dyn Any + Send + Sync) = &*binding.value;
                tracing::trace!("lookup `{}` from {} -> {}", key, self.path, scope.path);
                return value.downcast_ref::<Arc<C>>().cloned().ok_or_else(|| {
                    RegistryError::ContractMismatch {
                        capability: key.name().to_string(),
                        expected: binding.key.type_name().to_string(),
                        found: key.type_name().to_string(),
                        scope: scope.path.clone(),
                    }
                });
            }
        }

        Err(self.omitted(key.name().to_string(), Location::caller()))
    }

    /// Check that every capability in `required` is reachable from here.
    ///
    /// All missing names are reported together.
    #[track_caller]
    pub fn ensure(&self, required: &[CapabilityKey]) -> Result<(), RegistryError> {
        let missing: Vec<&str> = required
            .iter()
            .filter(|key| !self.chain().any(|s| s.bindings.iter().any(|b| b.key == **key)))
            .map(|key| key.name())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(self.omitted(missing.join(", "), Location::caller()))
        }
    }

    /// Capabilities visible from this scope, innermost first, shadowed ones
    /// omitted.
    pub fn visible(&self) -> Vec<CapabilityKey> {
        let mut seen: Vec<CapabilityKey> = Vec::new();
        for scope in self.chain() {
            for binding in &scope.bindings {
                if !seen.contains(&binding.key) {
                    seen.push(binding.key);
                }
            }
        }
        seen
    }

    /// `root/...` path of this scope within its shell.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub(crate) fn shell_id(&self) -> &Arc<str> {
        &self.shell
    }

    /// This scope, then each enclosing scope.
    fn chain(&self) -> impl Iterator<Item = &Scope<'_>> + '_ {
        let mut next: Option<&Scope<'_>> = Some(self);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent;
            Some(current)
        })
    }

    fn omitted(&self, capability: String, caller: &Location<'_>) -> RegistryError {
        let visible: Vec<&str> = self.visible().iter().map(|k| k.name()).collect();
        tracing::debug!(
            "`{}` not bound for {}:{} (visible: [{}])",
            capability,
            self.shell,
            self.path,
            visible.join(", ")
        );
        RegistryError::BindingOmitted {
            capability,
            shell: self.shell.to_string(),
            platform: self.platform.to_string(),
            scope: self.path.clone(),
            call_site: caller.to_string(),
        }
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        while let Some(binding) = self.bindings.pop() {
            tracing::trace!("released `{}` in {}:{}", binding.key, self.shell, self.path);
            drop(binding);
        }
    }
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("shell", &self.shell)
            .field("platform", &self.platform)
            .field("path", &self.path)
            .field("bindings", &self.bindings.iter().map(|b| b.key).collect::<Vec<_>>())
            .finish()
    }
}
