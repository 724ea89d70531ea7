//! Host shells - the owners of capability bindings.

use std::sync::Arc;

use crate::core::PlatformTarget;
use crate::registry::scope::Scope;

/// A platform-specific application hosting shared modules.
///
/// Each shell hands out root scopes that belong to it alone. Scopes of two
/// shells never share a chain, so a binding made by the native shell cannot
/// be seen from a web render path.
#[derive(Debug, Clone)]
pub struct HostShell {
    name: Arc<str>,
    target: PlatformTarget,
    strict: bool,
}

impl HostShell {
    pub fn new(name: impl AsRef<str>, target: PlatformTarget) -> Self {
        HostShell {
            name: Arc::from(name.as_ref()),
            target,
            strict: false,
        }
    }

    /// Render every mounted screen twice and reject output that differs.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &PlatformTarget {
        &self.target
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Open a fresh root scope for this shell's render tree.
    pub fn root(&self) -> Scope<'static> {
        Scope::root(Arc::clone(&self.name), Arc::from(self.target.name()))
    }

    /// Whether `scope` was opened by this shell (not merely one with the
    /// same name).
    pub fn owns(&self, scope: &Scope<'_>) -> bool {
        Arc::ptr_eq(&self.name, scope.shell_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlatformSet;

    #[test]
    fn test_root_scope_carries_shell_identity() {
        let platforms = PlatformSet::defaults();
        let shell = HostShell::new("web-app", platforms.target("web").unwrap());
        let root = shell.root();

        assert_eq!(root.shell(), "web-app");
        assert_eq!(root.platform(), "web");
        assert_eq!(root.path(), "root");
        assert!(shell.owns(&root));
        assert!(shell.owns(&root.child("screen")));
    }

    #[test]
    fn test_same_name_different_shell() {
        let platforms = PlatformSet::defaults();
        let a = HostShell::new("app", platforms.target("web").unwrap());
        let b = HostShell::new("app", platforms.target("native").unwrap());

        assert!(!a.owns(&b.root()));
        assert!(!b.owns(&a.root()));
    }
}
