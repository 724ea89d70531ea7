use miette::Diagnostic;
use thiserror::Error;

use crate::registry::{CapabilityKey, HostShell, RegistryError, Scope};
use crate::screen::adapter::DataAdapter;
use crate::screen::node::Node;

/// A shared screen: a pure function from props (plus capabilities looked up
/// in its scope) to a render tree.
pub trait Screen {
    /// Already-resolved input. Screens never fetch.
    type Props;

    const NAME: &'static str;

    /// Capabilities the screen will look up while rendering.
    fn requires(&self) -> Vec<CapabilityKey> {
        Vec::new()
    }

    fn render(&self, props: &Self::Props, scope: &Scope<'_>) -> Result<Node, RegistryError>;
}

#[derive(Debug, Error, Diagnostic)]
pub enum ScreenError {
    #[error("failed to load props for screen `{screen}`")]
    #[diagnostic(code(duet::screen::data))]
    Data {
        screen: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("screen `{screen}` cannot render")]
    #[diagnostic(code(duet::screen::registry))]
    Registry {
        screen: &'static str,
        #[source]
        source: RegistryError,
    },

    #[error("screen `{screen}` rendered different output from identical props")]
    #[diagnostic(
        code(duet::screen::impure),
        help("Move data loading into the host's data adapter; render must depend only on props")
    )]
    Impure {
        screen: &'static str,
        first: String,
        second: String,
    },

    #[error("shell `{shell}` cannot mount `{screen}` into a scope owned by shell `{owner}`")]
    #[diagnostic(code(duet::screen::foreign_scope))]
    ForeignScope {
        screen: &'static str,
        shell: String,
        owner: String,
    },
}

impl HostShell {
    /// Load props through `adapter` and render `screen` in `scope`.
    ///
    /// Required capabilities are checked before any data is loaded, so a
    /// wiring defect never costs a fetch. Strict shells render twice and
    /// reject output that differs. A missing capability is reported at the
    /// caller of `mount`.
    #[track_caller]
    pub fn mount<S, A>(
        &self,
        scope: &Scope<'_>,
        screen: &S,
        adapter: &A,
        request: &A::Request,
    ) -> Result<Node, ScreenError>
    where
        S: Screen,
        A: DataAdapter<S::Props>,
    {
        if !self.owns(scope) {
            return Err(ScreenError::ForeignScope {
                screen: S::NAME,
                shell: self.name().to_string(),
                owner: scope.shell().to_string(),
            });
        }

        let registry = |source| ScreenError::Registry {
            screen: S::NAME,
            source,
        };

        scope.ensure(&screen.requires()).map_err(registry)?;

        let props = adapter.load(request).map_err(|source| ScreenError::Data {
            screen: S::NAME,
            source,
        })?;

        let node = screen.render(&props, scope).map_err(registry)?;

        if self.is_strict() {
            let again = screen.render(&props, scope).map_err(registry)?;
            if again != node {
                return Err(ScreenError::Impure {
                    screen: S::NAME,
                    first: node.to_string(),
                    second: again.to_string(),
                });
            }
        }

        tracing::debug!("mounted `{}` in {}:{}", S::NAME, self.name(), scope.path());
        Ok(node)
    }
}
