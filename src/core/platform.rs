//! Platform targets - the closed set of platforms a build can select.
//!
//! A platform is declared once in `Duet.toml` with a name, the file-name
//! suffix that marks its variants, and an optional parent. The parent link
//! defines specificity: `native-ios` (suffix `ios`) with parent `native`
//! prefers `button.ios.tsx`, then `button.native.tsx`, then `button.tsx`.
//!
//! A [`PlatformTarget`] can only be obtained from a [`PlatformSet`], so every
//! target that reaches the resolver is a member of the configured set.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use miette::Diagnostic;
use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("static regex"));

/// Errors in the platform configuration, or an unknown target name.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum PlatformError {
    #[error("unknown platform `{name}` (configured: {})", .known.join(", "))]
    #[diagnostic(
        code(duet::platform::unknown),
        help("Run `duet targets` to list the configured platforms")
    )]
    Unknown { name: String, known: Vec<String> },

    #[error("no platforms configured")]
    #[diagnostic(code(duet::platform::empty))]
    Empty,

    #[error("invalid platform {field} `{value}`: must match [a-z][a-z0-9_-]*")]
    #[diagnostic(code(duet::platform::invalid_name))]
    InvalidName { field: &'static str, value: String },

    #[error("platform `{0}` is declared more than once")]
    #[diagnostic(code(duet::platform::duplicate_name))]
    DuplicateName(String),

    #[error("suffix `{suffix}` is used by both `{first}` and `{second}`")]
    #[diagnostic(code(duet::platform::duplicate_suffix))]
    DuplicateSuffix {
        suffix: String,
        first: String,
        second: String,
    },

    #[error("suffix `{suffix}` of platform `{platform}` is also a source extension")]
    #[diagnostic(code(duet::platform::suffix_is_extension))]
    SuffixIsExtension { platform: String, suffix: String },

    #[error("platform `{platform}` names unknown parent `{parent}`")]
    #[diagnostic(code(duet::platform::unknown_parent))]
    UnknownParent { platform: String, parent: String },

    #[error("platform parents form a cycle: {}", .platforms.join(" -> "))]
    #[diagnostic(code(duet::platform::cycle))]
    Cycle { platforms: Vec<String> },
}

/// One platform declaration (`[[platform]]` in `Duet.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDef {
    /// Platform name used on the command line (e.g. `native-ios`)
    pub name: String,

    /// File-name suffix marking variants for this platform (e.g. `ios`)
    pub suffix: String,

    /// Broader platform whose variants apply when this one has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl PlatformDef {
    pub fn new(name: impl Into<String>, suffix: impl Into<String>) -> Self {
        PlatformDef {
            name: name.into(),
            suffix: suffix.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// The platforms a build runs against when `Duet.toml` declares none.
pub fn default_platforms() -> Vec<PlatformDef> {
    vec![
        PlatformDef::new("web", "web"),
        PlatformDef::new("native", "native"),
        PlatformDef::new("native-ios", "ios").with_parent("native"),
        PlatformDef::new("native-android", "android").with_parent("native"),
    ]
}

/// The single active platform of a build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlatformTarget {
    name: String,
}

impl PlatformTarget {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A validated, closed set of platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSet {
    platforms: Vec<PlatformDef>,
    /// Index chain per platform: itself, then ancestors nearest-first.
    chains: HashMap<String, Vec<usize>>,
}

impl PlatformSet {
    /// Validate declarations against the configured source extensions.
    pub fn new(platforms: Vec<PlatformDef>, extensions: &[String]) -> Result<Self, PlatformError> {
        if platforms.is_empty() {
            return Err(PlatformError::Empty);
        }

        let mut by_name: HashMap<&str, usize> = HashMap::new();
        let mut by_suffix: HashMap<&str, &str> = HashMap::new();

        for (idx, def) in platforms.iter().enumerate() {
            for (field, value) in [("name", &def.name), ("suffix", &def.suffix)] {
                if !NAME_RE.is_match(value) {
                    return Err(PlatformError::InvalidName {
                        field,
                        value: value.clone(),
                    });
                }
            }

            if by_name.insert(def.name.as_str(), idx).is_some() {
                return Err(PlatformError::DuplicateName(def.name.clone()));
            }

            if let Some(first) = by_suffix.insert(def.suffix.as_str(), def.name.as_str()) {
                return Err(PlatformError::DuplicateSuffix {
                    suffix: def.suffix.clone(),
                    first: first.to_string(),
                    second: def.name.clone(),
                });
            }

            if extensions.iter().any(|ext| ext == &def.suffix) {
                return Err(PlatformError::SuffixIsExtension {
                    platform: def.name.clone(),
                    suffix: def.suffix.clone(),
                });
            }
        }

        // Parent graph: edge child -> parent.
        let mut graph = DiGraph::<usize, ()>::new();
        let nodes: Vec<_> = (0..platforms.len()).map(|i| graph.add_node(i)).collect();

        for (idx, def) in platforms.iter().enumerate() {
            if let Some(parent) = &def.parent {
                let parent_idx =
                    *by_name
                        .get(parent.as_str())
                        .ok_or_else(|| PlatformError::UnknownParent {
                            platform: def.name.clone(),
                            parent: parent.clone(),
                        })?;
                graph.add_edge(nodes[idx], nodes[parent_idx], ());
            }
        }

        for component in tarjan_scc(&graph) {
            let self_loop = component.len() == 1 && graph.contains_edge(component[0], component[0]);
            if component.len() > 1 || self_loop {
                let mut names: Vec<String> = component
                    .iter()
                    .map(|n| platforms[graph[*n]].name.clone())
                    .collect();
                names.sort();
                return Err(PlatformError::Cycle { platforms: names });
            }
        }

        Ok(Self::from_validated(platforms))
    }

    /// The built-in `web` / `native` / `native-ios` / `native-android` set.
    pub fn defaults() -> Self {
        Self::from_validated(default_platforms())
    }

    fn from_validated(platforms: Vec<PlatformDef>) -> Self {
        let index: HashMap<&str, usize> = platforms
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.as_str(), i))
            .collect();

        let mut chains = HashMap::new();
        for (idx, def) in platforms.iter().enumerate() {
            let mut chain = vec![idx];
            let mut parent = def.parent.as_deref();
            while let Some(name) = parent {
                let Some(&next) = index.get(name) else { break };
                if chain.contains(&next) {
                    break;
                }
                chain.push(next);
                parent = platforms[next].parent.as_deref();
            }
            chains.insert(def.name.clone(), chain);
        }

        PlatformSet { platforms, chains }
    }

    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Result<PlatformTarget, PlatformError> {
        if self.chains.contains_key(name) {
            Ok(PlatformTarget {
                name: name.to_string(),
            })
        } else {
            Err(PlatformError::Unknown {
                name: name.to_string(),
                known: self.names().map(str::to_string).collect(),
            })
        }
    }

    /// All targets in declaration order.
    pub fn targets(&self) -> impl Iterator<Item = PlatformTarget> + '_ {
        self.platforms.iter().map(|p| PlatformTarget {
            name: p.name.clone(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.platforms.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformDef> + '_ {
        self.platforms.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PlatformDef> {
        self.platforms.iter().find(|p| p.name == name)
    }

    /// Find the platform that owns a file-name suffix.
    pub fn by_suffix(&self, suffix: &str) -> Option<&PlatformDef> {
        self.platforms.iter().find(|p| p.suffix == suffix)
    }

    /// Candidate platforms for a target, most specific first.
    pub fn chain<'a>(&'a self, target: &PlatformTarget) -> impl Iterator<Item = &'a PlatformDef> + 'a {
        self.chains
            .get(target.name())
            .into_iter()
            .flatten()
            .map(move |&idx| &self.platforms[idx])
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

impl Default for PlatformSet {
    fn default() -> Self {
        Self::defaults()
    }
}
