//! The variant mapping: (identifier, target) -> artifact.
//!
//! Built once per build from a package-tree listing and then read-only. Each
//! identifier has one slot per [`Variant`]; a slot holding more than one
//! artifact is a conflict that fails any resolution landing on it.

use std::collections::BTreeMap;

use crate::core::{Artifact, ModuleIdentifier, PlatformSet, PlatformTarget, Variant};
use crate::resolver::errors::ResolutionError;
use crate::sources::PackageTree;
use crate::util::hash::Fingerprint;

/// Two or more artifacts claiming the same identifier and variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub identifier: ModuleIdentifier,
    pub variant: Variant,
    pub candidates: Vec<Artifact>,
}

/// All artifacts of one identifier, by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ModuleSlots {
    pub(crate) slots: BTreeMap<Variant, Vec<Artifact>>,
}

impl ModuleSlots {
    fn all(&self) -> impl Iterator<Item = &Artifact> + '_ {
        self.slots.values().flatten()
    }
}

/// Immutable resolution table for one package tree and platform set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantMapping {
    platforms: PlatformSet,
    pub(crate) modules: BTreeMap<ModuleIdentifier, ModuleSlots>,
    fingerprint: String,
}

impl VariantMapping {
    /// Classify every file in the listing.
    pub fn build(tree: &PackageTree, platforms: &PlatformSet, extensions: &[String]) -> Self {
        let mut modules: BTreeMap<ModuleIdentifier, ModuleSlots> = BTreeMap::new();
        let mut ignored = 0usize;

        for file in tree.files() {
            let package_path = file.package_path();
            match Artifact::classify(&file.relative, &package_path, platforms, extensions) {
                Some(artifact) => {
                    let slot = modules
                        .entry(artifact.identifier.clone())
                        .or_default()
                        .slots
                        .entry(artifact.variant.clone())
                        .or_default();
                    slot.push(artifact);
                    slot.sort();
                }
                None => {
                    tracing::trace!("ignored {} (not an artifact)", package_path.display());
                    ignored += 1;
                }
            }
        }

        let mut fp = Fingerprint::new();
        for def in platforms.iter() {
            fp.update_str(&def.name)
                .update_str(&def.suffix)
                .update_opt(def.parent.as_deref());
        }
        fp.update_strs(extensions.iter().map(String::as_str));
        tree.fingerprint_into(&mut fp);

        tracing::debug!(
            "variant mapping: {} modules from {} files ({} ignored)",
            modules.len(),
            tree.len(),
            ignored
        );

        VariantMapping {
            platforms: platforms.clone(),
            modules,
            fingerprint: fp.finish(),
        }
    }

    pub fn platforms(&self) -> &PlatformSet {
        &self.platforms
    }

    /// Digest of everything the mapping was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// All identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &ModuleIdentifier> + '_ {
        self.modules.keys()
    }

    pub fn contains(&self, identifier: &ModuleIdentifier) -> bool {
        self.modules.contains_key(identifier)
    }

    /// Every artifact sharing `identifier`, sorted by variant then path.
    pub fn artifacts(&self, identifier: &ModuleIdentifier) -> Vec<&Artifact> {
        self.modules
            .get(identifier)
            .map(|m| m.all().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Slots examined for `target`, in order: the target's own suffix, each
    /// ancestor nearest-first, then the fallback.
    pub fn candidates(&self, target: &PlatformTarget) -> Result<Vec<Variant>, ResolutionError> {
        let target = self.platforms.target(target.name())?;
        let mut chain: Vec<Variant> = self
            .platforms
            .chain(&target)
            .map(|p| Variant::Platform(p.name.clone()))
            .collect();
        chain.push(Variant::Fallback);
        Ok(chain)
    }

    /// Resolve one identifier for one target.
    pub fn resolve(
        &self,
        identifier: &ModuleIdentifier,
        target: &PlatformTarget,
    ) -> Result<&Artifact, ResolutionError> {
        let candidates = self.candidates(target)?;

        let Some(module) = self.modules.get(identifier) else {
            return Err(ResolutionError::ModuleNotFound {
                identifier: identifier.to_string(),
                target: target.to_string(),
                considered: Vec::new(),
            });
        };

        match select(identifier, module, &candidates, target)? {
            Some(artifact) => {
                tracing::trace!("{} [{}] -> {}", identifier, target, artifact);
                Ok(artifact)
            }
            None => Err(ResolutionError::ModuleNotFound {
                identifier: identifier.to_string(),
                target: target.to_string(),
                considered: module.all().map(|a| a.path.clone()).collect(),
            }),
        }
    }

    /// Every slot holding more than one artifact, across all targets.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.modules
            .iter()
            .flat_map(|(identifier, module)| {
                module
                    .slots
                    .iter()
                    .filter(|(_, artifacts)| artifacts.len() > 1)
                    .map(move |(variant, artifacts)| Conflict {
                        identifier: identifier.clone(),
                        variant: variant.clone(),
                        candidates: artifacts.clone(),
                    })
            })
            .collect()
    }
}

/// Walk `candidates` and return the first filled slot.
pub(crate) fn select<'a>(
    identifier: &ModuleIdentifier,
    module: &'a ModuleSlots,
    candidates: &[Variant],
    target: &PlatformTarget,
) -> Result<Option<&'a Artifact>, ResolutionError> {
    for variant in candidates {
        match module.slots.get(variant).map(Vec::as_slice) {
            Some([only]) => return Ok(Some(only)),
            Some([]) | None => continue,
            Some(many) => {
                return Err(ResolutionError::DuplicateVariant {
                    identifier: identifier.to_string(),
                    target: target.to_string(),
                    variant: variant.to_string(),
                    candidates: many.iter().map(|a| a.path.clone()).collect(),
                })
            }
        }
    }
    Ok(None)
}
