//! Logical module identifiers.
//!
//! A ModuleIdentifier names a unit of shared code independently of the
//! platform it is compiled for. It is the artifact's path relative to its
//! source root with the platform suffix and file extension stripped, so
//! `src/components/toggle-theme.web.tsx` and
//! `src/components/toggle-theme.tsx` both belong to `components/toggle-theme`.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned for a malformed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("module identifier is empty")]
    Empty,

    #[error("module identifier `{0}` contains an empty path segment")]
    EmptySegment(String),

    #[error("module identifier `{0}` must not contain `..`")]
    ParentSegment(String),
}

/// Opaque logical name for a unit of shared code.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleIdentifier(String);

impl ModuleIdentifier {
    /// Parse and normalize an identifier.
    ///
    /// Backslashes are treated as separators, a leading `./` and trailing `/`
    /// are dropped.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
        let raw = raw.as_ref().replace('\\', "/");
        let trimmed = raw.trim_start_matches("./").trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(IdentifierError::Empty);
        }

        for segment in trimmed.split('/') {
            match segment {
                "" | "." => return Err(IdentifierError::EmptySegment(raw.clone())),
                ".." => return Err(IdentifierError::ParentSegment(raw.clone())),
                _ => {}
            }
        }

        Ok(ModuleIdentifier(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleIdentifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleIdentifier::new(s)
    }
}

impl AsRef<str> for ModuleIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleIdentifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Serialize for ModuleIdentifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModuleIdentifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ModuleIdentifier::new(s).map_err(serde::de::Error::custom)
    }
}
