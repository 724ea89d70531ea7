//! Fingerprints for build plans.
//!
//! A plan's fingerprint covers everything resolution depends on: the file
//! listing, the platform set and the active target. Two plans with the same
//! fingerprint were produced from identical inputs.

use sha2::{Digest, Sha256};

/// Incremental fingerprint over ordered string components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component, NUL-separated from the next.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    pub fn update_strs<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for s in items {
            self.update_str(s);
        }
        self
    }

    /// Add an optional component; absent and empty hash differently.
    pub fn update_opt(&mut self, opt: Option<&str>) -> &mut Self {
        match opt {
            Some(s) => {
                self.hasher.update(b"\x01");
                self.update_str(s)
            }
            None => {
                self.hasher.update(b"\x00");
                self
            }
        }
    }

    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
