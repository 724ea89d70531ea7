//! Test utilities for Duet unit tests.
//!
//! Fixtures build package listings without I/O; the recording adapters stand
//! in for host capability implementations so tests can observe exactly what
//! shared code asked the host to do.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{RecordingRouter, TreeFixture};
//!
//! let mapping = TreeFixture::new().file("button.web.tsx").mapping(&PlatformSet::defaults());
//! let router = Arc::new(RecordingRouter::default());
//! let scope = shell.root().bind::<dyn Router>(router.clone())?;
//! ```

pub mod fixtures;

use std::sync::Mutex;

use crate::capabilities::Router;

pub use fixtures::*;

/// Router navigation call, as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Push(String),
    Replace(String),
    Back,
}

/// Router that records every call and navigates nowhere.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    calls: Mutex<Vec<Navigation>>,
}

impl RecordingRouter {
    pub fn calls(&self) -> Vec<Navigation> {
        self.calls.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn push(&self, path: &str) {
        self.calls.lock().unwrap().push(Navigation::Push(path.to_string()));
    }

    fn replace(&self, path: &str) {
        self.calls.lock().unwrap().push(Navigation::Replace(path.to_string()));
    }

    fn back(&self) -> bool {
        self.calls.lock().unwrap().push(Navigation::Back);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlatformSet;
    use crate::sources::PackageTree;

    #[test]
    fn test_fixture_writes_scannable_tree() {
        let tmp = tempfile::TempDir::new().unwrap();
        let fixture = TreeFixture::new()
            .file("button.tsx")
            .file("nested/card.web.tsx");
        let manifest = fixture.write_to(tmp.path());

        assert!(manifest.is_file());
        assert!(tmp.path().join("src/nested/card.web.tsx").is_file());

        let scanned = PackageTree::scan_roots(tmp.path(), &["src".to_string()], &[]).unwrap();
        assert_eq!(scanned, fixture.tree());
    }

    #[test]
    fn test_fixture_mapping() {
        let mapping = TreeFixture::new()
            .file("a.tsx")
            .file("b.native.tsx")
            .mapping(&PlatformSet::defaults());
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_recording_router() {
        let router = RecordingRouter::default();
        router.push("/a");
        router.replace("/b");
        assert!(!router.back());
        assert_eq!(
            router.calls(),
            [
                Navigation::Push("/a".to_string()),
                Navigation::Replace("/b".to_string()),
                Navigation::Back,
            ]
        );
    }
}
