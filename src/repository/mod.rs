use crate::composer::version::VersionComparator;
#[cfg(test)]
use std::collections::HashMap;
use std::sync::Arc;

pub mod vendor;
pub use vendor::VendorNotesSource;

/// Storage reader for per-package upgrade notes.
pub trait NotesSource {
    /// Raw notes text of the package, or `None` when it is missing or unreadable.
    fn read_notes(&self, package: &str) -> Option<String>;
}

/// Notes held in memory, keyed by package name.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotesSource {
    documents: HashMap<String, String>,
}

#[cfg(test)]
impl InMemoryNotesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, package: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(package.into(), text.into());
        self
    }
}

#[cfg(test)]
impl NotesSource for InMemoryNotesSource {
    fn read_notes(&self, package: &str) -> Option<String> {
        self.documents.get(package).cloned()
    }
}

pub trait VersionStrategy: Send + Sync {
    fn is_upgrade(&self, current: &str, candidate: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct DefaultVersionStrategy;

impl VersionStrategy for DefaultVersionStrategy {
    fn is_upgrade(&self, current: &str, candidate: &str) -> bool {
        VersionComparator::is_newer(candidate, current)
    }
}

impl DefaultVersionStrategy {
    pub fn shared() -> Arc<dyn VersionStrategy> {
        Arc::new(Self)
    }
}
