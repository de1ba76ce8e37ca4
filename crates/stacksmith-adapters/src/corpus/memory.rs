//! In-memory template corpus.

use std::sync::{Arc, RwLock};

use stacksmith_core::application::{ApplicationError, TemplateCorpus};
use stacksmith_core::domain::Fragment;
use stacksmith_core::error::CoreResult;

use crate::builtin_corpus;

/// Fragment store backed by a shared vector. Several fragments may target
/// the same path (with mutually exclusive predicates), so this is a list,
/// not a map.
#[derive(Clone)]
pub struct InMemoryCorpus {
    inner: Arc<RwLock<Vec<Fragment>>>,
}

impl InMemoryCorpus {
    /// Empty corpus, mainly for tests.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Corpus pre-loaded with the built-in fragment set.
    pub fn with_builtin() -> Self {
        Self {
            inner: Arc::new(RwLock::new(builtin_corpus::fragments())),
        }
    }

    pub fn insert(&self, fragment: Fragment) -> CoreResult<()> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::CorpusUnavailable {
                reason: "corpus lock poisoned".to_string(),
            })?
            .push(fragment);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCorpus for InMemoryCorpus {
    fn fragments(&self) -> CoreResult<Vec<Fragment>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::CorpusUnavailable {
                reason: "corpus lock poisoned".to_string(),
            })?
            .clone())
    }
}
