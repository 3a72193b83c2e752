//! In-memory ScorebookRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::repository::{RepositoryError, Result, ScorebookRepository};
use crate::scorebook::Scorebook;

/// In-memory implementation of ScorebookRepository.
pub struct InMemoryScorebookRepo {
    scorebooks: RwLock<HashMap<String, Scorebook>>,
}

impl InMemoryScorebookRepo {
    pub fn new() -> Self {
        Self {
            scorebooks: RwLock::new(HashMap::new()),
        }
    }

    /// Create with one scorebook already stored under `id`.
    pub fn with_scorebook(id: impl Into<String>, scorebook: Scorebook) -> Self {
        let mut scorebooks = HashMap::new();
        scorebooks.insert(id.into(), scorebook);
        Self {
            scorebooks: RwLock::new(scorebooks),
        }
    }
}

impl Default for InMemoryScorebookRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ScorebookRepository for InMemoryScorebookRepo {
    fn save(&self, id: &str, scorebook: &Scorebook) -> Result<()> {
        let mut scorebooks = self
            .scorebooks
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        scorebooks.insert(id.to_owned(), scorebook.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Scorebook>> {
        let scorebooks = self
            .scorebooks
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(scorebooks.get(id).cloned())
    }

    fn exists(&self, id: &str) -> bool {
        self.scorebooks
            .read()
            .map(|scorebooks| scorebooks.contains_key(id))
            .unwrap_or(false)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let mut scorebooks = self
            .scorebooks
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        scorebooks.remove(id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let scorebooks = self
            .scorebooks
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = scorebooks.keys().cloned().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
