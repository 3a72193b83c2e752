//! Repository contract for persisting scorebooks.

use crate::repository::Result;
use crate::scorebook::Scorebook;

/// Whole-document persistence for scorebooks.
///
/// The scoring engine never calls this; the service loads a scorebook, runs
/// one engine operation on one of its matches, and saves the document back.
/// Saves are last-write-wins.
pub trait ScorebookRepository: Send + Sync {
    /// Save (or replace) a scorebook.
    fn save(&self, id: &str, scorebook: &Scorebook) -> Result<()>;

    /// Load a scorebook, `None` if it was never saved.
    fn load(&self, id: &str) -> Result<Option<Scorebook>>;

    /// Check if a scorebook exists.
    fn exists(&self, id: &str) -> bool;

    /// Delete a scorebook. Deleting a missing one is not an error.
    fn delete(&self, id: &str) -> Result<()>;

    /// List stored scorebook ids, sorted.
    fn list_ids(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
