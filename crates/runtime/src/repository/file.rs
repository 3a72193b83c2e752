//! File-based ScorebookRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{RepositoryError, Result, ScorebookRepository};
use crate::scorebook::Scorebook;

/// File-based implementation of ScorebookRepository.
///
/// # File Format
///
/// Each scorebook is stored as `scorebook_{id}.json`, pretty-printed so an
/// operator can inspect or hand-correct it. Writes go to a temp file that is
/// then renamed over the previous version.
pub struct FileScorebookRepository {
    base_dir: PathBuf,
}

impl FileScorebookRepository {
    /// Create a repository rooted at `base_dir`, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn scorebook_path(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidId(id.to_owned()));
        }
        Ok(self.base_dir.join(format!("scorebook_{id}.json")))
    }
}

impl ScorebookRepository for FileScorebookRepository {
    fn save(&self, id: &str, scorebook: &Scorebook) -> Result<()> {
        let path = self.scorebook_path(id)?;
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(scorebook)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(scorebook = id, path = %path.display(), "saved scorebook");
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<Scorebook>> {
        let path = self.scorebook_path(id)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let scorebook: Scorebook = serde_json::from_slice(&bytes)?;

        tracing::debug!(scorebook = id, path = %path.display(), "loaded scorebook");
        Ok(Some(scorebook))
    }

    fn exists(&self, id: &str) -> bool {
        self.scorebook_path(id).is_ok_and(|path| path.exists())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.scorebook_path(id)?;

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(scorebook = id, "deleted scorebook");
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id) = filename
                    .strip_prefix("scorebook_")
                    .and_then(|s| s.strip_suffix(".json"))
            {
                ids.push(id.to_owned());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
