//! Repository layer for scorebook documents.
//!
//! A scorebook (tournaments, teams, matches) is loaded and saved as a whole.
//! Two backends are provided:
//! - [`InMemoryScorebookRepo`] for tests and throwaway sessions
//! - [`FileScorebookRepository`] for one JSON file per scorebook on disk

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileScorebookRepository;
pub use memory::InMemoryScorebookRepo;
pub use traits::ScorebookRepository;
