//! Question persistence.
//!
//! [`QuestionStore`] is the seam between the service and the storage engine.
//! Every listing is returned in ascending id order.

mod memory;
mod sqlite;

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Category, NewQuestion, Question};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait QuestionStore: Send + Sync {
    /// Categories the store was seeded with, in id order.
    fn categories(&self) -> Result<Vec<Category>>;

    fn list_all(&self) -> Result<Vec<Question>>;

    fn list_by_category(&self, category_id: i64) -> Result<Vec<Question>>;

    fn list_excluding(&self, ids: &HashSet<i64>) -> Result<Vec<Question>>;

    fn list_by_category_excluding(
        &self,
        category_id: i64,
        ids: &HashSet<i64>,
    ) -> Result<Vec<Question>>;

    /// Case-insensitive substring match on the question text.
    fn search(&self, term: &str) -> Result<Vec<Question>>;

    fn insert(&self, question: NewQuestion) -> Result<Question>;

    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when no
    /// question has this id.
    fn delete_by_id(&self, id: i64) -> Result<()>;

    fn count(&self) -> Result<usize>;
}

/// Lowercase a search term once so it can be matched against many questions.
pub(crate) fn search_needle(term: &str) -> String {
    term.to_lowercase()
}

/// Unicode-aware, case-insensitive substring test shared by every store.
pub(crate) fn matches_needle(question: &Question, needle: &str) -> bool {
    question.question.to_lowercase().contains(needle)
}
