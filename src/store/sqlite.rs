use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, Row, ToSql};
use tracing::{debug, info};

use crate::data::Seed;
use crate::error::{Error, Result};
use crate::models::{Category, NewQuestion, Question};

use super::{matches_needle, search_needle, QuestionStore};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id   INTEGER PRIMARY KEY,
    type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS questions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    question   TEXT NOT NULL,
    answer     TEXT NOT NULL,
    difficulty INTEGER NOT NULL,
    category   INTEGER NOT NULL REFERENCES categories(id)
);
CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
"#;

const SELECT_QUESTIONS: &str = "SELECT id, question, answer, difficulty, category FROM questions";

/// SQLite-backed question store.
///
/// All statements run on one connection behind a mutex, so a read issued
/// after a write has returned always observes that write.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening question database at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Load `seed` if the database has no categories yet. Returns whether
    /// anything was written.
    pub fn seed_if_empty(&self, seed: &Seed) -> Result<bool> {
        let mut conn = self.lock()?;

        let existing: i64 =
            conn.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if existing > 0 {
            debug!("Database already holds {} categories, skipping seed", existing);
            return Ok(false);
        }

        let tx = conn.transaction()?;
        for category in &seed.categories {
            tx.execute(
                "INSERT INTO categories (id, type) VALUES (?1, ?2)",
                params![category.id, category.kind],
            )?;
        }
        for q in &seed.questions {
            tx.execute(
                "INSERT INTO questions (id, question, answer, difficulty, category)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![q.id, q.question, q.answer, q.difficulty, q.category],
            )?;
        }
        tx.commit()?;

        info!(
            "Seeded {} categories and {} questions",
            seed.categories.len(),
            seed.questions.len()
        );
        Ok(true)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Store("connection lock poisoned".to_string()))
    }

    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Question>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, question_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Rows in id order, optionally limited to one category, minus `ids`.
    /// `ids` is filtered in memory and may exceed SQLite's parameter limit.
    fn query_excluding(&self, category: Option<i64>, ids: &HashSet<i64>) -> Result<Vec<Question>> {
        let mut questions = match category {
            Some(category_id) => self.query(
                &format!("{} WHERE category = ?1 ORDER BY id", SELECT_QUESTIONS),
                &[&category_id as &dyn ToSql],
            )?,
            None => self.query(&format!("{} ORDER BY id", SELECT_QUESTIONS), &[])?,
        };
        if !ids.is_empty() {
            questions.retain(|q| !ids.contains(&q.id));
        }
        Ok(questions)
    }
}

fn question_from_row(row: &Row<'_>) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get(0)?,
        question: row.get(1)?,
        answer: row.get(2)?,
        difficulty: row.get(3)?,
        category: row.get(4)?,
    })
}

impl QuestionStore for SqliteStore {
    fn categories(&self) -> Result<Vec<Category>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: row.get(0)?,
                kind: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn list_all(&self) -> Result<Vec<Question>> {
        self.query_excluding(None, &HashSet::new())
    }

    fn list_by_category(&self, category_id: i64) -> Result<Vec<Question>> {
        self.query_excluding(Some(category_id), &HashSet::new())
    }

    fn list_excluding(&self, ids: &HashSet<i64>) -> Result<Vec<Question>> {
        self.query_excluding(None, ids)
    }

    fn list_by_category_excluding(
        &self,
        category_id: i64,
        ids: &HashSet<i64>,
    ) -> Result<Vec<Question>> {
        self.query_excluding(Some(category_id), ids)
    }

    fn search(&self, term: &str) -> Result<Vec<Question>> {
        let needle = search_needle(term);
        let mut questions = self.list_all()?;
        questions.retain(|q| matches_needle(q, &needle));
        Ok(questions)
    }

    fn insert(&self, question: NewQuestion) -> Result<Question> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO questions (question, answer, difficulty, category)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                question.question,
                question.answer,
                question.difficulty,
                question.category
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Inserted question {}", id);
        Ok(question.with_id(id))
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(Error::NotFound);
        }
        debug!("Deleted question {}", id);
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|e| Error::Store(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_seed;

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.seed_if_empty(&builtin_seed().unwrap()).unwrap();
        store
    }

    fn new_question(text: &str) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "42".to_string(),
            difficulty: 5,
            category: 1,
        }
    }

    #[test]
    fn test_seed_once() {
        let store = store();
        assert!(!store.seed_if_empty(&builtin_seed().unwrap()).unwrap());
        assert_eq!(store.count().unwrap(), 19);
        assert_eq!(store.categories().unwrap().len(), 6);
    }

    #[test]
    fn test_filters_match_memory_semantics() {
        let store = store();
        assert_eq!(store.list_by_category(4).unwrap().len(), 4);

        let excluded: HashSet<i64> = [5, 9, 12].into_iter().collect();
        let left = store.list_by_category_excluding(4, &excluded).unwrap();
        assert_eq!(left.iter().map(|q| q.id).collect::<Vec<_>>(), vec![23]);
        assert_eq!(store.list_excluding(&excluded).unwrap().len(), 16);
    }

    #[test]
    fn test_search() {
        let store = store();
        let found = store.search("who").unwrap();
        assert_eq!(
            found.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![5, 12, 21]
        );
        assert!(store.search("udacity").unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let store = store();
        assert!(store.search("%").unwrap().is_empty());
        assert!(store.search("_").unwrap().is_empty());

        store.insert(new_question("Is 100% of the answer here?")).unwrap();
        assert_eq!(store.search("100%").unwrap().len(), 1);
    }

    #[test]
    fn test_search_folds_non_ascii_case() {
        let store = store();
        let created = store.insert(new_question("Qui a écrit ÉMILE ?")).unwrap();
        let found = store.search("émile").unwrap();
        assert_eq!(found, vec![created]);
    }

    #[test]
    fn test_exclusions_beyond_parameter_limit() {
        let store = store();
        let excluded: HashSet<i64> = (1000..41000).chain([2, 4]).collect();
        let left = store.list_excluding(&excluded).unwrap();
        assert_eq!(left.len(), 17);
        assert!(left.iter().all(|q| !excluded.contains(&q.id)));
        assert_eq!(store.list_by_category_excluding(1, &excluded).unwrap().len(), 3);
    }

    #[test]
    fn test_insert_and_delete() {
        let store = store();
        let created = store.insert(new_question("What is six times seven?")).unwrap();
        assert!(created.id > 23);
        assert_eq!(store.count().unwrap(), 20);

        store.delete_by_id(created.id).unwrap();
        assert_eq!(store.count().unwrap(), 19);
        assert!(matches!(store.delete_by_id(created.id), Err(Error::NotFound)));
    }

    #[test]
    fn test_unknown_category_is_a_store_error() {
        let store = store();
        let mut question = new_question("Orphan?");
        question.category = 99;
        assert!(matches!(store.insert(question), Err(Error::Store(_))));
    }

    #[test]
    fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.db");

        let created = {
            let store = SqliteStore::open(&path).unwrap();
            store.seed_if_empty(&builtin_seed().unwrap()).unwrap();
            store.insert(new_question("Persisted?")).unwrap()
        };

        let reopened = SqliteStore::open(&path).unwrap();
        assert!(!reopened.seed_if_empty(&builtin_seed().unwrap()).unwrap());
        let all = reopened.list_all().unwrap();
        assert_eq!(all.last(), Some(&created));
    }
}
