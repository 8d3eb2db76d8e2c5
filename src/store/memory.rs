use std::collections::{BTreeMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::data::Seed;
use crate::error::{Error, Result};
use crate::models::{Category, NewQuestion, Question};

use super::{matches_needle, search_needle, QuestionStore};

struct Questions {
    by_id: BTreeMap<i64, Question>,
    next_id: i64,
}

/// Question store held entirely in process memory.
pub struct MemoryStore {
    categories: Vec<Category>,
    questions: RwLock<Questions>,
}

impl MemoryStore {
    pub fn new(seed: Seed) -> Self {
        let mut categories = seed.categories;
        categories.sort_by_key(|c| c.id);

        let by_id: BTreeMap<i64, Question> =
            seed.questions.into_iter().map(|q| (q.id, q)).collect();
        let next_id = by_id.keys().next_back().map_or(1, |id| id + 1);

        Self {
            categories,
            questions: RwLock::new(Questions { by_id, next_id }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Questions>> {
        self.questions
            .read()
            .map_err(|_| Error::Store("question lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Questions>> {
        self.questions
            .write()
            .map_err(|_| Error::Store("question lock poisoned".to_string()))
    }

    fn filtered<F>(&self, keep: F) -> Result<Vec<Question>>
    where
        F: Fn(&Question) -> bool,
    {
        Ok(self
            .read()?
            .by_id
            .values()
            .filter(|&q| keep(q))
            .cloned()
            .collect())
    }
}

impl QuestionStore for MemoryStore {
    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn list_all(&self) -> Result<Vec<Question>> {
        self.filtered(|_| true)
    }

    fn list_by_category(&self, category_id: i64) -> Result<Vec<Question>> {
        self.filtered(|q| q.category == category_id)
    }

    fn list_excluding(&self, ids: &HashSet<i64>) -> Result<Vec<Question>> {
        self.filtered(|q| !ids.contains(&q.id))
    }

    fn list_by_category_excluding(
        &self,
        category_id: i64,
        ids: &HashSet<i64>,
    ) -> Result<Vec<Question>> {
        self.filtered(|q| q.category == category_id && !ids.contains(&q.id))
    }

    fn search(&self, term: &str) -> Result<Vec<Question>> {
        let needle = search_needle(term);
        self.filtered(|q| matches_needle(q, &needle))
    }

    fn insert(&self, question: NewQuestion) -> Result<Question> {
        let mut questions = self.write()?;
        let id = questions.next_id;
        questions.next_id += 1;

        let created = question.with_id(id);
        questions.by_id.insert(id, created.clone());
        Ok(created)
    }

    fn delete_by_id(&self, id: i64) -> Result<()> {
        self.write()?
            .by_id
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::NotFound)
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.by_id.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_seed;

    fn store() -> MemoryStore {
        MemoryStore::new(builtin_seed().unwrap())
    }

    fn new_question(category: i64) -> NewQuestion {
        NewQuestion {
            question: "Which planet is known as the Red Planet?".to_string(),
            answer: "Mars".to_string(),
            difficulty: 1,
            category,
        }
    }

    #[test]
    fn test_listing_is_id_ordered() {
        let all = store().list_all().unwrap();
        assert_eq!(all.len(), 19);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_filters() {
        let store = store();
        assert_eq!(store.list_by_category(1).unwrap().len(), 3);
        assert!(store.list_by_category(99).unwrap().is_empty());

        let excluded: HashSet<i64> = [20, 21].into_iter().collect();
        assert_eq!(store.list_excluding(&excluded).unwrap().len(), 17);
        let left = store.list_by_category_excluding(1, &excluded).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, 22);
    }

    #[test]
    fn test_search_ignores_case() {
        let store = store();
        assert_eq!(store.search("WHO").unwrap().len(), 3);
        assert!(store.search("udacity").unwrap().is_empty());
    }

    #[test]
    fn test_insert_assigns_ids_past_seed() {
        let store = store();
        let first = store.insert(new_question(1)).unwrap();
        let second = store.insert(new_question(1)).unwrap();
        assert_eq!(first.id, 24);
        assert_eq!(second.id, 25);
        assert_eq!(store.count().unwrap(), 21);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = store();
        let created = store.insert(new_question(2)).unwrap();
        store.delete_by_id(created.id).unwrap();
        let again = store.insert(new_question(2)).unwrap();
        assert_ne!(created.id, again.id);
    }

    #[test]
    fn test_delete_missing() {
        assert!(matches!(store().delete_by_id(1), Err(Error::NotFound)));
    }

    #[test]
    fn test_empty_seed() {
        let store = MemoryStore::new(Seed {
            categories: vec![],
            questions: vec![],
        });
        assert_eq!(store.insert(new_question(1)).unwrap().id, 1);
    }
}
