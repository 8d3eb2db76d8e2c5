//! Random quiz question selection.

use std::collections::HashSet;

use rand::Rng;

use crate::catalog::CategoryCatalog;
use crate::error::{Error, Result};
use crate::models::Question;
use crate::store::QuestionStore;

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    AllQuestions,
    Category(i64),
}

/// Pick one question uniformly at random from the scope, skipping every id
/// in `excluded`.
pub fn next_question<S, R>(
    store: &S,
    catalog: &CategoryCatalog,
    scope: QuizScope,
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> Result<Question>
where
    S: QuestionStore + ?Sized,
    R: Rng + ?Sized,
{
    let pool = match scope {
        QuizScope::AllQuestions => store.list_excluding(excluded)?,
        QuizScope::Category(id) => {
            if !catalog.contains(id) {
                return Err(Error::InvalidCategory(id));
            }
            store.list_by_category_excluding(id, excluded)?
        }
    };

    choose_from(pool, rng)
}

fn choose_from<R: Rng + ?Sized>(mut pool: Vec<Question>, rng: &mut R) -> Result<Question> {
    if pool.is_empty() {
        return Err(Error::Exhausted);
    }

    let index = rng.gen_range(0..pool.len());
    Ok(pool.swap_remove(index))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::builtin_seed;
    use crate::store::MemoryStore;

    fn fixture() -> (MemoryStore, CategoryCatalog) {
        let store = MemoryStore::new(builtin_seed().unwrap());
        let catalog = CategoryCatalog::new(store.categories().unwrap());
        (store, catalog)
    }

    #[test]
    fn test_category_scope() {
        let (store, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let q = next_question(
                &store,
                &catalog,
                QuizScope::Category(6),
                &HashSet::new(),
                &mut rng,
            )
            .unwrap();
            assert_eq!(q.category, 6);
        }
    }

    #[test]
    fn test_exhausted_category() {
        let (store, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(1);
        let seen: HashSet<i64> = store
            .list_by_category(3)
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();

        let result = next_question(&store, &catalog, QuizScope::Category(3), &seen, &mut rng);
        assert!(matches!(result, Err(Error::Exhausted)));
    }

    #[test]
    fn test_unknown_category() {
        let (store, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(1);
        let result = next_question(
            &store,
            &catalog,
            QuizScope::Category(0),
            &HashSet::new(),
            &mut rng,
        );
        assert!(matches!(result, Err(Error::InvalidCategory(0))));
    }

    #[test]
    fn test_all_scope_never_repeats() {
        let (store, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();

        for _ in 0..19 {
            let q = next_question(&store, &catalog, QuizScope::AllQuestions, &seen, &mut rng)
                .unwrap();
            assert!(seen.insert(q.id), "question {} repeated", q.id);
        }

        let result = next_question(&store, &catalog, QuizScope::AllQuestions, &seen, &mut rng);
        assert!(matches!(result, Err(Error::Exhausted)));
    }

    #[test]
    fn test_draws_cover_pool() {
        let (store, catalog) = fixture();
        let mut rng = StdRng::seed_from_u64(3);
        let mut hits: HashMap<i64, usize> = HashMap::new();

        for _ in 0..600 {
            let q = next_question(
                &store,
                &catalog,
                QuizScope::Category(2),
                &HashSet::new(),
                &mut rng,
            )
            .unwrap();
            *hits.entry(q.id).or_default() += 1;
        }

        // Four art questions, 150 expected draws each.
        assert_eq!(hits.len(), 4);
        assert!(hits.values().all(|&n| n > 90 && n < 210));
    }

    #[test]
    fn test_empty_pool_is_checked_before_drawing() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(choose_from(Vec::new(), &mut rng), Err(Error::Exhausted)));
    }
}
