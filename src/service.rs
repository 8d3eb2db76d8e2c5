//! The trivia operations.
//!
//! [`TriviaService`] composes the catalog, the store, pagination, selection
//! and validation. Each call is one bounded unit of work; nothing here keeps
//! per-request state between calls.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::catalog::CategoryCatalog;
use crate::error::{Error, Result};
use crate::models::Question;
use crate::pagination::{paginate, QUESTIONS_PER_PAGE};
use crate::selector::{next_question, QuizScope};
use crate::store::QuestionStore;
use crate::validation::{validate_question, validate_search_term, QuestionDraft};

/// Quiz category type that means "every category".
pub const ALL_CATEGORIES: &str = "click";

/// Catalog position reported as the current category of a plain listing.
pub const DEFAULT_CURRENT_CATEGORY: i64 = 1;

// JSON object keys are strings, and buffered (tagged) deserialization will
// not turn them back into integers on its own.
fn category_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<i64, String>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, String>::deserialize(deserializer)?
        .into_iter()
        .map(|(id, kind)| {
            id.parse::<i64>()
                .map(|id| (id, kind))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryList {
    #[serde(deserialize_with = "category_map")]
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
    #[serde(deserialize_with = "category_map")]
    pub categories: BTreeMap<i64, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Created {
    pub created: i64,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

/// Outcome of a search. Zero matches is an answer, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResults),
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: Question,
}

/// The category a quiz is played in, as the client names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl QuizCategory {
    pub fn all() -> Self {
        Self {
            id: 0,
            kind: ALL_CATEGORIES.to_string(),
        }
    }

    pub fn scope(&self) -> QuizScope {
        if self.kind == ALL_CATEGORIES {
            QuizScope::AllQuestions
        } else {
            QuizScope::Category(self.id)
        }
    }
}

pub struct TriviaService {
    store: Box<dyn QuestionStore>,
    catalog: CategoryCatalog,
}

impl TriviaService {
    /// Wrap a store, loading its category catalog once.
    pub fn new(store: Box<dyn QuestionStore>) -> Result<Self> {
        let catalog = CategoryCatalog::new(store.categories()?);
        debug!("Loaded catalog with {} categories", catalog.count());
        Ok(Self { store, catalog })
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &dyn QuestionStore {
        self.store.as_ref()
    }

    pub fn get_categories(&self) -> CategoryList {
        CategoryList {
            categories: self.catalog.as_map(),
        }
    }

    /// One page of all questions. A page with nothing on it does not exist.
    pub fn get_questions(&self, page: usize) -> Result<QuestionPage> {
        let all = self.store.list_all()?;
        let questions = paginate(&all, page, QUESTIONS_PER_PAGE);
        if questions.is_empty() {
            debug!("Page {} is past the last of {} questions", page, all.len());
            return Err(Error::NotFound);
        }

        Ok(QuestionPage {
            questions: questions.to_vec(),
            total_questions: all.len(),
            current_category: self
                .catalog
                .type_for_positional_index(DEFAULT_CURRENT_CATEGORY)?
                .to_string(),
            categories: self.catalog.as_map(),
        })
    }

    /// Every question in a category. The reported current category is
    /// resolved by catalog position, so ids outside `[1, count]` are not found.
    pub fn get_questions_by_category(&self, category_id: i64) -> Result<CategoryQuestions> {
        let questions = self.store.list_by_category(category_id)?;
        if questions.is_empty() {
            return Err(Error::NotFound);
        }

        let current_category = self
            .catalog
            .type_for_positional_index(category_id)
            .map_err(|_| Error::NotFound)?
            .to_string();

        Ok(CategoryQuestions {
            total_questions: questions.len(),
            questions,
            current_category,
        })
    }

    pub fn create_question(&self, draft: QuestionDraft) -> Result<Created> {
        let question = validate_question(draft, &self.catalog)?;
        let created = self.store.insert(question)?;
        debug!("Created question {} in category {}", created.id, created.category);

        Ok(Created {
            created: created.id,
            total_questions: self.store.count()?,
        })
    }

    pub fn search_questions(&self, search_term: Option<String>) -> Result<SearchOutcome> {
        let term = validate_search_term(search_term)?;
        let questions = self.store.search(&term)?;
        debug!("Search for {:?} matched {} questions", term, questions.len());

        if questions.is_empty() {
            return Ok(SearchOutcome::NoMatches);
        }
        Ok(SearchOutcome::Found(SearchResults {
            total_questions: questions.len(),
            questions,
        }))
    }

    pub fn delete_question(&self, id: i64) -> Result<Deleted> {
        self.store.delete_by_id(id)?;
        Ok(Deleted {
            total_questions: self.store.count()?,
        })
    }

    pub fn next_quiz_question(
        &self,
        previous_questions: &[i64],
        quiz_category: &QuizCategory,
    ) -> Result<QuizQuestion> {
        self.next_quiz_question_with_rng(previous_questions, quiz_category, &mut rand::thread_rng())
    }

    pub fn next_quiz_question_with_rng<R: Rng + ?Sized>(
        &self,
        previous_questions: &[i64],
        quiz_category: &QuizCategory,
        rng: &mut R,
    ) -> Result<QuizQuestion> {
        let excluded: HashSet<i64> = previous_questions.iter().copied().collect();
        let question = next_question(
            self.store.as_ref(),
            &self.catalog,
            quiz_category.scope(),
            &excluded,
            rng,
        )?;
        Ok(QuizQuestion { question })
    }
}
