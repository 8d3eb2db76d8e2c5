//! Input checks applied before a question reaches the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::CategoryCatalog;
use crate::error::{Error, Result};
use crate::models::NewQuestion;

pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;

/// Unvalidated question creation input. Every field may be absent or of
/// the wrong JSON type; [`validate_question`] reports either as a failure on
/// that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub question: Option<Value>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub difficulty: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
}

/// Check a draft field by field, in declaration order, and produce the
/// record to insert. The category bound is the live catalog size.
pub fn validate_question(draft: QuestionDraft, catalog: &CategoryCatalog) -> Result<NewQuestion> {
    let question = required_text(draft.question, "question")?;
    let answer = required_text(draft.answer, "answer")?;
    let difficulty = bounded_int(
        draft.difficulty.as_ref(),
        MIN_DIFFICULTY,
        MAX_DIFFICULTY,
        "difficulty",
    )?;
    let category_count = i64::try_from(catalog.count()).unwrap_or(i64::MAX);
    let category = bounded_int(draft.category.as_ref(), 1, category_count, "category")?;

    Ok(NewQuestion {
        question,
        answer,
        difficulty,
        category,
    })
}

/// An absent search term counts as empty, and empty terms are rejected.
pub fn validate_search_term(term: Option<String>) -> Result<String> {
    let term = term.unwrap_or_default();
    if term.is_empty() {
        return Err(Error::Validation("searchTerm"));
    }
    Ok(term)
}

fn required_text(value: Option<Value>, field: &'static str) -> Result<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::Validation(field)),
    }
}

/// Integers arrive as JSON numbers or numeric strings. Fractions, booleans
/// and anything else fail on `field`.
fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn bounded_int(value: Option<&Value>, min: i64, max: i64, field: &'static str) -> Result<i64> {
    value
        .and_then(as_int)
        .filter(|n| (min..=max).contains(n))
        .ok_or(Error::Validation(field))
}
