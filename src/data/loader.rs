use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Category, Question};
use crate::validation::{MAX_DIFFICULTY, MIN_DIFFICULTY};

const BUILTIN_SEED: &str = include_str!("../../data/trivia.json");

/// Categories and questions an empty store is initialised with.
#[derive(Debug, Clone, Deserialize)]
pub struct Seed {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid seed data: {0}")]
    Invalid(String),
}

/// The reference deployment's six categories and nineteen questions.
pub fn builtin_seed() -> Result<Seed, LoadError> {
    parse_seed(BUILTIN_SEED)
}

pub fn load_seed_from_json<P: AsRef<Path>>(path: P) -> Result<Seed, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_seed(&json_content)
}

fn parse_seed(json_content: &str) -> Result<Seed, LoadError> {
    let seed: Seed = serde_json::from_str(json_content)?;

    if seed.categories.is_empty() {
        return Err(LoadError::Invalid(
            "seed must contain at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = seed.categories.iter().find(|c| !seen.insert(c.id)) {
        return Err(LoadError::Invalid(format!("duplicate category id {}", dup.id)));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = seed.questions.iter().find(|q| !seen.insert(q.id)) {
        return Err(LoadError::Invalid(format!("duplicate question id {}", dup.id)));
    }

    let category_ids: HashSet<i64> = seed.categories.iter().map(|c| c.id).collect();
    if let Some(orphan) = seed
        .questions
        .iter()
        .find(|q| !category_ids.contains(&q.category))
    {
        return Err(LoadError::Invalid(format!(
            "question {} references unknown category {}",
            orphan.id, orphan.category
        )));
    }

    if let Some(q) = seed
        .questions
        .iter()
        .find(|q| !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&q.difficulty))
    {
        return Err(LoadError::Invalid(format!(
            "question {} has difficulty {} outside {}..={}",
            q.id, q.difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY
        )));
    }

    Ok(seed)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_seed() {
        let seed = builtin_seed().unwrap();
        assert_eq!(seed.categories.len(), 6);
        assert_eq!(seed.questions.len(), 19);
        assert_eq!(seed.categories[0].kind, "Science");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"categories":[{{"id":1,"type":"Music"}}],"questions":[]}}"#
        )
        .unwrap();

        let seed = load_seed_from_json(file.path()).unwrap();
        assert_eq!(seed.categories[0].kind, "Music");
        assert!(seed.questions.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_seed_from_json("/nonexistent/trivia.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_rejects_bad_seeds() {
        assert!(matches!(
            parse_seed(r#"{"categories":[]}"#),
            Err(LoadError::Invalid(_))
        ));
        assert!(matches!(
            parse_seed(r#"{"categories":[{"id":1,"type":"A"},{"id":1,"type":"B"}]}"#),
            Err(LoadError::Invalid(_))
        ));
        assert!(matches!(parse_seed("not json"), Err(LoadError::Parse(_))));
    }

    fn seed_with_question(difficulty: i64, category: i64) -> String {
        format!(
            r#"{{"categories":[{{"id":1,"type":"Science"}}],"questions":[{{"id":1,"question":"Q","answer":"A","difficulty":{},"category":{}}}]}}"#,
            difficulty, category
        )
    }

    #[test]
    fn test_questions_must_fit_the_seed() {
        assert!(parse_seed(&seed_with_question(3, 1)).is_ok());

        let err = parse_seed(&seed_with_question(3, 2)).unwrap_err();
        assert!(err.to_string().contains("unknown category 2"));

        for difficulty in [0, 6] {
            assert!(matches!(
                parse_seed(&seed_with_question(difficulty, 1)),
                Err(LoadError::Invalid(_))
            ));
        }
    }
}
