//! # trivia
//!
//! A trivia question service: categories, paginated listings, search,
//! question creation and deletion, and random quiz selection that never
//! repeats a question the player has already seen.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trivia::{builtin_seed, MemoryStore, QuizCategory, TriviaService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new(builtin_seed()?);
//!     let service = TriviaService::new(Box::new(store))?;
//!
//!     let page = service.get_questions(1)?;
//!     println!("{} questions in total", page.total_questions);
//!
//!     let next = service.next_quiz_question(&[], &QuizCategory::all())?;
//!     println!("{}", next.question.question);
//!
//!     Ok(())
//! }
//! ```
//!
//! The `server` module serves the same operations over WebSocket, and the
//! `client` module is a terminal quiz that plays against it.

pub mod catalog;
pub mod client;
pub mod config;
mod data;
mod error;
mod models;
pub mod pagination;
pub mod protocol;
pub mod selector;
pub mod server;
pub mod service;
pub mod store;
pub mod terminal;
pub mod validation;

pub use catalog::CategoryCatalog;
pub use config::{ConfigError, ServerConfig};
pub use data::{builtin_seed, load_seed_from_json, LoadError, Seed};
pub use error::{Error, Result};
pub use models::{Category, NewQuestion, Question};
pub use selector::QuizScope;
pub use service::{QuizCategory, SearchOutcome, TriviaService};
pub use store::{MemoryStore, QuestionStore, SqliteStore};
pub use validation::QuestionDraft;
