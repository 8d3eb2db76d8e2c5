//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON text frames over WebSocket. Each
//! request frame is answered by exactly one response frame, in order.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::service::{
    CategoryList, CategoryQuestions, Created, Deleted, QuestionPage, QuizCategory, QuizQuestion,
    SearchOutcome, SearchResults,
};
use crate::validation::QuestionDraft;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Every category as an `id -> type` map.
    GetCategories,

    /// One page of questions; the first page when `page` is absent.
    GetQuestions {
        #[serde(default)]
        page: Option<usize>,
    },

    /// All questions in one category.
    GetQuestionsByCategory { category_id: i64 },

    /// Add a question. Fields are validated server-side.
    CreateQuestion(QuestionDraft),

    /// Case-insensitive substring search over question text.
    SearchQuestions {
        #[serde(default)]
        search_term: Option<String>,
    },

    /// Remove a question by id.
    DeleteQuestion { id: i64 },

    /// A random question the client has not seen yet.
    NextQuizQuestion {
        #[serde(default)]
        previous_questions: Vec<i64>,
        quiz_category: QuizCategory,
    },
}

/// Body of a server response; see [`Envelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Categories(CategoryList),

    Questions(QuestionPage),

    CategoryQuestions(CategoryQuestions),

    Created(Created),

    SearchResults(SearchResults),

    /// A search that matched nothing.
    NoMatches {
        error: u16,
        message: String,
        questions: Vec<crate::models::Question>,
        total_questions: usize,
    },

    Deleted(Deleted),

    QuizQuestion(QuizQuestion),

    /// The request failed; no internal detail is included.
    Failure { error: u16, message: String },
}

/// A response frame: `{"success": bool, "type": ..., ...body}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(flatten)]
    pub body: ServerMessage,
}

pub const NO_MATCHES_MESSAGE: &str = "No questions contain this text";

impl ServerMessage {
    pub fn no_matches() -> Self {
        ServerMessage::NoMatches {
            error: 404,
            message: NO_MATCHES_MESSAGE.to_string(),
            questions: Vec::new(),
            total_questions: 0,
        }
    }

    /// A request frame that could not be parsed.
    pub fn bad_request() -> Self {
        ServerMessage::Failure {
            error: 400,
            message: "Bad request".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            ServerMessage::Failure { .. } | ServerMessage::NoMatches { .. }
        )
    }
}

impl From<&Error> for ServerMessage {
    fn from(err: &Error) -> Self {
        ServerMessage::Failure {
            error: err.code(),
            message: err.public_message(),
        }
    }
}

impl From<SearchOutcome> for ServerMessage {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found(results) => ServerMessage::SearchResults(results),
            SearchOutcome::NoMatches => ServerMessage::no_matches(),
        }
    }
}

impl From<ServerMessage> for Envelope {
    fn from(body: ServerMessage) -> Self {
        Envelope {
            success: body.is_success(),
            body,
        }
    }
}
