//! Client state management.

use std::collections::BTreeMap;

use crate::models::{Category, Question};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::service::QuizCategory;

/// Questions per round when none is configured.
pub const DEFAULT_ROUNDS: usize = 5;

/// Label of the "every category" choice.
pub const ALL_LABEL: &str = "All";

/// Current state of the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientState {
    /// Connecting to server and fetching categories.
    Connecting,

    /// Choosing which category to play.
    CategorySelect { selected: usize },

    /// Playing a round.
    Quiz {
        category: QuizCategory,
        question: Option<Question>,
        revealed: bool,
    },

    /// Round finished.
    Results { exhausted: bool },

    /// Disconnected from server.
    Disconnected { message: String },
}

/// Client application state.
pub struct ClientApp {
    /// Current state.
    pub state: ClientState,
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Whether the client should quit.
    pub should_quit: bool,
    categories: Vec<Category>,
    rounds: usize,
    previous_questions: Vec<i64>,
    score: usize,
}

impl ClientApp {
    pub fn new(host: String, port: u16, rounds: usize) -> Self {
        Self {
            state: ClientState::Connecting,
            host,
            port,
            should_quit: false,
            categories: Vec::new(),
            rounds: rounds.max(1),
            previous_questions: Vec::new(),
            score: 0,
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request sent right after connecting.
    pub fn initial_request() -> ClientMessage {
        ClientMessage::GetCategories
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Questions answered so far in this round.
    pub fn answered(&self) -> usize {
        self.previous_questions.len()
    }

    /// Choices offered on the category screen: "All" first, then the catalog.
    pub fn choice_labels(&self) -> Vec<&str> {
        std::iter::once(ALL_LABEL)
            .chain(self.categories.iter().map(|c| c.kind.as_str()))
            .collect()
    }

    /// Apply a server response. Returns a follow-up request, if any.
    pub fn handle_server_message(&mut self, msg: ServerMessage) -> Option<ClientMessage> {
        match msg {
            ServerMessage::Categories(list) => {
                self.set_categories(list.categories);
                None
            }
            ServerMessage::QuizQuestion(quiz) => {
                if let ClientState::Quiz {
                    question, revealed, ..
                } = &mut self.state
                {
                    *question = Some(quiz.question);
                    *revealed = false;
                }
                None
            }
            ServerMessage::Failure { error: 422, .. }
                if matches!(self.state, ClientState::Quiz { .. }) =>
            {
                self.state = ClientState::Results { exhausted: true };
                None
            }
            ServerMessage::Failure { error, message } => {
                self.disconnect(format!("Server error {}: {}", error, message));
                None
            }
            _ => None,
        }
    }

    fn set_categories(&mut self, map: BTreeMap<i64, String>) {
        self.categories = map
            .into_iter()
            .map(|(id, kind)| Category { id, kind })
            .collect();
        self.state = ClientState::CategorySelect { selected: 0 };
    }

    pub fn select_next(&mut self) {
        let count = self.categories.len() + 1;
        if let ClientState::CategorySelect { selected } = &mut self.state {
            *selected = (*selected + 1) % count;
        }
    }

    pub fn select_previous(&mut self) {
        let count = self.categories.len() + 1;
        if let ClientState::CategorySelect { selected } = &mut self.state {
            *selected = (*selected + count - 1) % count;
        }
    }

    /// Start a round in the highlighted category and request its first question.
    pub fn start_quiz(&mut self) -> Option<ClientMessage> {
        let ClientState::CategorySelect { selected } = self.state else {
            return None;
        };

        let category = match selected {
            0 => QuizCategory::all(),
            n => {
                let chosen = self.categories.get(n - 1)?;
                QuizCategory {
                    id: chosen.id,
                    kind: chosen.kind.clone(),
                }
            }
        };

        self.previous_questions.clear();
        self.score = 0;
        self.state = ClientState::Quiz {
            category,
            question: None,
            revealed: false,
        };
        self.next_question_request()
    }

    pub fn reveal_answer(&mut self) {
        if let ClientState::Quiz {
            question: Some(_),
            revealed,
            ..
        } = &mut self.state
        {
            *revealed = true;
        }
    }

    /// Record a self-marked answer and move on. Only valid once revealed.
    pub fn mark_answer(&mut self, correct: bool) -> Option<ClientMessage> {
        let ClientState::Quiz {
            question: Some(question),
            revealed: true,
            ..
        } = &self.state
        else {
            return None;
        };

        self.previous_questions.push(question.id);
        if correct {
            self.score += 1;
        }

        if self.previous_questions.len() >= self.rounds {
            self.state = ClientState::Results { exhausted: false };
            return None;
        }

        if let ClientState::Quiz {
            question, revealed, ..
        } = &mut self.state
        {
            *question = None;
            *revealed = false;
        }
        self.next_question_request()
    }

    fn next_question_request(&self) -> Option<ClientMessage> {
        let ClientState::Quiz { category, .. } = &self.state else {
            return None;
        };
        Some(ClientMessage::NextQuizQuestion {
            previous_questions: self.previous_questions.clone(),
            quiz_category: category.clone(),
        })
    }

    /// Back to the category screen after a round.
    pub fn restart(&mut self) {
        if matches!(self.state, ClientState::Results { .. }) {
            self.state = ClientState::CategorySelect { selected: 0 };
        }
    }

    pub fn disconnect(&mut self, message: String) {
        self.state = ClientState::Disconnected { message };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{CategoryList, QuizQuestion};

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("Question {}?", id),
            answer: "Answer".to_string(),
            difficulty: 1,
            category: 1,
        }
    }

    fn connected_app(rounds: usize) -> ClientApp {
        let mut app = ClientApp::new("localhost".to_string(), 8712, rounds);
        let categories = [(1, "Science".to_string()), (2, "Art".to_string())]
            .into_iter()
            .collect();
        app.handle_server_message(ServerMessage::Categories(CategoryList { categories }));
        app
    }

    fn deliver(app: &mut ClientApp, id: i64) {
        app.handle_server_message(ServerMessage::QuizQuestion(QuizQuestion {
            question: question(id),
        }));
    }

    #[test]
    fn test_category_selection_wraps() {
        let mut app = connected_app(5);
        assert_eq!(app.choice_labels(), vec!["All", "Science", "Art"]);
        app.select_previous();
        assert_eq!(app.state, ClientState::CategorySelect { selected: 2 });
        app.select_next();
        assert_eq!(app.state, ClientState::CategorySelect { selected: 0 });
    }

    #[test]
    fn test_round_sends_growing_exclusions() {
        let mut app = connected_app(2);
        app.select_next();
        let first = app.start_quiz().unwrap();
        assert_eq!(
            first,
            ClientMessage::NextQuizQuestion {
                previous_questions: vec![],
                quiz_category: QuizCategory {
                    id: 1,
                    kind: "Science".to_string(),
                },
            }
        );

        deliver(&mut app, 20);
        assert!(app.mark_answer(true).is_none(), "must reveal first");
        app.reveal_answer();
        let ClientMessage::NextQuizQuestion {
            previous_questions, ..
        } = app.mark_answer(true).unwrap()
        else {
            panic!("expected next question request");
        };
        assert_eq!(previous_questions, vec![20]);

        deliver(&mut app, 21);
        app.reveal_answer();
        assert!(app.mark_answer(false).is_none());
        assert_eq!(app.state, ClientState::Results { exhausted: false });
        assert_eq!((app.score(), app.answered()), (1, 2));
    }

    #[test]
    fn test_exhausted_pool_ends_round() {
        let mut app = connected_app(5);
        app.start_quiz();
        app.handle_server_message(ServerMessage::Failure {
            error: 422,
            message: "Content unprocessable".to_string(),
        });
        assert_eq!(app.state, ClientState::Results { exhausted: true });

        app.restart();
        assert_eq!(app.state, ClientState::CategorySelect { selected: 0 });
    }

    #[test]
    fn test_other_failures_disconnect() {
        let mut app = connected_app(5);
        app.handle_server_message(ServerMessage::Failure {
            error: 500,
            message: "Internal server error".to_string(),
        });
        assert!(matches!(app.state, ClientState::Disconnected { .. }));
    }
}
