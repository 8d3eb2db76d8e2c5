//! Request dispatcher.
//!
//! Maps each client request onto one service operation and turns the outcome
//! into a response body.

use tracing::{debug, error};

use crate::error::Error;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::service::TriviaService;

/// Page served when a listing request names none.
const FIRST_PAGE: usize = 1;

/// Execute one request against the service.
pub fn dispatch(service: &TriviaService, request: ClientMessage) -> ServerMessage {
    let result = match request {
        ClientMessage::GetCategories => Ok(ServerMessage::Categories(service.get_categories())),
        ClientMessage::GetQuestions { page } => service
            .get_questions(page.unwrap_or(FIRST_PAGE))
            .map(ServerMessage::Questions),
        ClientMessage::GetQuestionsByCategory { category_id } => service
            .get_questions_by_category(category_id)
            .map(ServerMessage::CategoryQuestions),
        ClientMessage::CreateQuestion(draft) => {
            service.create_question(draft).map(ServerMessage::Created)
        }
        ClientMessage::SearchQuestions { search_term } => service
            .search_questions(search_term)
            .map(ServerMessage::from),
        ClientMessage::DeleteQuestion { id } => {
            service.delete_question(id).map(ServerMessage::Deleted)
        }
        ClientMessage::NextQuizQuestion {
            previous_questions,
            quiz_category,
        } => service
            .next_quiz_question(&previous_questions, &quiz_category)
            .map(ServerMessage::QuizQuestion),
    };

    result.unwrap_or_else(|err| {
        log_failure(&err);
        ServerMessage::from(&err)
    })
}

fn log_failure(err: &Error) {
    match err {
        Error::Store(detail) => error!("Store failure: {}", detail),
        other => debug!("Request failed: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_seed;
    use crate::service::QuizCategory;
    use crate::store::MemoryStore;
    use crate::validation::QuestionDraft;

    fn service() -> TriviaService {
        TriviaService::new(Box::new(MemoryStore::new(builtin_seed().unwrap()))).unwrap()
    }

    fn failure_code(msg: ServerMessage) -> u16 {
        match msg {
            ServerMessage::Failure { error, .. } => error,
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_default_page() {
        let ServerMessage::Questions(page) =
            dispatch(&service(), ClientMessage::GetQuestions { page: None })
        else {
            panic!("expected questions");
        };
        assert_eq!(page.questions.len(), 10);
    }

    #[test]
    fn test_error_codes() {
        let service = service();
        assert_eq!(
            failure_code(dispatch(&service, ClientMessage::GetQuestions { page: Some(100) })),
            404
        );
        assert_eq!(
            failure_code(dispatch(&service, ClientMessage::DeleteQuestion { id: 1000 })),
            404
        );
        assert_eq!(
            failure_code(dispatch(
                &service,
                ClientMessage::CreateQuestion(QuestionDraft::default())
            )),
            400
        );
        assert_eq!(
            failure_code(dispatch(
                &service,
                ClientMessage::SearchQuestions {
                    search_term: Some(String::new())
                }
            )),
            400
        );
        assert_eq!(
            failure_code(dispatch(
                &service,
                ClientMessage::NextQuizQuestion {
                    previous_questions: vec![10, 11],
                    quiz_category: QuizCategory {
                        id: 6,
                        kind: "Sports".to_string(),
                    },
                }
            )),
            422
        );
        assert_eq!(
            failure_code(dispatch(
                &service,
                ClientMessage::NextQuizQuestion {
                    previous_questions: vec![],
                    quiz_category: QuizCategory {
                        id: 99,
                        kind: "Unknown".to_string(),
                    },
                }
            )),
            422
        );
    }

    #[test]
    fn test_search_without_matches() {
        let msg = dispatch(
            &service(),
            ClientMessage::SearchQuestions {
                search_term: Some("udacity".to_string()),
            },
        );
        assert!(matches!(msg, ServerMessage::NoMatches { error: 404, .. }));
        assert!(!msg.is_success());
    }
}
