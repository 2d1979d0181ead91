use crate::account::{self, AccountBackend};
use crate::error::{QuizError, Result};
use crate::logger;
use crate::models::{NetRequest, NetResponse};
use crate::trivia::TriviaSource;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to load questions. Please try again.";

pub async fn handle_request(
    trivia: &dyn TriviaSource,
    accounts: Option<&dyn AccountBackend>,
    request: NetRequest,
) -> NetResponse {
    match request {
        NetRequest::FetchQuestions {
            request_id,
            amount,
            category_id,
            difficulty,
        } => match trivia.fetch_questions(amount, category_id, difficulty).await {
            Ok(questions) if !questions.is_empty() => NetResponse::Questions {
                request_id,
                questions,
            },
            Ok(_) => NetResponse::FetchFailed {
                request_id,
                error: QuizError::NoQuestions.to_string(),
            },
            Err(e) => {
                logger::log(&format!("Error fetching questions: {}", e));
                NetResponse::FetchFailed {
                    request_id,
                    error: e.to_string(),
                }
            }
        },
        NetRequest::SignUp {
            email,
            password,
            username,
        } => match accounts {
            Some(backend) => {
                auth_response(account::create_account(backend, &email, &password, &username).await)
            }
            None => accounts_disabled(),
        },
        NetRequest::SignIn { email, password } => match accounts {
            Some(backend) => auth_response(account::sign_in(backend, &email, &password).await),
            None => accounts_disabled(),
        },
    }
}

fn auth_response(result: Result<crate::models::UserIdentity>) -> NetResponse {
    match result {
        Ok(user) => NetResponse::SignedIn(user),
        Err(e) => NetResponse::AuthFailed(e.to_string()),
    }
}

fn accounts_disabled() -> NetResponse {
    NetResponse::AuthFailed("Accounts are disabled: set FLASH_QUIZ_FIREBASE_API_KEY".to_string())
}

pub fn spawn_net_worker(
    trivia: Arc<dyn TriviaSource>,
    accounts: Option<Arc<dyn AccountBackend>>,
    net_tx: Sender<NetResponse>,
    net_rx: Receiver<NetRequest>,
) -> Result<thread::JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("flash-quiz::net_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Worker could not start runtime: {}", e));
                    return;
                }
            };

            // Exits once every request sender is dropped
            while let Ok(request) = net_rx.recv() {
                logger::log(&format!("Worker received {:?}", redact(&request)));
                let response =
                    rt.block_on(handle_request(trivia.as_ref(), accounts.as_deref(), request));
                if net_tx.send(response).is_err() {
                    break;
                }
            }
            logger::log("Worker channel disconnected, exiting");
        })?;
    Ok(handle)
}

fn redact(request: &NetRequest) -> NetRequest {
    match request {
        NetRequest::SignUp {
            email, username, ..
        } => NetRequest::SignUp {
            email: email.clone(),
            password: "***".to_string(),
            username: username.clone(),
        },
        NetRequest::SignIn { email, .. } => NetRequest::SignIn {
            email: email.clone(),
            password: "***".to_string(),
        },
        other => other.clone(),
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::models::{Difficulty, TriviaQuestion};
    use async_trait::async_trait;

    pub struct MockTrivia {
        pub questions: Vec<TriviaQuestion>,
        pub fail: bool,
    }

    #[async_trait]
    impl TriviaSource for MockTrivia {
        async fn fetch_questions(
            &self,
            amount: u32,
            _category_id: u32,
            _difficulty: Difficulty,
        ) -> Result<Vec<TriviaQuestion>> {
            if self.fail {
                return Err(QuizError::Worker("connection refused".to_string()));
            }
            Ok(self.questions.iter().take(amount as usize).cloned().collect())
        }
    }

    pub fn question(n: usize) -> TriviaQuestion {
        TriviaQuestion {
            question: format!("Question {}?", n),
            correct_answer: format!("right {}", n),
            incorrect_answers: vec![
                format!("wrong {}a", n),
                format!("wrong {}b", n),
                format!("wrong {}c", n),
            ],
            category: "General Knowledge".to_string(),
            difficulty: Difficulty::Medium,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockTrivia, question};
    use super::*;
    use crate::account::mock::MockAccounts;
    use crate::models::Difficulty;
    use std::time::Duration;

    fn fetch(request_id: u64) -> NetRequest {
        NetRequest::FetchQuestions {
            request_id,
            amount: 2,
            category_id: 9,
            difficulty: Difficulty::Easy,
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let trivia = MockTrivia {
            questions: vec![question(1), question(2), question(3)],
            fail: false,
        };
        match handle_request(&trivia, None, fetch(7)).await {
            NetResponse::Questions {
                request_id,
                questions,
            } => {
                assert_eq!(request_id, 7);
                assert_eq!(questions.len(), 2);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_empty_and_failure() {
        let empty = MockTrivia {
            questions: vec![],
            fail: false,
        };
        assert!(matches!(
            handle_request(&empty, None, fetch(1)).await,
            NetResponse::FetchFailed { request_id: 1, .. }
        ));

        let failing = MockTrivia {
            questions: vec![question(1)],
            fail: true,
        };
        assert!(matches!(
            handle_request(&failing, None, fetch(2)).await,
            NetResponse::FetchFailed { request_id: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_auth_without_backend() {
        let trivia = MockTrivia {
            questions: vec![],
            fail: false,
        };
        let request = NetRequest::SignIn {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
        };
        assert!(matches!(
            handle_request(&trivia, None, request).await,
            NetResponse::AuthFailed(_)
        ));
    }

    #[tokio::test]
    async fn test_auth_with_backend() {
        let trivia = MockTrivia {
            questions: vec![],
            fail: false,
        };
        let accounts = MockAccounts::default();
        let request = NetRequest::SignUp {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
            username: "ann".to_string(),
        };
        match handle_request(&trivia, Some(&accounts), request).await {
            NetResponse::SignedIn(user) => assert_eq!(user.username.as_deref(), Some("ann")),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_worker_thread_round_trip() {
        let trivia: Arc<dyn TriviaSource> = Arc::new(MockTrivia {
            questions: vec![question(1)],
            fail: false,
        });
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (resp_tx, resp_rx) = crossbeam_channel::unbounded();
        let handle = spawn_net_worker(trivia, None, resp_tx, req_rx).unwrap();

        req_tx.send(fetch(3)).unwrap();
        let response = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(response, NetResponse::Questions { request_id: 3, .. }));

        drop(req_tx);
        handle.join().unwrap();
    }

    #[test]
    fn test_redact_hides_passwords() {
        let request = NetRequest::SignIn {
            email: "a@b.c".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", redact(&request)).contains("hunter2"));
    }
}
