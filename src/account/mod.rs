pub mod firebase;

pub use firebase::FirebaseClient;

use crate::db::user::{clear_current_user, save_current_user};
use crate::error::{QuizError, Result};
use crate::logger;
use crate::models::{AppContext, UserIdentity};
use async_trait::async_trait;
use rusqlite::Connection;

/// Tokens returned by the auth provider after sign-up or sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub uid: String,
    pub email: String,
    pub id_token: String,
}

/// Hosted auth plus the `users/{uid}` document.
#[async_trait]
pub trait AccountBackend: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn write_profile(&self, session: &AuthSession, username: &str) -> Result<()>;
    async fn read_username(&self, session: &AuthSession) -> Result<Option<String>>;
}

pub async fn create_account(
    backend: &dyn AccountBackend,
    email: &str,
    password: &str,
    username: &str,
) -> Result<UserIdentity> {
    let username = username.trim();
    if username.is_empty() {
        return Err(QuizError::Auth("Username is required".to_string()));
    }

    let session = backend.sign_up(email.trim(), password).await?;
    backend.write_profile(&session, username).await?;
    logger::log(&format!("Created account {}", session.uid));

    Ok(UserIdentity {
        uid: session.uid,
        email: session.email,
        username: Some(username.to_string()),
        id_token: session.id_token,
    })
}

pub async fn sign_in(
    backend: &dyn AccountBackend,
    email: &str,
    password: &str,
) -> Result<UserIdentity> {
    let session = backend.sign_in(email.trim(), password).await?;
    let username = match backend.read_username(&session).await {
        Ok(name) => name,
        Err(e) => {
            logger::log(&format!("Could not read profile for {}: {}", session.uid, e));
            None
        }
    };
    logger::log(&format!("Signed in {}", session.uid));

    Ok(UserIdentity {
        uid: session.uid,
        email: session.email,
        username,
        id_token: session.id_token,
    })
}

/// Records a signed-in identity locally and in the app context.
pub fn remember_user(conn: &Connection, ctx: &mut AppContext, user: UserIdentity) {
    if let Err(e) = save_current_user(conn, &user) {
        logger::log(&format!("Failed to persist signed-in user: {}", e));
    }
    ctx.user = Some(user);
}

/// Sign-out only forgets the local identity.
pub fn sign_out(conn: &Connection, ctx: &mut AppContext) -> Result<()> {
    if let Some(user) = ctx.user.take() {
        logger::log(&format!("Signed out {}", user.uid));
    }
    clear_current_user(conn)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAccounts {
        pub fail_with: Option<String>,
        pub username: Option<String>,
        pub profiles: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AccountBackend for MockAccounts {
        async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthSession> {
            self.sign_in(email, _password).await
        }

        async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession> {
            match &self.fail_with {
                Some(msg) => Err(QuizError::Auth(msg.clone())),
                None => Ok(AuthSession {
                    uid: "uid-1".to_string(),
                    email: email.to_string(),
                    id_token: "token".to_string(),
                }),
            }
        }

        async fn write_profile(&self, session: &AuthSession, username: &str) -> Result<()> {
            self.profiles
                .lock()
                .unwrap()
                .push((session.uid.clone(), username.to_string()));
            Ok(())
        }

        async fn read_username(&self, _session: &AuthSession) -> Result<Option<String>> {
            Ok(self.username.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockAccounts;
    use super::*;
    use crate::db::test_connection;
    use crate::db::user::load_current_user;

    #[tokio::test]
    async fn test_create_account_writes_profile() {
        let backend = MockAccounts::default();
        let user = create_account(&backend, " a@b.c ", "secret", "ann").await.unwrap();

        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.username.as_deref(), Some("ann"));
        assert_eq!(
            backend.profiles.lock().unwrap().as_slice(),
            &[("uid-1".to_string(), "ann".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_account_requires_username() {
        let backend = MockAccounts::default();
        let err = create_account(&backend, "a@b.c", "secret", "  ").await.unwrap_err();
        assert_eq!(err.to_string(), "Username is required");
        assert!(backend.profiles.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_error_is_verbatim() {
        let backend = MockAccounts {
            fail_with: Some("INVALID_LOGIN_CREDENTIALS".to_string()),
            ..Default::default()
        };
        let err = sign_in(&backend, "a@b.c", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "INVALID_LOGIN_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_sign_in_reads_username() {
        let backend = MockAccounts {
            username: Some("ann".to_string()),
            ..Default::default()
        };
        let user = sign_in(&backend, "a@b.c", "pw").await.unwrap();
        assert_eq!(user.display_name(), "ann");
    }

    #[test]
    fn test_remember_and_sign_out() {
        let (_dir, conn) = test_connection();
        let mut ctx = AppContext::default();
        let user = UserIdentity {
            uid: "u".to_string(),
            email: "e@x.y".to_string(),
            username: None,
            id_token: "t".to_string(),
        };

        remember_user(&conn, &mut ctx, user.clone());
        assert_eq!(ctx.user.as_ref(), Some(&user));
        assert_eq!(load_current_user(&conn), Some(user));

        sign_out(&conn, &mut ctx).unwrap();
        assert!(ctx.user.is_none());
        assert!(load_current_user(&conn).is_none());
    }
}
