use super::{AccountBackend, AuthSession};
use crate::error::{QuizError, Result};
use crate::logger;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    email: String,
    id_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pulls the provider's message out of an error body, verbatim.
pub fn parse_auth_error(status: u16, body: &str) -> QuizError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => QuizError::Auth(envelope.error.message),
        Err(_) => QuizError::Auth(format!("Authentication failed (HTTP {})", status)),
    }
}

pub fn profile_document(username: &str, email: &str) -> serde_json::Value {
    json!({
        "fields": {
            "username": { "stringValue": username },
            "email": { "stringValue": email }
        }
    })
}

pub fn username_from_document(doc: &serde_json::Value) -> Option<String> {
    doc.get("fields")?
        .get("username")?
        .get("stringValue")?
        .as_str()
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct FirebaseClient {
    http: reqwest::Client,
    api_key: String,
    project_id: Option<String>,
    auth_url: String,
    firestore_url: String,
}

impl FirebaseClient {
    pub fn new(api_key: &str, project_id: Option<&str>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            project_id: project_id.map(str::to_string),
            auth_url: IDENTITY_TOOLKIT_URL.to_string(),
            firestore_url: FIRESTORE_URL.to_string(),
        })
    }

    fn user_doc_url(&self, uid: &str) -> Option<String> {
        self.project_id.as_ref().map(|project| {
            format!(
                "{}/projects/{}/databases/(default)/documents/users/{}",
                self.firestore_url, project, uid
            )
        })
    }

    async fn password_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession> {
        let url = format!("{}/accounts:{}?key={}", self.auth_url, endpoint, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = parse_auth_error(status.as_u16(), &body);
            logger::log(&format!("accounts:{} failed: {}", endpoint, err));
            return Err(err);
        }

        let parsed: PasswordResponse = serde_json::from_str(&body)?;
        Ok(AuthSession {
            uid: parsed.local_id,
            email: parsed.email,
            id_token: parsed.id_token,
        })
    }
}

#[async_trait]
impl AccountBackend for FirebaseClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn write_profile(&self, session: &AuthSession, username: &str) -> Result<()> {
        let Some(url) = self.user_doc_url(&session.uid) else {
            logger::log("No Firestore project configured, skipping profile write");
            return Ok(());
        };

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&session.id_token)
            .json(&profile_document(username, &session.email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_auth_error(status.as_u16(), &body));
        }
        Ok(())
    }

    async fn read_username(&self, session: &AuthSession) -> Result<Option<String>> {
        let Some(url) = self.user_doc_url(&session.uid) else {
            return Ok(None);
        };

        let response = self
            .http
            .get(&url)
            .bearer_auth(&session.id_token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let doc: serde_json::Value = response.error_for_status()?.json().await?;
        Ok(username_from_document(&doc))
    }
}
