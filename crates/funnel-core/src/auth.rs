//! Registration collaborator.
//!
//! The funnel only decides *when* a registration may be submitted; request
//! validation and dispatch live behind `RegistrationClient`.

use crate::language::Level;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

pub const OAUTH_PROVIDERS: &[&str] = &["google", "apple", "facebook"];

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub native_language: String,
    pub target_language: String,
    pub level: Level,
}

/// Language context carried through an OAuth redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthRequest {
    pub provider: String,
    pub native_language: String,
    pub target_language: String,
    pub level: Level,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupOutcome {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("please enter a valid email address")]
    InvalidEmail,
    #[error("unsupported sign-in provider: {0}")]
    UnknownProvider(String),
    #[error("registration request failed: {0}")]
    Network(String),
    #[error("registration rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

pub trait RegistrationClient {
    fn signup_with_email(&self, request: &SignupRequest) -> Result<SignupOutcome, RegistrationError>;
    fn oauth_redirect_url(&self, request: &OAuthRequest) -> Result<String, RegistrationError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// JSON-over-HTTP client for the registration backend.
#[derive(Debug, Clone)]
pub struct HttpRegistrationClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRegistrationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistrationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RegistrationError::Network(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RegistrationError> {
        Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))
            .map_err(|err| RegistrationError::Network(format!("invalid endpoint: {err}")))
    }
}

impl RegistrationClient for HttpRegistrationClient {
    fn signup_with_email(&self, request: &SignupRequest) -> Result<SignupOutcome, RegistrationError> {
        if !is_valid_email(&request.email) {
            return Err(RegistrationError::InvalidEmail);
        }
        let url = self.endpoint("auth/signup")?;
        debug!(%url, target = %request.target_language, level = %request.level, "Dispatching signup");
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .map_err(|err| RegistrationError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message.or(body.error))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            warn!(status = status.as_u16(), %message, "Signup rejected");
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let outcome: SignupOutcome = response
            .json()
            .map_err(|err| RegistrationError::Network(format!("invalid response: {err}")))?;
        if !outcome.success {
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
                message: "signup was not accepted".to_string(),
            });
        }
        Ok(outcome)
    }

    fn oauth_redirect_url(&self, request: &OAuthRequest) -> Result<String, RegistrationError> {
        build_oauth_url(&self.base_url, request)
    }
}

pub fn build_oauth_url(base_url: &str, request: &OAuthRequest) -> Result<String, RegistrationError> {
    let provider = request.provider.to_ascii_lowercase();
    if !OAUTH_PROVIDERS.contains(&provider.as_str()) {
        return Err(RegistrationError::UnknownProvider(request.provider.clone()));
    }
    let mut url = Url::parse(&format!(
        "{}/auth/{provider}",
        base_url.trim_end_matches('/')
    ))
    .map_err(|err| RegistrationError::Network(format!("invalid endpoint: {err}")))?;
    url.query_pairs_mut()
        .append_pair("native", &request.native_language)
        .append_pair("target", &request.target_language)
        .append_pair("level", request.level.as_str());
    Ok(url.to_string())
}
