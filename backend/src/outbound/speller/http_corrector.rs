//! Reqwest-backed spelling correction adapter.
//!
//! This adapter owns transport details only: the form-encoded request,
//! timeout and HTTP error mapping, JSON decoding, and applying the returned
//! suggestions to the text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::SpellingFindingDto;
use crate::domain::NoteText;
use crate::domain::ports::{SpellingCorrectionError, SpellingCorrector};

/// Public Yandex Speller endpoint.
pub const DEFAULT_SPELLER_URL: &str =
    "https://speller.yandex.net/services/spellservice.json/checkText";

/// Default request timeout for the spelling service.
pub const DEFAULT_SPELLER_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("notes-api/", env!("CARGO_PKG_VERSION"));

/// Spelling corrector that POSTs note text to one HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSpellingCorrector {
    client: Client,
    endpoint: Url,
}

impl HttpSpellingCorrector {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint the adapter calls.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SpellingCorrector for HttpSpellingCorrector {
    async fn correct(&self, text: &NoteText) -> Result<NoteText, SpellingCorrectionError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("text", text.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let findings = parse_findings(body.as_ref())?;
        debug!(findings = findings.len(), "spelling service answered");
        Ok(NoteText::new(apply_suggestions(text.as_str(), &findings)))
    }
}

fn parse_findings(body: &[u8]) -> Result<Vec<SpellingFindingDto>, SpellingCorrectionError> {
    serde_json::from_slice(body).map_err(|error| {
        SpellingCorrectionError::decode(format!("invalid speller JSON payload: {error}"))
    })
}

/// Replace the first occurrence of each flagged word with its first
/// suggestion, in response order. Findings without suggestions are skipped.
fn apply_suggestions(text: &str, findings: &[SpellingFindingDto]) -> String {
    findings
        .iter()
        .fold(text.to_owned(), |acc, finding| match finding.replacement() {
            Some(replacement) => {
                debug!(
                    word = finding.word.as_str(),
                    pos = finding.pos,
                    code = finding.code,
                    "applying spelling suggestion"
                );
                acc.replacen(finding.word.as_str(), replacement, 1)
            }
            None => acc,
        })
}

fn map_transport_error(error: reqwest::Error) -> SpellingCorrectionError {
    if error.is_timeout() {
        SpellingCorrectionError::timeout(error.to_string())
    } else if error.is_decode() {
        SpellingCorrectionError::decode(error.to_string())
    } else {
        SpellingCorrectionError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> SpellingCorrectionError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SpellingCorrectionError::timeout(format!("status {}", status.as_u16()))
        }
        _ => SpellingCorrectionError::status(status.as_u16()),
    }
}
