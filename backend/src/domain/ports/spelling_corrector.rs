//! Driven port for the third-party spelling correction service.
//!
//! The domain treats correction as an opaque text transform: it hands over
//! note text and gets back the text to persist. Failures abort note creation;
//! there is no silent fallback to the uncorrected text.

use async_trait::async_trait;

use crate::domain::NoteText;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the spelling service.
    pub enum SpellingCorrectionError {
        /// Network transport failed before receiving a response.
        Transport { message: String } => "spelling service transport failed: {message}",
        /// The service answered with a non-success status.
        Status { status: u16 } => "spelling service answered with status {status}",
        /// The response body could not be decoded.
        Decode { message: String } => "spelling service response decode failed: {message}",
        /// The request exceeded its deadline.
        Timeout { message: String } => "spelling service timed out: {message}",
    }
}

/// Port for correcting note text before it is stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpellingCorrector: Send + Sync {
    /// Return the corrected text.
    async fn correct(&self, text: &NoteText) -> Result<NoteText, SpellingCorrectionError>;
}

/// Corrector that returns the input unchanged.
///
/// Used when correction is disabled by configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughSpellingCorrector;

#[async_trait]
impl SpellingCorrector for PassthroughSpellingCorrector {
    async fn correct(&self, text: &NoteText) -> Result<NoteText, SpellingCorrectionError> {
        Ok(text.clone())
    }
}
