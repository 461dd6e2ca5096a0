//! DTOs for decoding spelling-service JSON responses.
//!
//! The service answers with an array of findings:
//! `[{"code":1,"pos":0,"row":0,"col":0,"len":4,"word":"helo","s":["hello"]}]`.
//! Only `word` and `s` drive the correction; positions are kept for logging.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(super) struct SpellingFindingDto {
    pub(super) word: String,
    #[serde(default, rename = "s")]
    pub(super) suggestions: Vec<String>,
    #[serde(default)]
    pub(super) pos: Option<u64>,
    #[serde(default)]
    pub(super) code: Option<u32>,
}

impl SpellingFindingDto {
    /// First suggestion, which is the one applied.
    pub(super) fn replacement(&self) -> Option<&str> {
        self.suggestions.first().map(String::as_str)
    }
}
