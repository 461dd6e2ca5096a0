//! Outbound adapter for the third-party spelling correction service.

mod dto;
mod http_corrector;

pub use http_corrector::{DEFAULT_SPELLER_TIMEOUT, DEFAULT_SPELLER_URL, HttpSpellingCorrector};
