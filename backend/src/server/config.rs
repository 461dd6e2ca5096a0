//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use notes_api::inbound::http::token_config::TokenSettings;
use notes_api::outbound::persistence::DbPool;
use notes_api::outbound::speller::HttpSpellingCorrector;

/// How note text is corrected before it is stored.
pub enum SpellerMode {
    /// Call the remote spelling service.
    Remote(HttpSpellingCorrector),
    /// Store text as submitted.
    Disabled,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: TokenSettings,
    pub(crate) db_pool: DbPool,
    pub(crate) storage_timeout: Duration,
    pub(crate) speller: SpellerMode,
}

impl ServerConfig {
    /// Construct a server configuration around a ready connection pool.
    ///
    /// Spelling correction starts disabled; attach a client with
    /// [`ServerConfig::with_speller`].
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        tokens: TokenSettings,
        db_pool: DbPool,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool,
            storage_timeout,
            speller: SpellerMode::Disabled,
        }
    }

    /// Route note text through the given spelling service client.
    #[must_use]
    pub fn with_speller(mut self, corrector: HttpSpellingCorrector) -> Self {
        self.speller = SpellerMode::Remote(corrector);
        self
    }
}
