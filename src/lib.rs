//! minimax-llm: the MiniMax text-generation API behind a uniform
//! "large language model" call interface.
//!
//! [`Minimax`] resolves credentials once, builds a request per prompt,
//! posts it through an [`EndpointClient`] and trims the reply at the
//! first caller-supplied stop string.

pub mod error;
pub mod config;
pub mod client;
pub mod providers;
pub mod request;
pub mod stop;

use async_trait::async_trait;

pub use client::EndpointClient;
pub use config::{Credentials, GenerationConfig, MinimaxConfig};
pub use error::{Error, Result};
pub use providers::Minimax;
pub use stop::enforce_stop_tokens;

/// JSON object used for request parameters and overrides
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Call surface a host framework dispatches through.
///
/// Implementations hold only immutable configuration, so a shared
/// reference can serve concurrent calls.
#[async_trait]
pub trait LanguageModel: Send + Sync
{   /// Short tag identifying the backend (e.g. `"minimax"`)
    fn llm_type(&self) -> &'static str;

    /// Parameters identifying the configured model, for logging and
    /// caching keys on the host side
    fn identifying_params(&self) -> Params;

    /// Generate a reply for `prompt`, truncated at the earliest stop
    /// string if any are given
    async fn generate(
      &self
    , prompt: &str
    , stop: Option<&[String]>
    ) -> Result<String>;
}
