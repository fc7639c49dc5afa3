//! Error type for MiniMax adapter operations

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring the adapter or calling MiniMax.
/// Implements Clone so callers can fan a failure out to several
/// listeners.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error
{   /// A required credential was neither supplied nor set in the
    /// environment
    #[error(
      "Missing {name}: pass it explicitly or set the `{variable}` \
       environment variable"
    )]
    Configuration
    {   name: String
      , variable: String
    }
  , /// The endpoint answered with a non-success HTTP status
    #[error("HTTP {status} error: {body}")]
    Transport
    {   status: u16
      , body: String
    }
  , /// The endpoint answered 2xx but flagged an error in `base_resp`
    #[error("API {code} error: {message}")]
    Application
    {   code: i64
      , message: String
    }
  , /// The request failed before any HTTP status was received
    #[error("HTTP request failed: {0}")]
    Http(String)
  , /// The response body was not the expected envelope
    #[error("Parse error: {0}")]
    Parse(String)
}

impl Error
{   /// Build a configuration error for a credential that could not
    /// be resolved
    pub fn missing(name: &str, variable: &str) -> Self
    {   Error::Configuration
        {   name: name.to_string()
          , variable: variable.to_string()
        }
    }
}

impl From<reqwest::Error> for Error
{   fn from(e: reqwest::Error) -> Self
    {   Error::Http(e.to_string())
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::Parse(e.to_string())
    }
}
