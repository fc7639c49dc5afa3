//! Configuration for the MiniMax adapter: raw settings, credential
//! resolution and the resolved immutable values

use std::fmt;
use log::{debug, error, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::Params;

pub const API_KEY_VAR: &str = "MINIMAX_API_KEY";
pub const GROUP_ID_VAR: &str = "MINIMAX_GROUP_ID";
pub const API_HOST_VAR: &str = "MINIMAX_API_HOST";
pub const DEFAULT_API_HOST: &str = "https://api.minimax.chat";

pub const DEFAULT_MODEL: &str = "abab5.5-chat";
pub const DEFAULT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;

/// Raw adapter settings as supplied by the caller.
///
/// Every field is optional; anything left unset falls back to the
/// environment (credentials) or to the built-in defaults
/// (generation parameters) when the adapter is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinimaxConfig
{   /// API key (falls back to `MINIMAX_API_KEY`)
    pub api_key: Option<String>
  , /// Group id (falls back to `MINIMAX_GROUP_ID`)
    pub group_id: Option<String>
  , /// API base URL (falls back to `MINIMAX_API_HOST`, then the
    /// public endpoint)
    pub api_host: Option<String>
  , /// Full call URL, replacing the one derived from host and group
    pub api_url: Option<String>
  , /// Model name
    pub model: Option<String>
  , /// Tokens to generate per call
    pub max_tokens: Option<u32>
  , /// Sampling temperature
    pub temperature: Option<f64>
  , /// Nucleus sampling mass
    pub top_p: Option<f64>
  , /// Pass-through request fields not covered above
    #[serde(default)]
    pub extra_params: Params
}

impl MinimaxConfig
{   pub fn new() -> Self
    {   MinimaxConfig::default()
    }

    /// Load settings from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self>
    {   serde_json::from_str(json).map_err(|e| {
          error!("Invalid MiniMax config: {}", e);
          Error::Parse(e.to_string())
        })
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self
    {   self.api_key = Some(key.into());
        self
    }

    pub fn group_id(mut self, group_id: impl Into<String>) -> Self
    {   self.group_id = Some(group_id.into());
        self
    }

    pub fn api_host(mut self, host: impl Into<String>) -> Self
    {   self.api_host = Some(host.into());
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self
    {   self.api_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self
    {   self.model = Some(model.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self
    {   self.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self
    {   self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self
    {   self.top_p = Some(top_p);
        self
    }

    /// Add one pass-through request field
    pub fn param(
      mut self
    , key: impl Into<String>
    , value: impl Into<Value>
    ) -> Self
    {   self.extra_params.insert(key.into(), value.into());
        self
    }

    /// Resolve credentials against `lookup`, which stands in for the
    /// process environment
    pub fn resolve_credentials<F>(&self, lookup: F)
      -> Result<Credentials>
    where
      F: Fn(&str) -> Option<String>
    {   let api_key = resolve_with(
          self.api_key.as_deref(), API_KEY_VAR, None, &lookup
        )?;
        let group_id = resolve_with(
          self.group_id.as_deref(), GROUP_ID_VAR, None, &lookup
        )?;
        let api_host = resolve_with(
          self.api_host.as_deref()
        , API_HOST_VAR
        , Some(DEFAULT_API_HOST)
        , &lookup
        )?;
        debug!(
          "Resolved MiniMax credentials for group {} at {}",
          group_id, api_host
        );
        Ok(Credentials { api_key, group_id, api_host })
    }

    /// Resolve credentials against the process environment
    pub fn credentials_from_env(&self) -> Result<Credentials>
    {   let api_key = resolve(self.api_key.as_deref(), API_KEY_VAR, None)?;
        let group_id
          = resolve(self.group_id.as_deref(), GROUP_ID_VAR, None)?;
        let api_host = resolve(
          self.api_host.as_deref()
        , API_HOST_VAR
        , Some(DEFAULT_API_HOST)
        )?;
        Ok(Credentials { api_key, group_id, api_host })
    }

    /// Generation parameters with defaults filled in
    pub fn generation(&self) -> GenerationConfig
    {   GenerationConfig
        {   model: self.model.clone()
              .unwrap_or_else(|| DEFAULT_MODEL.to_string())
          , max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
          , temperature: self.temperature
              .unwrap_or(DEFAULT_TEMPERATURE)
          , top_p: self.top_p.unwrap_or(DEFAULT_TOP_P)
          , extra_params: self.extra_params.clone()
        }
    }
}

/// Resolve a setting from an explicit value, then the process
/// environment variable `variable`, then `default`.
///
/// Blank values count as unset. Fails with [`Error::Configuration`]
/// when all three come up empty.
pub fn resolve(
  explicit: Option<&str>
, variable: &str
, default: Option<&str>
) -> Result<String>
{   resolve_with(explicit, variable, default, |name| {
      std::env::var(name).ok()
    })
}

/// Same as [`resolve`] with a caller-supplied environment lookup
pub fn resolve_with<F>(
  explicit: Option<&str>
, variable: &str
, default: Option<&str>
, lookup: F
) -> Result<String>
where
  F: Fn(&str) -> Option<String>
{   if let Some(value) = explicit.filter(|v| !v.trim().is_empty())
    {   trace!("{} supplied explicitly", variable);
        return Ok(value.to_string());
    }

    if let Some(value) = lookup(variable)
      .filter(|v| !v.trim().is_empty())
    {   trace!("{} read from environment", variable);
        return Ok(value);
    }

    if let Some(value) = default
    {   trace!("{} falling back to default", variable);
        return Ok(value.to_string());
    }

    error!("{} is not set", variable);
    Err(Error::missing(&variable.to_ascii_lowercase(), variable))
}

/// Resolved MiniMax credentials. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials
{   api_key: String
  , pub group_id: String
  , pub api_host: String
}

impl Credentials
{   pub fn new(
      api_key: impl Into<String>
    , group_id: impl Into<String>
    , api_host: impl Into<String>
    ) -> Self
    {   Credentials
        {   api_key: api_key.into()
          , group_id: group_id.into()
          , api_host: api_host.into()
        }
    }

    pub fn api_key(&self) -> &str
    {   &self.api_key
    }
}

impl fmt::Debug for Credentials
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("Credentials")
          .field("api_key", &"**********")
          .field("group_id", &self.group_id)
          .field("api_host", &self.api_host)
          .finish()
    }
}

/// Generation parameters fixed for the lifetime of an adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig
{   pub model: String
  , pub max_tokens: u32
  , pub temperature: f64
  , pub top_p: f64
  , pub extra_params: Params
}

impl GenerationConfig
{   /// Request fields sent with every call. Extra params override
    /// the computed fields on key collision.
    pub fn default_params(&self) -> Params
    {   let mut params = Params::new();
        params.insert("model".into(), Value::from(self.model.clone()));
        params.insert(
          "tokens_to_generate".into(), Value::from(self.max_tokens)
        );
        params.insert("temperature".into(), Value::from(self.temperature));
        params.insert("top_p".into(), Value::from(self.top_p));
        for (key, value) in &self.extra_params
        {   params.insert(key.clone(), value.clone());
        }
        params
    }
}

impl Default for GenerationConfig
{   fn default() -> Self
    {   MinimaxConfig::default().generation()
    }
}
