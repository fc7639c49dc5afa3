use async_trait::async_trait;
use log::{debug, info};

use crate::client::EndpointClient;
use crate::config::{Credentials, GenerationConfig, MinimaxConfig};
use crate::error::Result;
use crate::request::build_request;
use crate::stop::enforce_stop_tokens;
use crate::{LanguageModel, Params};

/// Type tag reported to the host framework
pub const LLM_TYPE: &str = "minimax";

/// MiniMax large language model adapter.
///
/// Credentials come from the config or, failing that, from
/// `MINIMAX_API_KEY`, `MINIMAX_GROUP_ID` and `MINIMAX_API_HOST`.
///
/// ```no_run
/// # async fn demo() -> minimax_llm::Result<()> {
/// use minimax_llm::{Minimax, MinimaxConfig};
///
/// let minimax = Minimax::new(
///   MinimaxConfig::new()
///     .api_key("my-api-key")
///     .group_id("my-group-id")
/// )?;
/// let _joke = minimax.generate("Tell me a joke.", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Minimax
{   generation: GenerationConfig
  , client: EndpointClient
}

impl Minimax
{   /// Build an adapter, resolving missing credentials from the
    /// process environment
    pub fn new(config: MinimaxConfig) -> Result<Self>
    {   let credentials = config.credentials_from_env()?;
        Ok(Minimax::from_resolved(config, &credentials))
    }

    /// Build an adapter from the environment alone
    pub fn from_env() -> Result<Self>
    {   Minimax::new(MinimaxConfig::default())
    }

    /// Build an adapter using `lookup` in place of the process
    /// environment
    pub fn with_env<F>(config: MinimaxConfig, lookup: F) -> Result<Self>
    where
      F: Fn(&str) -> Option<String>
    {   let credentials = config.resolve_credentials(lookup)?;
        Ok(Minimax::from_resolved(config, &credentials))
    }

    fn from_resolved(config: MinimaxConfig, credentials: &Credentials) -> Self
    {   let client = EndpointClient::from_credentials(
          credentials,
          config.api_url.as_deref()
        );
        let generation = config.generation();
        info!(
          "MiniMax adapter ready: model {} at {}",
          generation.model,
          client.api_url()
        );
        Minimax { generation, client }
    }

    pub fn client(&self) -> &EndpointClient
    {   &self.client
    }

    /// Fields sent with every request
    pub fn default_params(&self) -> Params
    {   self.generation.default_params()
    }

    /// Parameters identifying this model to the host framework
    pub fn identifying_params(&self) -> Params
    {   let mut params = Params::new();
        params.insert("model".into(), self.generation.model.clone().into());
        params.extend(self.default_params());
        params
    }

    /// Send `prompt` and return the reply, cut at the first stop
    /// string when `stop` is given
    pub async fn generate(
      &self
    , prompt: &str
    , stop: Option<&[String]>
    ) -> Result<String>
    {   self.generate_with_overrides(prompt, stop, None).await
    }

    /// Like [`Minimax::generate`], with per-call request fields laid
    /// over the instance defaults
    pub async fn generate_with_overrides(
      &self
    , prompt: &str
    , stop: Option<&[String]>
    , overrides: Option<&Params>
    ) -> Result<String>
    {   debug!("Generating with model {}", self.generation.model);
        let body = build_request(self.default_params(), overrides, prompt)?;
        let reply = self.client.post(&body).await?;

        match stop
        {   Some(stop) if !stop.is_empty() => {
              Ok(enforce_stop_tokens(&reply, stop).to_string())
            }
          , _ => Ok(reply)
        }
    }
}

#[async_trait]
impl LanguageModel for Minimax
{   fn llm_type(&self) -> &'static str
    {   LLM_TYPE
    }

    fn identifying_params(&self) -> Params
    {   Minimax::identifying_params(self)
    }

    async fn generate(
      &self
    , prompt: &str
    , stop: Option<&[String]>
    ) -> Result<String>
    {   Minimax::generate(self, prompt, stop).await
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    fn creds(name: &str) -> Option<String>
    {   match name
        {   "MINIMAX_API_KEY" => Some("key".to_string())
          , "MINIMAX_GROUP_ID" => Some("group".to_string())
          , _ => None
        }
    }

    #[test]
    fn default_params_hold_exactly_the_generation_fields()
    {   let minimax = Minimax::with_env(MinimaxConfig::new(), creds).unwrap();
        let params = minimax.default_params();
        let mut keys: Vec<&str> = params.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
          keys,
          vec!["model", "temperature", "tokens_to_generate", "top_p"]
        );
        assert_eq!(params["tokens_to_generate"], json!(256));
    }

    #[test]
    fn extra_params_are_merged()
    {   let minimax = Minimax::with_env(
          MinimaxConfig::new().param("skip_info_mask", true),
          creds
        ).unwrap();
        let params = minimax.default_params();
        assert_eq!(params.len(), 5);
        assert_eq!(params["skip_info_mask"], json!(true));
    }

    #[test]
    fn identifying_params_include_model()
    {   let minimax = Minimax::with_env(
          MinimaxConfig::new().model("abab6-chat"),
          creds
        ).unwrap();
        let ident = minimax.identifying_params();
        assert_eq!(ident["model"], json!("abab6-chat"));
        assert_eq!(ident, minimax.default_params());
        assert_eq!(minimax.llm_type(), "minimax");
    }
}
