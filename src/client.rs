//! HTTP transport for the MiniMax chat completion endpoint

use std::fmt;
use log::{debug, error, trace};

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::request::ResponseEnvelope;
use crate::Params;

/// Path template appended to the API host
const CHAT_COMPLETION_PATH: &str = "/v1/text/chatcompletion";

/// Build the call URL for `host` and `group_id`
pub fn endpoint_url(host: &str, group_id: &str) -> String
{   format!(
      "{}{}?GroupId={}",
      host.trim_end_matches('/'),
      CHAT_COMPLETION_PATH,
      group_id
    )
}

/// Authenticated client for one MiniMax endpoint.
///
/// Holds no per-call state; a single instance can serve concurrent
/// calls.
#[derive(Clone)]
pub struct EndpointClient
{   api_key: String
  , api_url: String
  , http_client: reqwest::Client
}

impl EndpointClient
{   /// Client for `host`, posting to the URL derived from `group_id`
    pub fn new(
      host: &str
    , group_id: &str
    , api_key: impl Into<String>
    ) -> Self
    {   EndpointClient::with_url(endpoint_url(host, group_id), api_key)
    }

    /// Client posting to an explicit URL
    pub fn with_url(
      api_url: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   let api_url = api_url.into();
        debug!("Creating EndpointClient for {}", api_url);
        EndpointClient
        {   api_key: api_key.into()
          , api_url
          , http_client: reqwest::Client::new()
        }
    }

    /// Client for resolved credentials; `api_url` replaces the
    /// derived URL when given
    pub fn from_credentials(
      credentials: &Credentials
    , api_url: Option<&str>
    ) -> Self
    {   match api_url
        {   Some(url) => EndpointClient::with_url(url, credentials.api_key())
          , None => EndpointClient::new(
              &credentials.api_host,
              &credentials.group_id,
              credentials.api_key()
            )
        }
    }

    pub fn api_url(&self) -> &str
    {   &self.api_url
    }

    /// POST `body` and return the `reply` field of the response.
    ///
    /// Non-2xx statuses become [`Error::Transport`]; a positive
    /// `base_resp.status_code` becomes [`Error::Application`]. No
    /// retries are attempted.
    pub async fn post(&self, body: &Params) -> Result<String>
    {   trace!("MiniMax request: {:?}", body);

        let response = self.http_client
          .post(&self.api_url)
          .bearer_auth(&self.api_key)
          .json(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::from(e)
          })?;

        let status = response.status();
        trace!("MiniMax response status: {}", status);

        let text = response.text().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          Error::from(e)
        })?;

        if !status.is_success()
        {   error!("MiniMax HTTP {} error: {}", status.as_u16(), text);
            return Err(Error::Transport
            {   status: status.as_u16()
              , body: text
            });
        }

        let envelope: ResponseEnvelope = serde_json::from_str(&text)
          .map_err(|e| {
            error!("Parse error: {}", e);
            Error::from(e)
          })?;

        if envelope.base_resp.status_code > 0
        {   error!(
              "MiniMax API {} error: {}",
              envelope.base_resp.status_code,
              envelope.base_resp.status_msg
            );
            return Err(Error::Application
            {   code: envelope.base_resp.status_code
              , message: envelope.base_resp.status_msg
            });
        }

        envelope.reply.ok_or_else(|| {
          error!("No reply in MiniMax response");
          Error::Parse("response is missing `reply`".to_string())
        })
    }
}

impl fmt::Debug for EndpointClient
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.debug_struct("EndpointClient")
          .field("api_url", &self.api_url)
          .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn url_is_derived_from_host_and_group()
    {   let client = EndpointClient::new(
          "https://api.minimax.chat", "group-1", "key"
        );
        assert_eq!(
          client.api_url(),
          "https://api.minimax.chat/v1/text/chatcompletion?GroupId=group-1"
        );
    }

    #[test]
    fn trailing_slash_on_host_is_dropped()
    {   assert_eq!(
          endpoint_url("http://localhost:8080/", "g"),
          "http://localhost:8080/v1/text/chatcompletion?GroupId=g"
        );
    }

    #[test]
    fn explicit_url_overrides_derived_one()
    {   let creds = Credentials::new("key", "g", "https://api.minimax.chat");
        let client = EndpointClient::from_credentials(
          &creds, Some("http://proxy.local/chat")
        );
        assert_eq!(client.api_url(), "http://proxy.local/chat");
    }

    #[test]
    fn debug_hides_api_key()
    {   let client = EndpointClient::with_url("http://x", "sk-secret");
        assert!(!format!("{:?}", client).contains("sk-secret"));
    }
}
