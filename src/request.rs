//! Wire types for the MiniMax chat completion endpoint

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::Params;

/// Who authored a message. Only user turns are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SenderType
{   User
}

/// One entry of the `messages` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub sender_type: SenderType
  , pub text: String
}

impl ChatMessage
{   pub fn user(text: impl Into<String>) -> Self
    {   ChatMessage
        {   sender_type: SenderType::User
          , text: text.into()
        }
    }
}

/// Status block carried by every response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BaseResp
{   #[serde(default)]
    pub status_code: i64
  , #[serde(default)]
    pub status_msg: String
}

/// Response envelope. Only `base_resp` and `reply` are read; a body
/// without `base_resp` does not deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope
{   pub base_resp: BaseResp
  , pub reply: Option<String>
}

/// Build the request body for one prompt.
///
/// Starts from `defaults`, lays `overrides` on top (overrides win on
/// collision) and finally sets `messages` to the single user turn.
pub fn build_request(
  defaults: Params
, overrides: Option<&Params>
, prompt: &str
) -> Result<Params>
{   let mut body = defaults;
    if let Some(overrides) = overrides
    {   for (key, value) in overrides
        {   body.insert(key.clone(), value.clone());
        }
    }
    let messages = vec![ChatMessage::user(prompt)];
    body.insert("messages".into(), serde_json::to_value(messages)?);
    Ok(body)
}
