use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::debug;
use serde_json::Value;

use minimax_llm::{Minimax, MinimaxConfig, Params};

/// Send one prompt to MiniMax and print the reply
#[derive(Debug, Parser)]
#[command(name = "minimax-llm", version, about)]
struct Cli
{   /// Prompt text
    prompt: String
  , /// JSON file with adapter settings
    #[arg(long)]
    config: Option<PathBuf>
  , /// Model name
    #[arg(long)]
    model: Option<String>
  , /// Tokens to generate
    #[arg(long)]
    max_tokens: Option<u32>
  , #[arg(long)]
    temperature: Option<f64>
  , #[arg(long)]
    top_p: Option<f64>
  , /// Full endpoint URL, replacing the one derived from host and group
    #[arg(long)]
    api_url: Option<String>
  , /// Stop string; may be repeated
    #[arg(long = "stop")]
    stop: Vec<String>
  , /// Per-call request field as KEY=VALUE (VALUE parsed as JSON
    /// when possible); may be repeated
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>
}

fn parse_param(raw: &str) -> anyhow::Result<(String, Value)>
{   let Some((key, value)) = raw.split_once('=')
    else
    {   bail!("expected KEY=VALUE, got `{}`", raw);
    };
    let value = serde_json::from_str(value)
      .unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn load_config(cli: &Cli) -> anyhow::Result<MinimaxConfig>
{   let mut config = match &cli.config
    {   Some(path) => {
          let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
          MinimaxConfig::from_json_str(&raw)?
        }
      , None => MinimaxConfig::new()
    };

    if let Some(model) = &cli.model
    {   config = config.model(model.clone());
    }
    if let Some(max_tokens) = cli.max_tokens
    {   config = config.max_tokens(max_tokens);
    }
    if let Some(temperature) = cli.temperature
    {   config = config.temperature(temperature);
    }
    if let Some(top_p) = cli.top_p
    {   config = config.top_p(top_p);
    }
    if let Some(url) = &cli.api_url
    {   config = config.api_url(url.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()>
{   env_logger::init();
    let cli = Cli::parse();
    debug!("Parsed arguments: {:?}", cli);

    let minimax = Minimax::new(load_config(&cli)?)?;

    let mut overrides = Params::new();
    for raw in &cli.params
    {   let (key, value) = parse_param(raw)?;
        overrides.insert(key, value);
    }

    let stop = (!cli.stop.is_empty()).then_some(cli.stop.as_slice());
    let overrides = (!overrides.is_empty()).then_some(&overrides);
    let reply = minimax
      .generate_with_overrides(&cli.prompt, stop, overrides)
      .await?;

    println!("{}", reply);
    Ok(())
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn param_value_parsed_as_json()
    {   let (key, value) = parse_param("temperature=0.1").unwrap();
        assert_eq!(key, "temperature");
        assert_eq!(value, json!(0.1));

        let (_, value) = parse_param("skip_info_mask=true").unwrap();
        assert_eq!(value, json!(true));
    }

    #[test]
    fn param_value_falls_back_to_string()
    {   let (key, value) = parse_param("bot_name=MM assistant").unwrap();
        assert_eq!(key, "bot_name");
        assert_eq!(value, json!("MM assistant"));
    }

    #[test]
    fn param_value_keeps_later_equals_signs()
    {   let (key, value) = parse_param("prefix=a=b").unwrap();
        assert_eq!(key, "prefix");
        assert_eq!(value, json!("a=b"));
    }

    #[test]
    fn param_without_equals_is_rejected()
    {   let err = parse_param("temperature").unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));
    }
}
