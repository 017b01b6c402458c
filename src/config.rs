use std::env;
use std::fmt;

use crate::error::ChatError;
use crate::model::CompletionOptions;

pub const API_TOKEN_VAR: &str = "HF_TOKEN";

const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-R1:novita";
const DEFAULT_MODEL_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
const DEFAULT_TIDY_REPLIES: bool = false;

/// Bearer credential for the completion endpoint. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: ApiToken,
    pub api_url: String,
    pub model: String,
    pub system_prompt: String,
    pub model_timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub tidy_replies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Result<Self, ChatError> {
        let api_token = get_var(API_TOKEN_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(ApiToken::new)
            .ok_or(ChatError::Configuration { var: API_TOKEN_VAR })?;

        Ok(Self {
            api_token,
            api_url: get_var("MODEL_API_URL")
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_API_URL.to_string()),
            model: get_var("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_prompt: get_var("SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            model_timeout_secs: parse_model_timeout_secs(get_var("MODEL_TIMEOUT_SECS").as_deref()),
            temperature: parse_temperature(get_var("MODEL_TEMPERATURE").as_deref()),
            max_tokens: parse_max_tokens(get_var("MODEL_MAX_TOKENS").as_deref()),
            tidy_replies: parse_bool(get_var("TIDY_REPLIES").as_deref(), DEFAULT_TIDY_REPLIES),
        })
    }

    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

fn parse_positive_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_model_timeout_secs(raw: Option<&str>) -> u64 {
    parse_positive_u64(raw, DEFAULT_MODEL_TIMEOUT_SECS)
}

fn parse_temperature(raw: Option<&str>) -> Option<f32> {
    raw.and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn parse_max_tokens(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(str::trim).map(str::to_ascii_lowercase).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{
        ApiToken, Config, DEFAULT_MODEL, DEFAULT_MODEL_API_URL, DEFAULT_MODEL_TIMEOUT_SECS,
        DEFAULT_SYSTEM_PROMPT, parse_bool, parse_max_tokens, parse_model_timeout_secs,
        parse_temperature,
    };
    use crate::error::ChatError;
    use crate::model::CompletionOptions;

    fn config_from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ChatError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Config::from_env_with(|key| vars.get(key).cloned())
    }

    #[test]
    fn from_env_requires_api_token() {
        let err = config_from_pairs(&[]).expect_err("missing token should fail");
        assert!(matches!(err, ChatError::Configuration { var: "HF_TOKEN" }));
    }

    #[test]
    fn from_env_treats_blank_api_token_as_missing() {
        let err = config_from_pairs(&[("HF_TOKEN", "   ")]).expect_err("blank token should fail");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn from_env_uses_defaults_when_optional_vars_are_missing() {
        let cfg = config_from_pairs(&[("HF_TOKEN", "hf_test")]).expect("config should load");
        assert_eq!(cfg.api_token.expose(), "hf_test");
        assert_eq!(cfg.api_url, DEFAULT_MODEL_API_URL);
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(cfg.model_timeout_secs, DEFAULT_MODEL_TIMEOUT_SECS);
        assert_eq!(cfg.completion_options(), CompletionOptions::default());
        assert!(!cfg.tidy_replies);
    }

    #[test]
    fn from_env_reads_configured_values() {
        let cfg = config_from_pairs(&[
            ("HF_TOKEN", " hf_secret "),
            ("MODEL_API_URL", "http://localhost:9999/v1/chat/completions"),
            ("MODEL", "meta-llama/Llama-3.1-8B-Instruct"),
            ("SYSTEM_PROMPT", "Be concise."),
            ("MODEL_TIMEOUT_SECS", "15"),
            ("MODEL_TEMPERATURE", "0.7"),
            ("MODEL_MAX_TOKENS", "512"),
            ("TIDY_REPLIES", "yes"),
        ])
        .expect("config should load");

        assert_eq!(cfg.api_token, ApiToken::new("hf_secret"));
        assert_eq!(cfg.api_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(cfg.model, "meta-llama/Llama-3.1-8B-Instruct");
        assert_eq!(cfg.system_prompt, "Be concise.");
        assert_eq!(cfg.model_timeout_secs, 15);
        assert_eq!(
            cfg.completion_options(),
            CompletionOptions {
                temperature: Some(0.7),
                max_tokens: Some(512),
            }
        );
        assert!(cfg.tidy_replies);
    }

    #[test]
    fn debug_output_redacts_api_token() {
        let cfg = config_from_pairs(&[("HF_TOKEN", "hf_very_secret")]).expect("config should load");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hf_very_secret"), "leaked: {rendered}");
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn parse_model_timeout_secs_uses_default_for_missing_or_invalid_values() {
        assert_eq!(parse_model_timeout_secs(None), DEFAULT_MODEL_TIMEOUT_SECS);
        assert_eq!(
            parse_model_timeout_secs(Some("not-a-number")),
            DEFAULT_MODEL_TIMEOUT_SECS
        );
        assert_eq!(
            parse_model_timeout_secs(Some("0")),
            DEFAULT_MODEL_TIMEOUT_SECS
        );
        assert_eq!(parse_model_timeout_secs(Some("  90  ")), 90);
    }

    #[test]
    fn parse_temperature_rejects_invalid_values() {
        assert_eq!(parse_temperature(None), None);
        assert_eq!(parse_temperature(Some("warm")), None);
        assert_eq!(parse_temperature(Some("-1")), None);
        assert_eq!(parse_temperature(Some("NaN")), None);
        assert_eq!(parse_temperature(Some(" 0 ")), Some(0.0));
    }

    #[test]
    fn parse_max_tokens_rejects_zero_and_garbage() {
        assert_eq!(parse_max_tokens(Some("0")), None);
        assert_eq!(parse_max_tokens(Some("-5")), None);
        assert_eq!(parse_max_tokens(Some("many")), None);
        assert_eq!(parse_max_tokens(Some("256")), Some(256));
    }

    #[test]
    fn parse_bool_respects_truthy_and_falsy_values() {
        assert!(parse_bool(Some("true"), false));
        assert!(parse_bool(Some(" ON "), false));
        assert!(!parse_bool(Some("off"), true));
        assert!(parse_bool(Some("maybe"), true));
        assert!(!parse_bool(None, false));
    }
}
