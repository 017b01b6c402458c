use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{ApiToken, Config};
use crate::error::ChatError;
use crate::model::{CompletionOptions, Message};
use crate::providers::http_errors::classify_request_error;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

fn to_wire_messages(messages: &[Message]) -> Vec<ChatMessage<'_>> {
    messages
        .iter()
        .map(|msg| ChatMessage {
            role: msg.role.as_str(),
            content: &msg.content,
        })
        .collect()
}

/// Pulls `choices[0].message.content` out of a successful response body.
fn extract_reply(body: &str) -> Result<String, ChatError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|err| ChatError::MalformedResponse {
            detail: err.to_string(),
        })?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ChatError::MalformedResponse {
            detail: "response contained no choices".to_string(),
        })
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// Stateless apart from its configuration: every call is one POST carrying the
/// whole transcript, with no retries.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    http: Client,
    api_url: String,
    api_token: ApiToken,
    timeout_secs: u64,
}

impl ChatCompletionsClient {
    pub fn new(http: Client, cfg: &Config) -> Self {
        Self {
            http,
            api_url: cfg.api_url.clone(),
            api_token: cfg.api_token.clone(),
            timeout_secs: cfg.model_timeout_secs,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub async fn complete(
        &self,
        messages: &[Message],
        model: &str,
        options: &CompletionOptions,
    ) -> Result<String, ChatError> {
        let body = ChatCompletionRequest {
            model,
            messages: to_wire_messages(messages),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };
        debug!(
            api_url = %self.api_url,
            model = %model,
            message_count = messages.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(self.api_token.expose())
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(
                    api_url = %self.api_url,
                    model = %model,
                    error = %err,
                    "chat completion request failed"
                );
                ChatError::from(classify_request_error(&err, &self.api_url, self.timeout_secs))
            })?;

        let status = response.status();
        if !status.is_success() {
            let response_body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            warn!(
                api_url = %self.api_url,
                model = %model,
                status = %status,
                response_body_len = response_body.len(),
                "completion endpoint returned non-success status"
            );
            return Err(ChatError::Remote {
                status: status.as_u16(),
                body: response_body,
            });
        }

        let response_body = response.text().await.map_err(|err| {
            ChatError::from(classify_request_error(&err, &self.api_url, self.timeout_secs))
        })?;
        let reply = extract_reply(&response_body).inspect_err(|err| {
            warn!(
                model = %model,
                response_body_len = response_body.len(),
                error = %err,
                "completion response had unexpected shape"
            );
        })?;
        debug!(
            model = %model,
            response_len = reply.len(),
            "received chat completion response"
        );
        Ok(reply)
    }
}
