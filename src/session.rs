use tracing::{debug, info};

use crate::config::Config;
use crate::error::ChatError;
use crate::model::{CompletionOptions, Message, MessageRole};
use crate::model_gateway::CompletionBackend;
use crate::tidy;
use crate::transcript::Transcript;

/// One user's conversation: the transcript plus the settings used to extend it.
///
/// Created when the session starts and dropped when it ends. Turns are
/// strictly sequential since `submit` takes `&mut self`.
pub struct ChatSession<B> {
    backend: B,
    transcript: Transcript,
    model: String,
    options: CompletionOptions,
    tidy_replies: bool,
}

impl<B> ChatSession<B>
where
    B: CompletionBackend,
{
    pub fn new(backend: B, cfg: &Config) -> Self {
        Self {
            backend,
            transcript: Transcript::new(cfg.system_prompt.clone()),
            model: cfg.model.clone(),
            options: cfg.completion_options(),
            tidy_replies: cfg.tidy_replies,
        }
    }

    pub fn with_transcript(backend: B, transcript: Transcript, model: impl Into<String>) -> Self {
        Self {
            backend,
            transcript,
            model: model.into(),
            options: CompletionOptions::default(),
            tidy_replies: false,
        }
    }

    pub fn set_options(&mut self, options: CompletionOptions) {
        self.options = options;
    }

    pub fn set_tidy_replies(&mut self, enabled: bool) {
        self.tidy_replies = enabled;
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
        info!(model = %self.model, "model override applied");
    }

    pub fn clear(&mut self) {
        self.transcript.reset();
        debug!("transcript cleared");
    }

    pub fn history(&self) -> &[Message] {
        self.transcript.view()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Records the user's message and asks the backend for a reply.
    ///
    /// The user message stays in the transcript even when the call fails; the
    /// reply is only recorded on success and when it is non-empty.
    pub async fn submit(&mut self, user_input: &str) -> Result<String, ChatError> {
        self.transcript.append(MessageRole::User, user_input);

        let reply = self
            .backend
            .complete(self.transcript.view(), &self.model, &self.options)
            .await?;
        let reply = if self.tidy_replies {
            tidy::tidy(&reply)
        } else {
            reply
        };

        if !reply.is_empty() {
            self.transcript.append(MessageRole::Assistant, reply.clone());
        }
        Ok(reply)
    }
}
