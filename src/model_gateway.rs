use std::future::Future;
use std::pin::Pin;

use crate::error::ChatError;
use crate::model::{CompletionOptions, Message};
use crate::providers::chat_completions::ChatCompletionsClient;

pub type CompletionFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ChatError>> + 'a>>;

/// Something that turns a transcript into the next assistant reply.
pub trait CompletionBackend {
    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        model: &'a str,
        options: &'a CompletionOptions,
    ) -> CompletionFuture<'a>;
}

impl CompletionBackend for ChatCompletionsClient {
    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        model: &'a str,
        options: &'a CompletionOptions,
    ) -> CompletionFuture<'a> {
        Box::pin(async move { ChatCompletionsClient::complete(self, messages, model, options).await })
    }
}

impl<B> CompletionBackend for &B
where
    B: CompletionBackend + ?Sized,
{
    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        model: &'a str,
        options: &'a CompletionOptions,
    ) -> CompletionFuture<'a> {
        (**self).complete(messages, model, options)
    }
}
