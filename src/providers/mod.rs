pub mod chat_completions;
pub(crate) mod http_errors;
