use crate::model::{Message, MessageRole};

/// Ordered conversation history for one session.
///
/// Index 0 is always the system instruction the store was created with. The
/// store is append-only until [`Transcript::reset`] drops everything after it.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    pub fn reset(&mut self) {
        self.messages.truncate(1);
    }

    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn view(&self) -> &[Message] {
        &self.messages
    }

    /// Messages after the system instruction, i.e. what a user sees.
    pub fn turns(&self) -> &[Message] {
        &self.messages[1..]
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
