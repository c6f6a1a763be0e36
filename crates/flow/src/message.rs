/// Stable identifier for one message within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl MessageId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Chat speaker role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

/// One chat bubble. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    /// Local wall-clock time, `HH:MM`.
    pub timestamp: String,
}

/// Append-only message sequence for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) -> &Message {
        let message = self.next_message(role, text);
        self.push(message)
    }

    /// Builds the message that would be appended next, without appending it.
    pub fn next_message(&self, role: Role, text: impl Into<String>) -> Message {
        Message {
            id: MessageId::new(self.messages.len() as u64 + 1),
            role,
            text: text.into(),
            timestamp: display_timestamp(),
        }
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn display_timestamp() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
