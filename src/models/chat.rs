use std::fmt;

/// Identity of a chat session. Dialogue state is keyed by it and
/// notifications for a tracked coin are delivered to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat: ChatId,
    pub first_name: Option<String>,
    pub text: String,
}

/// Single-select reply menu: one button per row, hidden after one use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub buttons: Vec<String>,
}

impl Keyboard {
    pub fn new<I, S>(buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buttons: buttons.into_iter().map(Into::into).collect(),
        }
    }
}
