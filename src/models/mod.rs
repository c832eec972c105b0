pub mod chat;
pub mod dialogue;
pub mod tracked_coin;

pub use chat::{ChatId, IncomingMessage, Keyboard};
pub use dialogue::DialogueState;
pub use tracked_coin::{Edge, TrackedCoin};
