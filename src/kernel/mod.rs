//! Headless workspace core (state/action/effect).

pub mod action;
pub mod editor;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;
pub mod terminal;

pub use action::Action;
pub use editor::{BufferStore, EditorState};
pub use effect::Effect;
pub use state::{ChatMessage, ChatRole, ChatState, WorkspaceState, CHAT_FALLBACK_REPLY};
pub use store::{DispatchResult, Store};
pub use terminal::{LineKind, TerminalLine, TerminalState};
