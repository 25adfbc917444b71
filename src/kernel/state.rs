use crate::models::{NodeId, ProjectTree};

use super::editor::{BufferStore, EditorState};
use super::terminal::TerminalState;

/// AI 聊天回路失败时追加的固定兜底回复。
pub const CHAT_FALLBACK_REPLY: &str = "I apologize, but I'm experiencing technical \
difficulties with my neural networks. Please try again in a moment.";

const DEFAULT_PERSONA: &str = "You are the resident coding assistant of a terminal \
workspace. You are concise, practical, and favor working code over talk.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug)]
pub struct ChatState {
    pub persona: String,
    pub transcript: Vec<ChatMessage>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            transcript: Vec::new(),
        }
    }
}

impl ChatState {
    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) {
        self.transcript.push(ChatMessage {
            role,
            text: text.into(),
        });
    }
}

/// 工作区全量状态。页面会话期间由 Store 独占持有，重载即丢弃。
#[derive(Debug)]
pub struct WorkspaceState {
    pub project: ProjectTree,
    pub buffers: BufferStore,
    pub editor: EditorState,
    pub terminal: TerminalState,
    pub chat: ChatState,
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceState {
    pub fn new() -> Self {
        let mut terminal = TerminalState::new();
        terminal.push_system("vstudio terminal v0.1 - initializing...");
        terminal.push_system("Workspace online.");
        terminal.push_system("Type 'help' for available commands.");

        Self {
            project: ProjectTree::new(),
            buffers: BufferStore::new(),
            editor: EditorState::new(),
            terminal,
            chat: ChatState::default(),
        }
    }

    /// 活动标签解析回项目树；标签持有的是弱引用，
    /// 解析不到就返回 None 而不是报错。
    pub fn active_file(&self) -> Option<NodeId> {
        let id = self.editor.active()?;
        self.project.kind(id).map(|_| id)
    }
}
