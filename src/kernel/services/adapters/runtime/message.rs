use compact_str::CompactString;

use crate::kernel::services::ports::ClonedFile;
use crate::kernel::Action;

/// 异步操作的完成消息。宿主循环把它们逐条换成 Action 再进 Store。
#[derive(Debug)]
pub enum AppMessage {
    FileDropIngested {
        name: CompactString,
        content: String,
    },
    FileDropError {
        name: CompactString,
        error: String,
    },
    RepoCloned {
        repo: String,
        files: Vec<ClonedFile>,
    },
    RepoCloneFailed {
        repo: String,
        error: String,
    },
    CompletionArrived {
        reply: String,
    },
    CompletionFailed {
        error: String,
    },
}

impl From<AppMessage> for Action {
    fn from(message: AppMessage) -> Self {
        match message {
            AppMessage::FileDropIngested { name, content } => {
                Action::FileDropIngested { name, content }
            }
            AppMessage::FileDropError { name, error } => Action::FileDropFailed { name, error },
            AppMessage::RepoCloned { repo, files } => Action::RepoCloned { repo, files },
            AppMessage::RepoCloneFailed { repo, error } => {
                Action::RepoCloneFailed { repo, error }
            }
            AppMessage::CompletionArrived { reply } => Action::CompletionArrived { reply },
            AppMessage::CompletionFailed { error } => Action::CompletionFailed { error },
        }
    }
}
