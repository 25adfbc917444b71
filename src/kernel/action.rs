use compact_str::CompactString;
use std::path::PathBuf;

use crate::models::NodeId;

use super::services::ports::ClonedFile;

#[derive(Debug, Clone)]
pub enum Action {
    /// 点击树节点：文件进标签页，文件夹切换展开。
    OpenNode(NodeId),
    CloseTab(NodeId),
    EditBuffer {
        id: NodeId,
        text: String,
    },
    TerminalSubmit(String),
    ChatSubmit(String),
    /// 用户拖入的文件，逐个转成异步读取。
    DropFiles(Vec<PathBuf>),
    CloneRepo {
        owner: String,
        repo: String,
    },
    // 以下为异步完成回调，由运行时消息转换而来。
    FileDropIngested {
        name: CompactString,
        content: String,
    },
    FileDropFailed {
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
