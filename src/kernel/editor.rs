//! 编辑器状态：未保存编辑的叠加层 + 打开标签页列表。

use rustc_hash::FxHashMap;

use crate::models::{NodeId, ProjectTree};

/// 每文件的编辑叠加层。首次编辑时懒创建，会话期间不移除；
/// 文件的有效内容 = 叠加层值（若存在），否则节点原始内容。
#[derive(Debug, Default)]
pub struct BufferStore {
    overlay: FxHashMap<NodeId, String>,
}

impl BufferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 无条件覆盖/创建叠加层条目。不保留历史，最新值就是唯一值。
    pub fn set_content(&mut self, id: NodeId, text: String) {
        self.overlay.insert(id, text);
    }

    /// 未知 id 按空缓冲处理，不报错。
    pub fn effective_content(&self, tree: &ProjectTree, id: NodeId) -> String {
        if let Some(text) = self.overlay.get(&id) {
            return text.clone();
        }
        tree.content(id).unwrap_or_default().to_string()
    }

    /// 叠加层与原始内容不一致即为脏。
    pub fn is_dirty(&self, tree: &ProjectTree, id: NodeId) -> bool {
        match self.overlay.get(&id) {
            Some(text) => tree.content(id) != Some(text.as_str()),
            None => false,
        }
    }
}

/// 打开标签页的有序列表 + 活动标签指针。
/// 顺序反映打开顺序，与文件树顺序无关。
#[derive(Debug, Default)]
pub struct EditorState {
    tabs: Vec<NodeId>,
    active: Option<NodeId>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// 打开一个文件标签：不存在则追加到末尾，总是设为活动。
    /// 返回状态是否变化。
    pub fn open_file(&mut self, id: NodeId) -> bool {
        let mut changed = false;
        if !self.tabs.contains(&id) {
            self.tabs.push(id);
            changed = true;
        }
        if self.active != Some(id) {
            self.active = Some(id);
            changed = true;
        }
        changed
    }

    /// 关闭标签；不存在则 no-op。若关闭的是活动标签，
    /// 新的活动标签是剩余列表的最后一项（不是相邻项）。
    pub fn close(&mut self, id: NodeId) -> bool {
        let Some(index) = self.tabs.iter().position(|&tab| tab == id) else {
            return false;
        };
        self.tabs.remove(index);

        if self.active == Some(id) {
            self.active = self.tabs.last().copied();
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/editor.rs"]
mod tests;
