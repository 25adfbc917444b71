//! 项目树数据模型：工作区内存文件树的唯一权威来源。

use compact_str::CompactString;
use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::fmt;

use super::LanguageId;

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug)]
pub enum ProjectTreeError {
    ParentNotFolder,
    NameExists,
    InvalidNodeId,
}

impl fmt::Display for ProjectTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectTreeError::ParentNotFolder => write!(f, "parent is not a folder"),
            ProjectTreeError::NameExists => write!(f, "name already exists in parent"),
            ProjectTreeError::InvalidNodeId => write!(f, "invalid node id"),
        }
    }
}

impl std::error::Error for ProjectTreeError {}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    name: CompactString,
    path: String,
    language: LanguageId,
    content: Option<String>,
    children: Option<Vec<NodeId>>,
}

impl Node {
    fn new_file(name: CompactString, path: String, content: String) -> Self {
        let language = LanguageId::from_name(&name);
        Self {
            kind: NodeKind::File,
            name,
            path,
            language,
            content: Some(content),
            children: None,
        }
    }

    fn new_folder(name: CompactString, path: String) -> Self {
        Self {
            kind: NodeKind::Folder,
            name,
            path,
            language: LanguageId::Text,
            content: None,
            children: Some(Vec::new()),
        }
    }
}

/// 内存项目树。顶层是一组有序的根节点（虚拟无名根目录）。
///
/// 根层允许重名（反复摄取同名文件是已记录的宽容行为）；
/// 文件夹内部的子节点名字保持唯一。
pub struct ProjectTree {
    arena: SlotMap<NodeId, Node>,
    roots: Vec<NodeId>,
    expanded: FxHashSet<NodeId>,
}

impl fmt::Debug for ProjectTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectTree")
            .field("roots", &self.roots.len())
            .field("nodes", &self.arena.len())
            .finish()
    }
}

impl Default for ProjectTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectTree {
    pub fn new() -> Self {
        Self {
            arena: SlotMap::with_key(),
            roots: Vec::new(),
            expanded: FxHashSet::default(),
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn insert_root_file(&mut self, name: CompactString, content: String) -> NodeId {
        let path = name.to_string();
        let id = self.arena.insert(Node::new_file(name, path, content));
        self.roots.push(id);
        id
    }

    pub fn insert_root_folder(&mut self, name: CompactString) -> NodeId {
        let path = name.to_string();
        let id = self.arena.insert(Node::new_folder(name, path));
        self.roots.push(id);
        id
    }

    pub fn insert_child_file(
        &mut self,
        parent: NodeId,
        name: CompactString,
        path: String,
        content: String,
    ) -> Result<NodeId, ProjectTreeError> {
        {
            let parent_ro = self
                .arena
                .get(parent)
                .ok_or(ProjectTreeError::InvalidNodeId)?;
            let children_ro = parent_ro
                .children
                .as_ref()
                .ok_or(ProjectTreeError::ParentNotFolder)?;
            if children_ro
                .iter()
                .any(|&child| self.arena[child].name == name)
            {
                return Err(ProjectTreeError::NameExists);
            }
        }

        let id = self.arena.insert(Node::new_file(name, path, content));
        let children = self
            .arena
            .get_mut(parent)
            .ok_or(ProjectTreeError::InvalidNodeId)?
            .children
            .as_mut()
            .ok_or(ProjectTreeError::ParentNotFolder)?;
        children.push(id);

        Ok(id)
    }

    /// 深度优先先序查找：按根列表顺序访问节点本身，再依次下潜其子节点。
    /// `name` 或 `path` 命中都算命中，返回遍历序中的第一个。
    /// 浅层的 name 命中可能遮蔽更深处的 path 命中，这个歧义是有意保留的。
    pub fn find_by_name_or_path(&self, query: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };
            if node.name == query || node.path == query {
                return Some(id);
            }
            if let Some(children) = &node.children {
                for &child in children.iter().rev() {
                    stack.push(child);
                }
            }
        }

        None
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.arena.get(id).map(|n| n.kind)
    }

    pub fn is_folder(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .map(|n| n.kind == NodeKind::Folder)
            .unwrap_or(false)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.name.as_str())
    }

    pub fn path(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.path.as_str())
    }

    /// 文件的原始内容；文件夹与无效 id 返回 None。
    pub fn content(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).and_then(|n| n.content.as_deref())
    }

    pub fn language(&self, id: NodeId) -> Option<LanguageId> {
        self.arena.get(id).map(|n| n.language)
    }

    pub fn children(&self, id: NodeId) -> Option<impl Iterator<Item = &NodeId>> {
        self.arena
            .get(id)
            .and_then(|n| n.children.as_ref())
            .map(|c| c.iter())
    }

    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.is_folder(id) {
            if self.expanded.contains(&id) {
                self.expanded.remove(&id);
            } else {
                self.expanded.insert(id);
            }
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        if self.is_folder(id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }
}

#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub id: NodeId,
    pub depth: u16,
    pub name: CompactString,
    pub is_folder: bool,
    pub is_expanded: bool,
    pub language: LanguageId,
}

impl ProjectTree {
    /// 按树视图顺序展开成行：根层按插入顺序，已展开的文件夹紧跟其子节点。
    pub fn flatten_for_view(&self) -> Vec<ProjectRow> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16)> =
            self.roots.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.arena.get(id) else {
                continue;
            };

            result.push(ProjectRow {
                id,
                depth,
                name: node.name.clone(),
                is_folder: node.kind == NodeKind::Folder,
                is_expanded: self.expanded.contains(&id),
                language: node.language,
            });

            if self.expanded.contains(&id) {
                if let Some(children) = &node.children {
                    for &child in children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }

        result
    }
}
