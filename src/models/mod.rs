//! 数据模型层

pub mod language;
pub mod project_tree;

pub use language::LanguageId;
pub use project_tree::{NodeId, NodeKind, ProjectRow, ProjectTree, ProjectTreeError};
