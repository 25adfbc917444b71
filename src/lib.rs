//! vstudio - 浏览器风格项目工作区核心库
//!
//! 模块结构：
//! - models: 数据模型（ProjectTree, LanguageId）
//! - kernel: 核心层（State, Action, Effect, Store, Terminal）
//! - kernel::services: 服务层（远程仓库、AI 补全、异步运行时）

pub mod kernel;
pub mod logging;
pub mod models;
