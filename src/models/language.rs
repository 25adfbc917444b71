#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum LanguageId {
    TypeScript,
    JavaScript,
    Css,
    Html,
    Json,
    Markdown,
    Python,
    Rust,
    Go,
    Sql,
    Bash,
    Text,
}

impl LanguageId {
    /// 根据文件名推断语言标签。扩展名大小写不敏感；无扩展名或未知扩展名归为 Text。
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Text;
        };
        match ext.to_ascii_lowercase().as_str() {
            "tsx" | "ts" => Self::TypeScript,
            "jsx" | "js" => Self::JavaScript,
            "css" => Self::Css,
            "html" => Self::Html,
            "json" => Self::Json,
            "md" => Self::Markdown,
            "py" => Self::Python,
            "rs" => Self::Rust,
            "go" => Self::Go,
            "sql" => Self::Sql,
            "sh" => Self::Bash,
            _ => Self::Text,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Css => "css",
            Self::Html => "html",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Sql => "sql",
            Self::Bash => "bash",
            Self::Text => "text",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
            Self::Css => "CSS",
            Self::Html => "HTML",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Sql => "SQL",
            Self::Bash => "Bash",
            Self::Text => "Text",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/language.rs"]
mod tests;
