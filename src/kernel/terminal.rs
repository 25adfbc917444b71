//! 终端日志与命令解释器。
//!
//! 日志只追加，唯一的例外是 `clear` 把整个日志截断为空。
//! 解释器是无状态的同步分发：固定关键字表 + `echo `/`cat ` 前缀，
//! 任何无法识别的输入都降级为 "command not found" 输出行，绝不报错。

use std::time::Instant;

use crate::models::ProjectTree;

use super::editor::BufferStore;

const PROMPT: &str = "> ";

pub const HELP_TEXT: &str = "Available Commands:
• help - Show this help menu
• mission - Learn about our cause
• scan - Network reconnaissance tools
• encrypt - Cryptographic utilities
• ls - List workspace entries
• cat <file> - Print file contents
• echo <text> - Print text
• clear - Clear terminal output
• whoami - Display user information";

const LS_TEXT: &str = "projects/  missions/  tools/
README.md  manifest.json";

const WHOAMI_TEXT: &str = "User: Operator
Status: White Hat
Clearance: Level 1 - Apprentice
Mission: Learn, Protect, Serve";

const MISSION_TEXT: &str = "THE MISSION
We are digital vigilantes fighting for justice in cyberspace.
Our cause: protect the innocent, educate the curious, defend against evil.

Current Operations:
• Anonymous Threat Neutralization
• Digital Rights Advocacy

Join us in making the digital world safer for everyone.";

const SCAN_TEXT: &str = "NETWORK RECONNAISSANCE SUITE
• Port Scanner - Identify open services
• Vulnerability Assessment - Find security gaps
• Network Mapper - Topology discovery
• Service Enumeration - Detailed analysis

Note: All tools for educational and defensive purposes only.";

const ENCRYPT_TEXT: &str = "CRYPTOGRAPHIC TOOLKIT
• RSA Key Generator - Create secure keypairs
• AES Encryption - Symmetric encryption
• Hash Functions - SHA-256, SHA-512
• Digital Signatures - Verify authenticity";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Command,
    Output,
    System,
}

#[derive(Debug, Clone)]
pub struct TerminalLine {
    pub kind: LineKind,
    pub text: String,
    pub at: Instant,
}

#[derive(Debug, Default)]
pub struct TerminalState {
    lines: Vec<TerminalLine>,
}

impl TerminalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(TerminalLine {
            kind,
            text: text.into(),
            at: Instant::now(),
        });
    }

    pub fn push_system(&mut self, text: impl Into<String>) {
        self.push(LineKind::System, text);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// 执行一条命令行。返回日志是否发生了变化。
///
/// 除 `clear` 外，每次执行恰好追加一条 Command 行和一条 Output 行；
/// `clear` 清空日志且不追加 Output。空白输入不留任何痕迹。
pub fn execute(
    raw: &str,
    tree: &ProjectTree,
    buffers: &BufferStore,
    term: &mut TerminalState,
) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }

    term.push(LineKind::Command, format!("{PROMPT}{raw}"));

    // 回显保留原文，分发比较用小写。
    let lower = trimmed.to_lowercase();
    let output = match lower.as_str() {
        "help" => HELP_TEXT.to_string(),
        "clear" => {
            term.clear();
            return true;
        }
        "ls" => LS_TEXT.to_string(),
        "whoami" => WHOAMI_TEXT.to_string(),
        "mission" => MISSION_TEXT.to_string(),
        "scan" => SCAN_TEXT.to_string(),
        "encrypt" => ENCRYPT_TEXT.to_string(),
        _ => {
            if let Some(rest) = strip_prefix_ci(trimmed, "echo ") {
                rest.to_string()
            } else if let Some(rest) = strip_prefix_ci(trimmed, "cat ") {
                let query = rest.trim();
                match tree.find_by_name_or_path(query) {
                    Some(id) => buffers.effective_content(tree, id),
                    None => format!("cat: {query}: no such file"),
                }
            } else {
                format!("{trimmed}: command not found\nType 'help' for available commands.")
            }
        }
    };

    term.push(LineKind::Output, output);
    true
}

/// ASCII 大小写不敏感的前缀剥离；前缀本身必须是 ASCII。
fn strip_prefix_ci<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        input.get(prefix.len()..)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/terminal.rs"]
mod tests;
