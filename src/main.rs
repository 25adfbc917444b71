use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use vstudio::kernel::services::adapters::{AsyncRuntime, GitHubFetcher, HttpCompletionService};
use vstudio::kernel::{Action, ChatRole, DispatchResult, LineKind, Store, WorkspaceState};

const DEFAULT_ASSISTANT_ENDPOINT: &str = "http://127.0.0.1:8787/api/assistant";

/// 终端/聊天输出游标：记录已打印到哪，避免重复打印。
#[derive(Default)]
struct Shell {
    printed_lines: usize,
    printed_chat: usize,
}

impl Shell {
    /// 打印自上次以来新增的终端行与聊天消息。
    /// Command 行是用户刚敲进来的内容，不再回显一遍。
    fn flush(&mut self, store: &Store) {
        let lines = store.state().terminal.lines();
        if lines.len() < self.printed_lines {
            // clear 把日志截断了
            self.printed_lines = 0;
        }
        for line in &lines[self.printed_lines..] {
            match line.kind {
                LineKind::Command => {}
                LineKind::Output => println!("{}", line.text),
                LineKind::System => println!("[system] {}", line.text),
            }
        }
        self.printed_lines = lines.len();

        let transcript = &store.state().chat.transcript;
        for message in &transcript[self.printed_chat..] {
            match message.role {
                ChatRole::User => {}
                ChatRole::Assistant => println!("[assistant] {}", message.text),
            }
        }
        self.printed_chat = transcript.len();
    }
}

fn main() -> io::Result<()> {
    let _logging = vstudio::logging::init();

    let (tx, rx) = mpsc::channel();
    let endpoint = std::env::var("VSTUDIO_ASSISTANT_URL")
        .unwrap_or_else(|_| DEFAULT_ASSISTANT_ENDPOINT.to_string());
    let runtime = AsyncRuntime::new(
        tx,
        Arc::new(GitHubFetcher::new()),
        Arc::new(HttpCompletionService::new(endpoint)),
    )?;

    let mut store = Store::new(WorkspaceState::new());
    let mut shell = Shell::default();
    shell.flush(&store);

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        // 先消化已完成的异步操作，再读下一行。
        while let Ok(message) = rx.try_recv() {
            apply(&mut store, &runtime, message.into());
        }
        shell.flush(&store);

        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim_end_matches(['\n', '\r']);

        if let Some(meta) = line.strip_prefix(':') {
            if !handle_meta(meta, &mut store, &runtime) {
                break;
            }
        } else {
            apply(&mut store, &runtime, Action::TerminalSubmit(line.to_string()));
        }
        shell.flush(&store);
    }

    Ok(())
}

fn apply(store: &mut Store, runtime: &AsyncRuntime, action: Action) {
    let DispatchResult { effects, .. } = store.dispatch(action);
    for effect in effects {
        runtime.handle_effect(effect);
    }
}

/// 冒号开头的宿主命令；返回 false 表示退出。
fn handle_meta(meta: &str, store: &mut Store, runtime: &AsyncRuntime) -> bool {
    let (command, rest) = match meta.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (meta, ""),
    };

    match command {
        "q" | "quit" => return false,
        "tree" => {
            for row in store.state().project.flatten_for_view() {
                let indent = "  ".repeat(row.depth as usize);
                if row.is_folder {
                    println!("{indent}{}/", row.name);
                } else {
                    println!("{indent}{} [{}]", row.name, row.language.tag());
                }
            }
        }
        "tabs" => {
            let state = store.state();
            for &id in state.editor.tabs() {
                let name = state.project.name(id).unwrap_or("?");
                let marker = if state.editor.active() == Some(id) { "*" } else { " " };
                let dirty = if state.buffers.is_dirty(&state.project, id) { "+" } else { "" };
                println!("{marker} {name}{dirty}");
            }
        }
        "open" | "close" => {
            let found = store.state().project.find_by_name_or_path(rest);
            match found {
                Some(id) => {
                    let action = if command == "open" {
                        Action::OpenNode(id)
                    } else {
                        Action::CloseTab(id)
                    };
                    apply(store, runtime, action);
                }
                None => println!("{rest}: not found"),
            }
        }
        "edit" => match rest.split_once(' ') {
            Some((query, text)) => {
                let found = store.state().project.find_by_name_or_path(query);
                match found {
                    Some(id) => apply(
                        store,
                        runtime,
                        Action::EditBuffer {
                            id,
                            text: text.to_string(),
                        },
                    ),
                    None => println!("{query}: not found"),
                }
            }
            None => println!("usage: :edit <file> <text>"),
        },
        "drop" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                println!("usage: :drop <path>...");
            } else {
                apply(store, runtime, Action::DropFiles(paths));
            }
        }
        "clone" => match rest.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => apply(
                store,
                runtime,
                Action::CloneRepo {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                },
            ),
            _ => println!("usage: :clone <owner>/<repo>"),
        },
        "ai" => {
            if rest.is_empty() {
                println!("usage: :ai <message>");
            } else {
                apply(store, runtime, Action::ChatSubmit(rest.to_string()));
            }
        }
        other => println!(":{other}: unknown shell command"),
    }

    true
}
