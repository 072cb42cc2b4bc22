use codegroup::session::Session;
use codegroup::store::RecordStore;
use codegroup::sync::{Action, SyncOrchestrator};
use std::path::PathBuf;

use super::terminal::Terminal;
use std::io::{BufRead, Write};

const PROMPT: &str = "codegroup> ";

const HELP: &str = "\
Commands:
  open          enter a code and pick a file or action
  add <path>    add a local file to the active code group
  active        show the active code group
  help          show this help
  quit          leave the session";

#[derive(Debug, PartialEq, Eq)]
pub(super) enum ReplCommand {
    Empty,
    Open,
    Add(PathBuf),
    Active,
    Help,
    Quit,
    Unknown(String),
}

pub(super) fn parse(line: &str) -> ReplCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    match word {
        "" => ReplCommand::Empty,
        "open" | "o" => ReplCommand::Open,
        "add" | "a" if !rest.is_empty() => ReplCommand::Add(PathBuf::from(rest)),
        "active" => ReplCommand::Active,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

/// Reads commands until `quit` or end of input. Action failures are reported
/// by the orchestrator and never end the session.
pub(super) fn run<S, R, W>(sync: &mut SyncOrchestrator<S, Terminal<R, W>>, session: &mut Session)
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    sync.interaction_mut()
        .println("codegroup session. Type `help` for commands.");

    while let Some(line) = sync.interaction_mut().prompt_line(PROMPT) {
        match parse(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Open => {
                let flow = sync.run(session, Action::OpenCodeGroup);
                tracing::debug!(?flow, "open finished");
            }
            ReplCommand::Add(path) => {
                let flow = sync.run(session, Action::AddFileToActiveGroup(path));
                tracing::debug!(?flow, "add finished");
            }
            ReplCommand::Active => {
                let text = match session.active() {
                    Some(code) => format!("Active code group: {}", code),
                    None => "No active code group.".to_string(),
                };
                sync.interaction_mut().println(&text);
            }
            ReplCommand::Help => sync.interaction_mut().println(HELP),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(other) => {
                let text = format!("Unknown command: {} (try `help`)", other);
                sync.interaction_mut().println(&text);
            }
        }
    }
}
