//! # Sync Orchestrator
//!
//! Runs user actions against the [`GroupRepository`] and the local disk,
//! talking to the user only through an [`Interaction`].
//!
//! ## The open-code-group flow
//!
//! ```text
//! Idle ──code──▶ CodeEntered ──list──▶ GroupListed ──pick──▶ FileOpened
//!  ▲                                        │                FileAdded
//!  │                                        │                FileDeleted
//!  └──────────── blank / cancel / error ◀───┘                GroupDeleted
//! ```
//!
//! Entering a code makes it the session's active code even when the group is
//! empty or the listing failed, so "add file" works right after. Opening a
//! listed file fetches it again instead of reusing the listing.
//!
//! ## Failure semantics
//!
//! The `open_code_group` and `add_file_to_active_group` entry points return
//! `Result<Flow>`. [`SyncOrchestrator::run`] is the action boundary: it turns
//! every error into a notice, logs it, and lands back in `Flow::Idle`.
//! Nothing is retried.

use crate::api::GroupRepository;
use crate::commands::CmdMessage;
use crate::error::{CodeGroupError, Result};
use crate::interaction::Interaction;
use crate::session::Session;
use crate::store::{RecordStore, StoreError};
use crate::transfer::{read_local, write_local};
use std::path::{Path, PathBuf};

pub const CODE_PROMPT: &str = "Enter code";
pub const ADD_FILE: &str = "Add File";
pub const DELETE_FILE: &str = "Delete File";
pub const DELETE_GROUP: &str = "Delete Code Group";

const ACTIONS: [&str; 3] = [ADD_FILE, DELETE_FILE, DELETE_GROUP];

/// A user-invoked action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenCodeGroup,
    AddFileToActiveGroup(PathBuf),
}

/// Where a flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Idle,
    FileOpened {
        code: String,
        file_name: String,
        path: PathBuf,
    },
    FileAdded {
        code: String,
        file_name: String,
    },
    FileDeleted {
        code: String,
        file_name: String,
    },
    GroupDeleted {
        code: String,
    },
}

enum MenuChoice {
    File(usize),
    AddFile,
    DeleteFile,
    DeleteGroup,
}

impl MenuChoice {
    /// Files come first in the menu, then the fixed actions.
    fn from_index(index: usize, file_count: usize) -> Option<Self> {
        if index < file_count {
            return Some(MenuChoice::File(index));
        }
        match index - file_count {
            0 => Some(MenuChoice::AddFile),
            1 => Some(MenuChoice::DeleteFile),
            2 => Some(MenuChoice::DeleteGroup),
            _ => None,
        }
    }
}

pub struct SyncOrchestrator<S: RecordStore, I: Interaction> {
    repo: GroupRepository<S>,
    ui: I,
    target_dir: PathBuf,
}

impl<S: RecordStore, I: Interaction> SyncOrchestrator<S, I> {
    /// `target_dir` is where opened files are materialized.
    pub fn new(repo: GroupRepository<S>, ui: I, target_dir: PathBuf) -> Self {
        Self {
            repo,
            ui,
            target_dir,
        }
    }

    /// Runs one action to completion. Never fails: errors become notices.
    pub fn run(&mut self, session: &mut Session, action: Action) -> Flow {
        let outcome = match &action {
            Action::OpenCodeGroup => self.open_code_group(session),
            Action::AddFileToActiveGroup(path) => self.add_file_to_active_group(session, path),
        };
        match outcome {
            Ok(flow) => flow,
            Err(e) => {
                self.report(&e);
                Flow::Idle
            }
        }
    }

    pub fn open_code_group(&mut self, session: &mut Session) -> Result<Flow> {
        let code = match self.ui.input(CODE_PROMPT) {
            Some(input) if !input.trim().is_empty() => input.trim().to_string(),
            _ => return Ok(Flow::Idle),
        };

        let listing = self.repo.list_files(&code);
        self.ui.notify_all(&listing.messages);
        session.set_active(&code);

        let names = listing.file_names();
        let mut options = names.clone();
        options.extend(ACTIONS.iter().map(|a| a.to_string()));

        let choice = self
            .ui
            .pick(&format!("Code group {}", code), &options)
            .and_then(|i| MenuChoice::from_index(i, names.len()));

        match choice {
            None => Ok(Flow::Idle),
            Some(MenuChoice::File(i)) => self.open_file(&code, &names[i]),
            Some(MenuChoice::AddFile) => match self.ui.pick_file("Select a file to add") {
                Some(path) => self.upload(&code, &path),
                None => Ok(Flow::Idle),
            },
            Some(MenuChoice::DeleteFile) => self.delete_file(&code, &names),
            Some(MenuChoice::DeleteGroup) => {
                let result = self.repo.delete_group(&code, session)?;
                self.ui.notify_all(&result.messages);
                Ok(Flow::GroupDeleted { code })
            }
        }
    }

    /// Uploads a local file into the session's active code group.
    pub fn add_file_to_active_group(&mut self, session: &Session, path: &Path) -> Result<Flow> {
        let code = session
            .active()
            .ok_or(CodeGroupError::NoActiveGroup)?
            .to_string();
        self.upload(&code, path)
    }

    fn upload(&mut self, code: &str, path: &Path) -> Result<Flow> {
        let local = read_local(path)?;
        let result = self
            .repo
            .save_file(code, &local.file_name, &local.content)?;
        self.ui.notify_all(&result.messages);
        Ok(Flow::FileAdded {
            code: code.to_string(),
            file_name: local.file_name,
        })
    }

    fn delete_file(&mut self, code: &str, names: &[String]) -> Result<Flow> {
        if names.is_empty() {
            self.ui.notify(&CmdMessage::info(format!(
                "Code group {} has no files to delete.",
                code
            )));
            return Ok(Flow::Idle);
        }

        let picked = self
            .ui
            .pick("Select a file to delete", names)
            .and_then(|i| names.get(i));
        let Some(file_name) = picked.cloned() else {
            return Ok(Flow::Idle);
        };
        let result = self.repo.delete_file(code, &file_name)?;
        self.ui.notify_all(&result.messages);
        Ok(Flow::FileDeleted {
            code: code.to_string(),
            file_name,
        })
    }

    fn open_file(&mut self, code: &str, file_name: &str) -> Result<Flow> {
        let Some(file) = self.repo.fetch_file(code, file_name)? else {
            self.ui.notify(&CmdMessage::warning(format!(
                "{} is no longer in code group {}",
                file_name, code
            )));
            return Ok(Flow::Idle);
        };

        let path = write_local(&self.target_dir, &file.file_name, &file.content)?;
        self.ui.open_document(&path)?;
        Ok(Flow::FileOpened {
            code: code.to_string(),
            file_name: file.file_name,
            path,
        })
    }

    fn report(&mut self, e: &CodeGroupError) {
        match e {
            CodeGroupError::Store(StoreError::Unknown { raw }) => {
                tracing::error!(payload = %raw, "action failed on unrecognized backend response");
            }
            CodeGroupError::NoActiveGroup | CodeGroupError::Invalid(_) => {
                tracing::info!(error = %e, "action rejected");
            }
            _ => tracing::warn!(error = %e, "action failed"),
        }
        self.ui.notify(&CmdMessage::error(e.to_string()));
    }

    pub fn repository(&self) -> &GroupRepository<S> {
        &self.repo
    }

    pub fn repository_mut(&mut self) -> &mut GroupRepository<S> {
        &mut self.repo
    }

    pub fn interaction(&self) -> &I {
        &self.ui
    }

    pub fn interaction_mut(&mut self) -> &mut I {
        &mut self.ui
    }
}
