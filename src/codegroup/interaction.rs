//! # Interaction Port
//!
//! The orchestrator never talks to a terminal, window or editor directly. It
//! asks an [`Interaction`] for text, choices and files, and hands it notices
//! and documents to show. The CLI implements it on stdin/stdout; tests use
//! [`ScriptedInteraction`], which replays canned answers.

use crate::commands::CmdMessage;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub trait Interaction {
    /// Free-text prompt. `None` when the user cancelled.
    fn input(&mut self, prompt: &str) -> Option<String>;

    /// Single choice among `options`; returns the chosen index.
    fn pick(&mut self, prompt: &str, options: &[String]) -> Option<usize>;

    /// Ask for a local file to upload.
    fn pick_file(&mut self, prompt: &str) -> Option<PathBuf>;

    /// Show an info/success/warning/error notice.
    fn notify(&mut self, message: &CmdMessage);

    /// Show a materialized file to the user.
    fn open_document(&mut self, path: &Path) -> Result<()>;

    fn notify_all(&mut self, messages: &[CmdMessage]) {
        for message in messages {
            self.notify(message);
        }
    }
}

#[cfg(test)]
pub use scripted::{Answer, ScriptedInteraction};
