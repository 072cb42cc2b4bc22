//! # Codegroup Architecture
//!
//! Codegroup lets several people share a handful of text files by agreeing on
//! a short **code**. Every file lives in a backend table keyed on
//! `(code, file_name)`; anyone holding the code can list, open, add and delete
//! files in that group.
//!
//! Like any UI-agnostic library, the core takes Rust arguments and returns
//! Rust types. The terminal is just one host.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, owns the Session, terminal prompts     │
//! │  - The ONLY place that knows about stdout/stdin/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sync Orchestrator (sync.rs)                                │
//! │  - Interactive flows over the Interaction port              │
//! │  - Catches every error at the action boundary               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Group Repository (api.rs → commands/*.rs)                  │
//! │  - list / save / delete file / delete group / fetch         │
//! │  - Returns CmdResult with user-facing messages              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait: query / upsert / delete               │
//! │  - RestStore (production), FileStore, InMemoryStore (tests) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Rules
//!
//! - `(code, file_name)` is unique. Saving the same pair twice replaces the
//!   content; it never produces a second record.
//! - A group is nothing but the records sharing a code.
//! - The active code is a [`session::Session`] value the caller owns and
//!   passes in. Deleting a group drops it from the session when it is the
//!   active one.
//! - Opening a file always re-fetches it from the backend.
//!
//! ## Testing Strategy
//!
//! Commands and the orchestrator are tested against
//! [`store::memory::InMemoryStore`] and a scripted
//! [`interaction::Interaction`]. The binary is tested end to end against a
//! `file://` backend in a temp directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The group repository facade
//! - [`commands`]: Logic for each repository operation
//! - [`store`]: Record store contract and implementations
//! - [`session`]: Active code group
//! - [`sync`]: Interactive flows
//! - [`interaction`]: The port hosts implement
//! - [`transfer`]: Local file reads and writes
//! - [`config`]: Backend settings
//! - [`logging`]: Tracing subscriber setup
//! - [`editor`]: External editor used as document viewer
//! - [`error`]: Error types
//! - [`model`]: `Record` and `GroupFile`

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod sync;
pub mod transfer;
