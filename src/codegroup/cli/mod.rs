//! # CLI Layer
//!
//! One host for the codegroup library. This is the only place that knows
//! about process arguments, stdout/stderr and exit codes.
//!
//! - `run()`: parse, set up logging and the backend, dispatch
//! - `init_context()`: config resolution and backend selection
//! - `handle_*()`: per-command handlers that call the repository and print
//!
//! Without a subcommand the binary starts an interactive session (see
//! [`repl`]), the only mode in which an active code group survives between
//! actions.

mod args;
mod print;
mod repl;
mod terminal;

use args::{Cli, Commands};
use clap::Parser;
use codegroup::api::{CmdMessage, CmdResult, GroupRepository};
use codegroup::config::{CodegroupConfig, ENV_CONFIG_DIR};
use codegroup::editor::get_editor;
use codegroup::error::{CodeGroupError, Result};
use codegroup::logging;
use codegroup::session::Session;
use codegroup::store::{Backend, StoreError};
use codegroup::sync::{Action, SyncOrchestrator};
use codegroup::transfer::{read_local, resolve_target_dir, write_local};
use directories::ProjectDirs;
use print::{print_files, print_messages};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use terminal::Terminal;

struct AppContext {
    repo: GroupRepository<Backend>,
    target_dir: PathBuf,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = init_context();

    let outcome = match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => handle_session(ctx),
        Commands::Open => handle_open(ctx),
        Commands::List { code } => Ok(handle_list(&ctx, &code)),
        Commands::Push { code, paths } => Ok(handle_push(&mut ctx, &code, &paths)),
        Commands::Pull { code, file, dir } => handle_pull(&ctx, &code, &file, dir.as_deref()),
        Commands::Delete { code, file } => handle_delete(&mut ctx, &code, file.as_deref()),
        Commands::Export { code, dir } => handle_export(&ctx, &code, dir.as_deref()),
    };

    match outcome {
        Ok(result) => {
            print_messages(&result.messages);
            if result.has_errors() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            if let CodeGroupError::Store(StoreError::Unknown { raw }) = &e {
                tracing::error!(payload = %raw, "command failed on unrecognized backend response");
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "codegroup", "codegroup")
}

fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration problems are reported here, once. The backend built from a
/// broken config still exists and fails every call with the same reason.
fn init_context() -> AppContext {
    let dir = config_dir();
    let config = CodegroupConfig::resolve(&dir).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        let mut fallback = CodegroupConfig::default();
        fallback.apply_env(|name| std::env::var(name).ok());
        fallback
    });

    let (backend, problem) = Backend::from_config(&config);
    if let Some(e) = problem {
        tracing::warn!(error = %e, "backend is not usable");
        eprintln!("Error: {}", e);
    }

    let target_dir = match &config.download_dir {
        Some(dir) => dir.clone(),
        None => {
            let fallback = project_dirs()
                .map(|dirs| dirs.data_dir().join("files"))
                .unwrap_or_else(|| std::env::temp_dir().join("codegroup"));
            let cwd = std::env::current_dir().ok();
            resolve_target_dir(cwd.as_deref(), &fallback)
        }
    };
    tracing::debug!(config_dir = %dir.display(), target_dir = %target_dir.display(), "context ready");

    AppContext {
        repo: GroupRepository::new(backend),
        target_dir,
    }
}

fn handle_session(ctx: AppContext) -> Result<CmdResult> {
    let mut sync = SyncOrchestrator::new(
        ctx.repo,
        Terminal::stdio(get_editor()),
        ctx.target_dir,
    );
    let mut session = Session::new();
    repl::run(&mut sync, &mut session);
    Ok(CmdResult::default())
}

fn handle_open(ctx: AppContext) -> Result<CmdResult> {
    let mut sync = SyncOrchestrator::new(
        ctx.repo,
        Terminal::stdio(get_editor()),
        ctx.target_dir,
    );
    let flow = sync.run(&mut Session::new(), Action::OpenCodeGroup);
    tracing::debug!(?flow, "open finished");
    Ok(CmdResult::default())
}

fn handle_list(ctx: &AppContext, code: &str) -> CmdResult {
    let result = ctx.repo.list_files(code);
    print_files(&result.files);
    result
}

fn handle_push(ctx: &mut AppContext, code: &str, paths: &[PathBuf]) -> CmdResult {
    let mut result = CmdResult::default();
    for path in paths {
        let saved = read_local(path)
            .and_then(|local| ctx.repo.save_file(code, &local.file_name, &local.content));
        match saved {
            Ok(r) => result.messages.extend(r.messages),
            Err(e) => result.add_message(CmdMessage::error(format!(
                "Could not push {}: {}",
                path.display(),
                e
            ))),
        }
    }
    result
}

fn handle_pull(
    ctx: &AppContext,
    code: &str,
    file_name: &str,
    dir: Option<&Path>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match ctx.repo.fetch_file(code, file_name)? {
        Some(file) => {
            let dir = dir.unwrap_or(&ctx.target_dir);
            let path = write_local(dir, &file.file_name, &file.content)?;
            result.add_message(CmdMessage::success(format!("Saved to {}", path.display())));
            result.paths.push(path);
        }
        None => result.add_message(CmdMessage::error(format!(
            "File {} not found in code group {}",
            file_name, code
        ))),
    }
    Ok(result)
}

fn handle_delete(ctx: &mut AppContext, code: &str, file_name: Option<&str>) -> Result<CmdResult> {
    match file_name {
        Some(file_name) => ctx.repo.delete_file(code, file_name),
        None => ctx.repo.delete_group(code, &mut Session::new()),
    }
}

fn handle_export(ctx: &AppContext, code: &str, dir: Option<&Path>) -> Result<CmdResult> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir()?,
    };
    ctx.repo.export_group(code, &dir)
}
