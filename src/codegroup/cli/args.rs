use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "codegroup", bin_name = "codegroup", version = get_version())]
#[command(about = "Share groups of text files under a short code", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactive session: `open`, `add <path>`, `quit` (default)
    Session,

    /// Enter a code and pick a file or action
    Open,

    /// List the files of a code group
    #[command(alias = "ls")]
    List { code: String },

    /// Save local files into a code group
    Push {
        code: String,

        /// Files to upload (stored under their file name)
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Write one file of a code group to disk
    Pull {
        code: String,

        file: String,

        /// Target directory (defaults to the download directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Delete a file, or the whole code group when no file is given
    #[command(alias = "rm")]
    Delete { code: String, file: Option<String> },

    /// Write a code group to a tar.gz archive
    Export {
        code: String,

        /// Where to put the archive (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}
