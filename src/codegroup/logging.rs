use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "CODEGROUP_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// The filter directive to use: `CODEGROUP_LOG` wins, then `--verbose`.
pub fn directive(env_value: Option<&str>, verbose: bool) -> String {
    match env_value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ if verbose => VERBOSE_LEVEL.to_string(),
        _ => DEFAULT_LEVEL.to_string(),
    }
}

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// command output on stdout.
pub fn init(verbose: bool) {
    let env_value = std::env::var(ENV_LOG).ok();
    let filter = EnvFilter::try_new(directive(env_value.as_deref(), verbose))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
