//! Diagnostic logging through `tracing`, written to stderr so stdout only
//! carries the result line.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a filter directive such as `debug` or
/// `kubeconfig_eks=trace`.
pub const LOG_ENV: &str = "KUBECONFIG_EKS_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// How chatty the run should be, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Use `KUBECONFIG_EKS_LOG`, falling back to warnings only.
    #[default]
    Normal,
    Verbose,
    Quiet,
}

/// Builds the filter: command-line flags win, then the environment, then
/// the default level.
pub fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    match verbosity {
        Verbosity::Verbose => EnvFilter::new("debug"),
        Verbosity::Quiet => EnvFilter::new("off"),
        Verbosity::Normal => {
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        }
    }
}

/// Installs the global subscriber. Later calls are ignored.
///
/// Colors are only used when stderr is a terminal.
pub fn init_logging(verbosity: Verbosity) {
    let _ = Registry::default()
        .with(build_env_filter(verbosity))
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .try_init();
}
