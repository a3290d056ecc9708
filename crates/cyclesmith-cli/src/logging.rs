//! Tracing subscriber for the binary; core and adapters only emit events.
//!
//! The level comes from `-q`/`-v` (see [`GlobalArgs::log_level`]) unless
//! `RUST_LOG` is set.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the selected level.
const WORKSPACE_CRATES: [&str; 3] = ["cyclesmith", "cyclesmith_core", "cyclesmith_adapters"];

/// Install the stderr subscriber. Fails if one is already installed.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(workspace_directives(args.log_level())));
    let ansi = !args.no_color && std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("tracing subscriber already installed")
}

fn workspace_directives(level: LevelFilter) -> String {
    WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_workspace_crate_gets_the_level() {
        let directives = workspace_directives(LevelFilter::DEBUG).to_lowercase();
        assert_eq!(
            directives,
            "cyclesmith=debug,cyclesmith_core=debug,cyclesmith_adapters=debug"
        );
    }
}
