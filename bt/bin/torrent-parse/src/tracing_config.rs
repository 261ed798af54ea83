use std::io;

use clap::{ArgAction, Args};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

/// Logging flags; logs are written to stderr.
#[derive(Args, Clone, Debug)]
pub(crate) struct TracingConfig {
    #[arg(
        long,
        short = 'v',
        action = ArgAction::Count,
        global = true,
        help = "Log more (repeatable)",
    )]
    verbose: u8,
    #[arg(
        long,
        action = ArgAction::Count,
        global = true,
        help = "Log less (repeatable)",
    )]
    silent: u8,

    #[arg(long, global = true, help = "Color log output")]
    color: bool,
}

// Ordered from quietest to loudest; the default sits at `INFO`.
const LEVELS: [LevelFilter; 6] = [
    LevelFilter::OFF,
    LevelFilter::ERROR,
    LevelFilter::WARN,
    LevelFilter::INFO,
    LevelFilter::DEBUG,
    LevelFilter::TRACE,
];
const DEFAULT_LEVEL: usize = 3;

impl TracingConfig {
    pub(crate) fn init(&self) {
        let layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(self.color)
            .with_writer(io::stderr)
            .with_filter(self.env_filter());
        tracing_subscriber::registry().with(layer).init();
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level_filter().into())
            .from_env_lossy()
    }

    fn level_filter(&self) -> LevelFilter {
        let level = (DEFAULT_LEVEL + usize::from(self.verbose))
            .saturating_sub(usize::from(self.silent))
            .min(LEVELS.len() - 1);
        LEVELS[level]
    }
}
