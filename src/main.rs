//! The main entry point to the application.

#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

mod commands;
mod config;
mod context;
mod verbosity;

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::{env, io, panic};

use clap::Parser as _;
use colored::Colorize as _;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

use crate::config::Config;
use crate::context::Context;
use crate::verbosity::{Verbosity, VerbosityLevel};

#[derive(Debug, clap::Parser)]
#[clap(
    about = "Inspect the header and logical screen descriptor of GIF images",
    after_help = format!("{}: {}", "Repository".bold(), env!("CARGO_PKG_REPOSITORY")),
    version,
)]
struct Parser {
    #[clap(subcommand)]
    subcommand: commands::Subcommand,

    /// Read configuration from this file instead of the default location.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(flatten)]
    verbosity: Verbosity,
}

fn main() -> ExitCode {
    try_main().unwrap_or_else(|err| {
        let mut stderr = io::stderr().lock();
        _ = writeln!(stderr, "{}", "gif-inspect failed".bold().red());

        for cause in err.chain() {
            _ = writeln!(stderr, "  {}: {}", "Cause".bold(), cause);
        }

        ExitCode::FAILURE
    })
}

fn try_main() -> anyhow::Result<ExitCode> {
    setup_panic_hook();

    let args = Parser::parse();
    let level = args.verbosity.level();
    setup_tracing(level);

    let config = Config::load(args.config.as_deref())?;
    let mut ctx = Context::new(config, level);
    args.subcommand.run(&mut ctx).map(|()| ExitCode::SUCCESS)
}

fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        original_hook(panic_info);

        let package_name = env!("CARGO_PKG_NAME");
        let repository = env!("CARGO_PKG_REPOSITORY");
        let args = env::args().collect::<Vec<_>>();

        eprintln!();
        eprintln!("{package_name} has panicked. This is a bug. Please report it at:");
        eprintln!("  {repository}/issues/new");
        eprintln!();
        eprintln!("Re-run with RUST_BACKTRACE=1 and include the backtrace in your report.");
        eprintln!();
        eprintln!("Platform: {} {}", env::consts::OS, env::consts::ARCH);
        eprintln!("Version: {}", env!("CARGO_PKG_VERSION"));
        eprintln!("Args: {args:?}");
    }));
}

fn setup_tracing(level: VerbosityLevel) {
    use tracing_subscriber::prelude::*;

    let level_filter = level.level_filter();
    let directives = [
        format!("gif_header={level_filter}"),
        format!("{}={level_filter}", env!("CARGO_CRATE_NAME")),
    ];

    let filter = directives
        .iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(EnvFilter::default(), EnvFilter::add_directive);

    let registry = tracing_subscriber::registry().with(filter);

    if level.is_trace() {
        let subscriber = registry.with(
            tracing_subscriber::fmt::layer()
                .event_format(tracing_subscriber::fmt::format().pretty())
                .with_thread_ids(true)
                .with_writer(io::stderr),
        );

        subscriber.init();
    } else {
        let subscriber = registry.with(tracing_subscriber::fmt::layer().with_writer(io::stderr));

        subscriber.init();
    }
}
