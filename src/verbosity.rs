use clap::ArgAction;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, clap::Args)]
pub struct Verbosity {
    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Use verbose output (or `-vv` and `-vvv` for more verbose output)",
        global = true,
        overrides_with = "quiet",
    )]
    verbose: u8,

    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Use quiet output (or `-qq` for silent output)",
        global = true,
        overrides_with = "verbose",
    )]
    quiet: u8,
}

impl Verbosity {
    /// Combine the `-v` and `-q` counts into a single level. Quiet wins.
    pub fn level(&self) -> VerbosityLevel {
        match (self.quiet, self.verbose) {
            (0, 0) => VerbosityLevel::Default,
            (0, 1) => VerbosityLevel::Verbose,
            (0, 2) => VerbosityLevel::ExtraVerbose,
            (0, _) => VerbosityLevel::Trace,
            (1, _) => VerbosityLevel::Quiet,
            (_, _) => VerbosityLevel::Silent,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Logging off; reports still go to stdout.
    Silent,

    /// Up to [`ERROR`](tracing::Level::ERROR).
    Quiet,

    /// Up to [`WARN`](tracing::Level::WARN).
    #[default]
    Default,

    /// Up to [`INFO`](tracing::Level::INFO).
    Verbose,

    /// Up to [`DEBUG`](tracing::Level::DEBUG), including the decoder's field dumps.
    ExtraVerbose,

    /// Everything, including each field group read.
    Trace,
}

impl VerbosityLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Silent => LevelFilter::OFF,
            Self::Quiet => LevelFilter::ERROR,
            Self::Default => LevelFilter::WARN,
            Self::Verbose => LevelFilter::INFO,
            Self::ExtraVerbose => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }

    pub fn is_trace(self) -> bool {
        self == Self::Trace
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Cli {
        #[clap(flatten)]
        verbosity: Verbosity,
    }

    fn level(args: &[&str]) -> VerbosityLevel {
        let args = std::iter::once("gif-inspect").chain(args.iter().copied());
        Cli::parse_from(args).verbosity.level()
    }

    #[test]
    fn counts_flags() {
        assert_eq!(level(&[]), VerbosityLevel::Default);
        assert_eq!(level(&["-v"]), VerbosityLevel::Verbose);
        assert_eq!(level(&["-vv"]), VerbosityLevel::ExtraVerbose);
        assert_eq!(level(&["-vvvv"]), VerbosityLevel::Trace);
        assert_eq!(level(&["-q"]), VerbosityLevel::Quiet);
        assert_eq!(level(&["-qq"]), VerbosityLevel::Silent);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(VerbosityLevel::Verbose > VerbosityLevel::Default);
        assert_eq!(VerbosityLevel::Silent.level_filter(), LevelFilter::OFF);
    }
}
