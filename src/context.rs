use gif_header::de::HeaderParser;

use crate::config::Config;
use crate::verbosity::VerbosityLevel;

#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: Config,
    pub level: VerbosityLevel,
}

impl Context {
    pub fn new(config: Config, level: VerbosityLevel) -> Self {
        Self { config, level }
    }

    /// Build a parser that honours the configured version allow-list.
    pub fn header_parser(&self) -> anyhow::Result<HeaderParser> {
        self.config.allow_list().map(HeaderParser::with_versions)
    }
}
