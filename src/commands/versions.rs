use std::io::{self, Write as _};

use crate::commands::Run;
use crate::context::Context;

#[derive(Debug, Clone, clap::Args)]
pub struct Versions;

impl Run for Versions {
    fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let parser = ctx.header_parser()?;
        let mut stdout = io::stdout().lock();

        for version in parser.versions().versions() {
            writeln!(stdout, "GIF{version}")?;
        }

        Ok(())
    }
}
