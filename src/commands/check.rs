use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::anyhow;
use colored::Colorize as _;

use crate::commands::Run;
use crate::commands::inspect::{parse_files, report_failure};
use crate::context::Context;

#[derive(Debug, Clone, clap::Args)]
pub struct Check {
    /// Files to validate.
    #[clap(required = true)]
    paths: Vec<PathBuf>,
}

impl Run for Check {
    fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let parser = ctx.header_parser()?;
        let mut stdout = io::stdout().lock();
        let mut error_count = 0;

        for (path, result) in parse_files(&parser, &self.paths) {
            match result {
                Ok((header, screen)) => {
                    writeln!(
                        stdout,
                        "{} {} (GIF{}, {}x{})",
                        "ok".bold().green(),
                        path.display(),
                        header.version(),
                        screen.width(),
                        screen.height(),
                    )?;
                }
                Err(err) => {
                    report_failure(ctx.level, &path, &err)?;
                    error_count += 1;
                }
            }
        }

        if error_count > 0 {
            Err(anyhow!("({error_count}) of ({}) files are not valid GIFs", self.paths.len()))
        } else {
            Ok(())
        }
    }
}
