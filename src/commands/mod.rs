mod check;
mod inspect;
mod versions;

use crate::context::Context;

pub trait Run {
    fn run(&self, ctx: &mut Context) -> anyhow::Result<()>;
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Print the header and logical screen descriptor of each GIF.
    Inspect(inspect::Inspect),

    /// Validate that each file starts with a supported GIF header.
    Check(check::Check),

    /// List the GIF versions that will be accepted.
    Versions(versions::Versions),
}

impl Subcommand {
    pub fn run(&self, ctx: &mut Context) -> anyhow::Result<()> {
        let handler: &dyn Run = match *self {
            Self::Inspect(ref inner) => inner,
            Self::Check(ref inner) => inner,
            Self::Versions(ref inner) => inner,
        };

        handler.run(ctx)
    }
}
