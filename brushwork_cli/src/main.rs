#![warn(clippy::all, clippy::pedantic)]

mod build;
mod entities;

use build::{build, Build};
use entities::{entities, Entities};

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[clap(version = "0.1.0")]
struct Opts {
    /// Log debug output. `RUST_LOG` overrides this.
    #[clap(short, long)]
    verbose: bool,
    #[clap(subcommand)]
    subcommand: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    Entities(Entities),
    Build(Build),
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let level = if opts.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into())),
        )
        .init();

    match opts.subcommand {
        SubCommand::Entities(opts) => entities(&opts),
        SubCommand::Build(opts) => build(&opts),
    }
}
