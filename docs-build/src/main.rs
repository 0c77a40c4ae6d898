#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::panic)]

use anyhow::Result;
use clap::Parser;
use docs_build_core::{cli, docs_build, DocsBuild};
use log::debug;
use std::env::args;

fn main() -> Result<()> {
    env_logger::init();

    let opts: DocsBuild = cli::Opts::parse_from(args()).into();

    debug!("{opts:?}");

    docs_build(&opts)
}
