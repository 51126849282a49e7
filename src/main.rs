//! Album CLI: thumbnail, rotate, caption and publish a batch of images.

use album::engine::arg_parser::Cli;
use album::engine::handle_run;
use anyhow::Result;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
