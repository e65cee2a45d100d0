//! This crate contains the source code for the binary that prints the animated solution of a daily
//! maze.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use labyrintrace::{
    config::{init_logging, Args},
    run,
};

fn main() -> Result<()> {
    install()?;

    let args = Args::parse();
    init_logging(&args);
    println!("{}", run(&args)?);

    Ok(())
}
