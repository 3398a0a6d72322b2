use anyhow::Result;
use clap::Parser;

mod args;

use args::Cli;
use bufint_cli::commands::calc::{self, Radix};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    let radix = if cli.hex { Radix::Hex } else { Radix::Decimal };
    calc::calc_command(&cli.a, &cli.op, &cli.b, radix, cli.width)
}
