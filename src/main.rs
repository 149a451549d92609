#![allow(dead_code)]

mod cli;
mod application;
mod domain;
mod data;
mod ml;
mod quiz;
mod infra;

use anyhow::Result;
use cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("story_quiz=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
