use anyhow::{Context, Result};
use clap::Parser;
use retroboy_i8080_cli::Args;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::info!("Running program: '{}'", args.program.display());
    let program = std::fs::read(&args.program)
        .with_context(|| format!("Failed to read program '{}'", args.program.display()))?;

    retroboy_i8080_cli::run(&program, &args.options())?;
    Ok(())
}
