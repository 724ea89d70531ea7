//! Duet CLI - platform-variant resolution for shared web and native code

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use duet::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("duet=debug")
    } else {
        EnvFilter::new("duet=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    if let Some(home) = std::env::var_os("DUET_HOME") {
        ctx = ctx.with_home(home.into());
    }
    ctx.set_verbose(cli.verbose);

    let config = ctx.load_config();
    let color = !cli.no_color && config.term.color.unwrap_or_else(|| std::io::stderr().is_terminal());
    ctx.set_color(color);

    match cli.command {
        Commands::Init(args) => commands::init::execute(&ctx, args),
        Commands::Resolve(args) => commands::resolve::execute(&ctx, &config, args),
        Commands::Plan(args) => commands::plan::execute(&ctx, &config, args),
        Commands::Check(args) => commands::check::execute(&ctx, args),
        Commands::Targets(args) => commands::targets::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
