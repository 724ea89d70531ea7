//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Duet - platform-variant resolution for code shared between web and native
#[derive(Parser)]
#[command(name = "duet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a Duet.toml in an existing directory
    Init(InitArgs),

    /// Print the artifact a module resolves to for a target
    Resolve(ResolveArgs),

    /// Resolve every module for a target
    Plan(PlanArgs),

    /// Report duplicate artifacts and coverage gaps
    Check(CheckArgs),

    /// List the configured platforms and their precedence
    Targets(TargetsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Package name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Module identifier (e.g. `components/toggle-theme`)
    pub identifier: String,

    /// Platform target (defaults to `default-target` from config)
    #[arg(short, long, env = "DUET_TARGET")]
    pub target: Option<String>,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Platform target (defaults to `default-target` from config)
    #[arg(short, long, env = "DUET_TARGET")]
    pub target: Option<String>,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON plan to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Args)]
pub struct TargetsArgs {}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::parse_from(["duet", "resolve", "components/button", "--target", "web"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.identifier, "components/button");
                assert_eq!(args.target.as_deref(), Some("web"));
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["duet", "check", "--verbose", "--no-color"]);
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_plan_flags() {
        let cli = Cli::parse_from(["duet", "plan", "-t", "native", "--json", "-o", "plan.json"]);
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.target.as_deref(), Some("native"));
                assert!(args.json);
                assert_eq!(args.output, Some(PathBuf::from("plan.json")));
            }
            _ => panic!("expected plan"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
