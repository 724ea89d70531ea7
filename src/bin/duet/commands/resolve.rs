//! `duet resolve` command

use anyhow::Result;

use crate::cli::ResolveArgs;
use crate::commands::report;
use duet::ops::{choose_target, load_workspace, resolve_module};
use duet::util::fs::relative_path;
use duet::util::{Config, GlobalContext};

pub fn execute(ctx: &GlobalContext, config: &Config, args: ResolveArgs) -> Result<()> {
    let target = choose_target(args.target.as_deref(), config)?;
    let ws = load_workspace(ctx).map_err(|e| report(e, ctx.color()))?;

    let resolution =
        resolve_module(&ws, &args.identifier, &target).map_err(|e| report(e, ctx.color()))?;

    if ctx.is_verbose() {
        eprintln!(
            "    Resolved `{}` for `{}` ({})",
            resolution.identifier, resolution.target, resolution.variant
        );
    }
    println!("{}", relative_path(ctx.cwd(), &resolution.absolute).display());

    Ok(())
}
