//! `duet targets` command

use anyhow::Result;

use crate::cli::TargetsArgs;
use crate::commands::report;
use duet::ops::load_workspace;
use duet::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, _args: TargetsArgs) -> Result<()> {
    let ws = load_workspace(ctx).map_err(|e| report(e, ctx.color()))?;
    let platforms = ws.platforms();

    for target in platforms.targets() {
        let chain: Vec<String> = platforms
            .chain(&target)
            .map(|p| format!("*.{}.*", p.suffix))
            .chain(std::iter::once("fallback".to_string()))
            .collect();
        println!("{:<16} {}", target.name(), chain.join(" > "));
    }

    Ok(())
}
