//! `duet check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use crate::commands::report;
use duet::ops::{check_workspace, load_workspace};
use duet::util::diagnostic::emit;
use duet::util::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: CheckArgs) -> Result<()> {
    let ws = load_workspace(ctx).map_err(|e| report(e, ctx.color()))?;
    let result = check_workspace(&ws)?;

    for diag in &result.diagnostics {
        emit(diag, ctx.color());
    }

    let errors = result.errors().count();
    let warnings = result.warnings().count();

    if errors > 0 {
        bail!("`{}` has {} error(s) and {} warning(s)", ws.name(), errors, warnings);
    }
    if warnings > 0 && args.deny_warnings {
        bail!("`{}` has {} warning(s) (denied)", ws.name(), warnings);
    }

    eprintln!(
        "    Checked `{}`: {} module(s) across {} target(s), {} warning(s)",
        ws.name(),
        result.modules,
        result.targets,
        warnings
    );
    Ok(())
}
