//! `duet plan` command

use anyhow::{Context, Result};

use crate::cli::PlanArgs;
use crate::commands::report;
use duet::ops::{choose_target, load_workspace, plan_workspace, PlanOptions};
use duet::util::{Config, GlobalContext};

pub fn execute(ctx: &GlobalContext, config: &Config, args: PlanArgs) -> Result<()> {
    let target = choose_target(args.target.as_deref(), config)?;
    let ws = load_workspace(ctx).map_err(|e| report(e, ctx.color()))?;

    let opts = PlanOptions {
        target,
        output: args.output,
    };
    let plan = plan_workspace(&ws, &opts).map_err(|e| report(e, ctx.color()))?;

    if args.json {
        println!("{}", plan.to_json().context("failed to serialize build plan")?);
        return Ok(());
    }

    let width = plan
        .modules
        .keys()
        .map(|id| id.as_str().len())
        .max()
        .unwrap_or(0);

    for (identifier, entry) in &plan.modules {
        println!(
            "{:width$}  {}  ({})",
            identifier.as_str(),
            entry.artifact.display(),
            entry.variant,
            width = width
        );
    }
    for identifier in &plan.skipped {
        println!("{:width$}  -  (no artifact for `{}`)", identifier.as_str(), plan.target, width = width);
    }

    eprintln!(
        "    Planned {} module(s) for `{}`, {} skipped [{}]",
        plan.modules.len(),
        plan.target,
        plan.skipped.len(),
        plan.fingerprint.get(..12).unwrap_or(plan.fingerprint.as_str())
    );

    Ok(())
}
