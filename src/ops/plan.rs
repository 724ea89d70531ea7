//! Whole-target build plans.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::Workspace;
use crate::ops::resolve::load_mapping;
use crate::resolver::BuildPlan;
use crate::util::fs::write_string;

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub target: String,

    /// Also write the plan as JSON to this path
    pub output: Option<PathBuf>,
}

/// Resolve every module in the workspace for one target.
pub fn plan_workspace(ws: &Workspace, opts: &PlanOptions) -> Result<BuildPlan> {
    let target = ws.platforms().target(&opts.target)?;
    let mapping = load_mapping(ws)?;
    let plan = mapping.plan(&target)?;

    if let Some(ref output) = opts.output {
        let json = plan.to_json().context("failed to serialize build plan")?;
        write_string(output, &json)?;
        tracing::info!("wrote plan for `{}` to {}", target, output.display());
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModuleIdentifier;
    use crate::resolver::PlanError;
    use crate::test_support::TreeFixture;
    use tempfile::TempDir;

    #[test]
    fn test_plan_workspace_writes_json() {
        let tmp = TempDir::new().unwrap();
        let manifest = TreeFixture::new()
            .file("button.tsx")
            .file("button.web.tsx")
            .file("camera.native.tsx")
            .write_to(tmp.path());
        let ws = Workspace::load(&manifest).unwrap();

        let output = tmp.path().join(".duet/plans/web.json");
        let plan = plan_workspace(
            &ws,
            &PlanOptions {
                target: "web".to_string(),
                output: Some(output.clone()),
            },
        )
        .unwrap();

        let button = ModuleIdentifier::new("button").unwrap();
        assert_eq!(plan.get(&button).unwrap().artifact, PathBuf::from("src/button.web.tsx"));
        assert_eq!(plan.skipped, [ModuleIdentifier::new("camera").unwrap()]);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written["target"], "web");
        assert_eq!(written["fingerprint"], plan.fingerprint);
    }

    #[test]
    fn test_plan_workspace_reports_duplicates() {
        let tmp = TempDir::new().unwrap();
        let manifest = TreeFixture::new()
            .file("button.web.tsx")
            .file("button.web.js")
            .write_to(tmp.path());
        let ws = Workspace::load(&manifest).unwrap();

        let err = plan_workspace(
            &ws,
            &PlanOptions {
                target: "web".to_string(),
                output: None,
            },
        )
        .unwrap_err();
        let plan_err = err.downcast_ref::<PlanError>().unwrap();
        assert_eq!(plan_err.errors.len(), 1);
    }
}
