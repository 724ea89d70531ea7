//! `duet init` command

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::cli::InitArgs;
use duet::core::MANIFEST_NAME;
use duet::ops::{init_package, InitOptions};
use duet::util::GlobalContext;

/// Package name from `--name`, else the directory name made valid.
///
/// Leading dots, hyphens and underscores are stripped and other invalid
/// characters become hyphens, so `.tmpXy1` yields `tmpXy1`.
pub fn determine_package_name(name: &Option<String>, path: &Path) -> String {
    if let Some(name) = name {
        return name.clone();
    }

    let dir = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let sanitized: String = dir
        .trim_start_matches(['.', '-', '_'])
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

/// Validates a package name for common issues.
pub fn validate_package_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("package name cannot be empty");
    }

    if name.starts_with('-') || name.starts_with('_') {
        return Err("package name cannot start with a hyphen or underscore");
    }

    if name.starts_with('.') {
        return Err("package name cannot start with a dot");
    }

    if name.chars().any(|c| !c.is_alphanumeric() && c != '-' && c != '_') {
        return Err("package name contains invalid characters");
    }

    Ok(())
}

pub fn execute(ctx: &GlobalContext, args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(p) if p.is_absolute() => p,
        Some(p) => ctx.cwd().join(p),
        None => ctx.cwd().to_path_buf(),
    };
    let path: PathBuf = path.components().collect();

    if path.join(MANIFEST_NAME).exists() {
        bail!("`{}` already exists in `{}`", MANIFEST_NAME, path.display());
    }

    let name = determine_package_name(&args.name, &path);
    if let Err(msg) = validate_package_name(&name) {
        bail!("invalid package name `{}`: {}", name, msg);
    }

    init_package(&path, &InitOptions { name: name.clone() })?;
    eprintln!("     Initialized `{}` package", name);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determine_package_name() {
        let path = PathBuf::from("/home/user/shared-ui");
        assert_eq!(determine_package_name(&None, &path), "shared-ui");
        assert_eq!(
            determine_package_name(&Some("app".to_string()), &path),
            "app"
        );
        assert_eq!(determine_package_name(&None, Path::new("")), "unnamed");
    }

    #[test]
    fn test_default_name_from_hidden_directory() {
        let name = determine_package_name(&None, Path::new("/tmp/.tmpAb3x"));
        assert_eq!(name, "tmpAb3x");
        assert!(validate_package_name(&name).is_ok());

        assert_eq!(determine_package_name(&None, Path::new("/w/_my ui")), "my-ui");
        assert_eq!(determine_package_name(&None, Path::new("/w/...")), "unnamed");
    }

    #[test]
    fn test_explicit_name_is_not_sanitized() {
        let name = determine_package_name(&Some(".app".to_string()), Path::new("/w/ui"));
        assert_eq!(name, ".app");
        assert!(validate_package_name(&name).is_err());
    }

    #[test]
    fn test_validate_package_name() {
        assert!(validate_package_name("shared_ui-2").is_ok());
        assert_eq!(validate_package_name(""), Err("package name cannot be empty"));
        assert!(validate_package_name("-x").unwrap_err().contains("hyphen"));
        assert!(validate_package_name(".x").unwrap_err().contains("dot"));
        assert!(validate_package_name("my app").unwrap_err().contains("invalid characters"));
    }

    #[test]
    fn test_init_in_temp_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        execute(
            &ctx,
            InitArgs {
                name: None,
                path: Some(PathBuf::from("my_ui")),
            },
        )
        .unwrap();

        let manifest = std::fs::read_to_string(tmp.path().join("my_ui/Duet.toml")).unwrap();
        assert!(manifest.contains("name = \"my_ui\""));
    }

    #[test]
    fn test_existing_manifest_reported_before_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join(".hidden");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(MANIFEST_NAME), "[package]\nname = \"x\"\n").unwrap();

        let ctx = GlobalContext::with_cwd(dir);
        let err = execute(
            &ctx,
            InitArgs {
                name: Some(".bad".to_string()),
                path: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
