//! Check command implementation.

use anyhow::{Context, Result};
use call_lint_core::{Analyzer, Config};
use call_lint_rules::{InvokeLater, NAME};
use std::path::Path;

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(path, config_path)?;

    // The inspection reads its checked-class list from its own config section.
    let rule = InvokeLater::new();
    if let Some(rule_config) = config.rules.get(NAME) {
        if let Some(raw) = rule_config.get_option::<String>("checked-classes") {
            rule.set_checked_classes(raw);
        }
    }

    let mut builder = Analyzer::builder().root(path).config(config).inspection(rule);

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Inspecting {:?} with {} inspection(s)",
        path,
        analyzer.inspection_count()
    );

    let result = analyzer.analyze().context("Inspection pass failed")?;

    super::output::print(&result, format)?;

    // Exit with error code if there are error-severity findings
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Resolves the configuration: an explicit `--config` path wins, otherwise
/// `call-lint.toml` next to the inspected path, otherwise defaults.
fn resolve_config(path: &Path, config_path: Option<&Path>) -> Result<Config> {
    if let Some(explicit) = config_path {
        return Config::from_file(explicit)
            .with_context(|| format!("Failed to load config: {}", explicit.display()));
    }

    let local = path.join("call-lint.toml");
    if local.exists() {
        tracing::info!("Using config: {}", local.display());
        return Config::from_file(&local)
            .with_context(|| format!("Failed to load config: {}", local.display()));
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_local_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = resolve_config(dir.path(), None).expect("defaults");
        assert!(config.rules.is_empty());
    }

    #[test]
    fn local_config_is_picked_up() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            dir.path().join("call-lint.toml"),
            "[rules.invoke-later]\nchecked-classes = \"a.B\"\n",
        )
        .expect("write config");

        let config = resolve_config(dir.path(), None).expect("load config");
        let rule_config = config.rules.get("invoke-later").expect("rule section");
        assert_eq!(rule_config.get_str("checked-classes", ""), "a.B");
    }

    #[test]
    fn explicit_config_wins() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[rules.invoke-later]\nenabled = false\n")
            .expect("write config");
        std::fs::write(dir.path().join("call-lint.toml"), "").expect("write local config");

        let config = resolve_config(dir.path(), Some(explicit.as_path())).expect("load config");
        assert!(!config.is_rule_enabled("invoke-later"));
    }
}
