//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# call-lint configuration

[analyzer]
# Root directory to inspect (default: current directory)
# root = "./src"

# Glob patterns to exclude from inspection
exclude = [
    "**/target/**",
    "**/vendor/**",
]

# Inspection configurations
# Each inspection can be enabled/disabled and have its severity overridden

[rules.invoke-later]
enabled = true
# severity = "error"  # Override default severity
checked-classes = "java.lang.String;java.util.Date"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("call-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created call-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit call-lint.toml to configure inspections");
    println!("  2. Run: call-lint check");

    Ok(())
}
