//! List rules command implementation.

use call_lint_rules::all_inspections;

/// Runs the list-rules command.
pub fn run() {
    println!("Available inspections:\n");
    println!("{:<10} {:<20} {:<16} Description", "Code", "Name", "Group");
    println!("{}", "-".repeat(80));

    for inspection in all_inspections() {
        println!(
            "{:<10} {:<20} {:<16} {}",
            inspection.code(),
            inspection.name(),
            inspection.group(),
            inspection.description()
        );
    }

    println!("\nConfigure inspections in call-lint.toml, e.g.:");
    println!("  [rules.invoke-later]");
    println!("  checked-classes = \"java.lang.String;java.util.Date\"");
}
