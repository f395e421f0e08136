//! Core types for inspection findings and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity level for inspection findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail a check run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to the inspected root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location from span information.
    #[must_use]
    pub fn from_span(file: PathBuf, span: proc_macro2::Span) -> Self {
        let start = span.start();
        Self {
            file,
            line: start.line,
            column: start.column + 1,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A finding reported by an inspection.
///
/// A finding pairs a source location with a human-readable description.
/// Description templates may carry the literal token `#loc`, which the
/// presentation layer renders as a location suffix; the sink stores the
/// template verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Inspection code (e.g., "CL001").
    pub code: String,
    /// Inspection name (e.g., "invoke-later").
    pub rule: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Location of the flagged node.
    pub location: Location,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
        }
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}:{}:{}\n",
            self.code,
            self.rule,
            self.location.file.display(),
            self.location.line,
            self.location.column,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        output
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Converts a Finding to a miette Diagnostic for rich error display.
#[allow(dead_code)] // Public API for miette integration
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Finding> for FindingDiagnostic {
    fn from(finding: &Finding) -> Self {
        Self {
            message: format!("[{}] {}", finding.code, finding.message),
            span: SourceSpan::from((finding.location.offset, finding.location.length)),
            label_message: finding.rule.clone(),
        }
    }
}

/// Result of running an inspection pass.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InspectionResult {
    /// All findings, in dispatch order per file.
    pub findings: Vec<Finding>,
    /// Number of files inspected.
    pub files_checked: usize,
}

impl InspectionResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any error-severity findings.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Returns true if there are any warnings or errors.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(|f| f.severity >= Severity::Warning)
    }

    /// Returns findings filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Counts findings by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let errors = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .count();
        let infos = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Info)
            .count();
        (errors, warnings, infos)
    }

    /// Prints a summary report to stdout.
    pub fn print_report(&self) {
        let (errors, warnings, infos) = self.count_by_severity();

        for finding in &self.findings {
            println!("{}", finding.format());
        }

        println!(
            "\nFound {} error(s), {} warning(s), {} info(s) in {} file(s)",
            errors, warnings, infos, self.files_checked
        );
    }

    /// Adds findings from another result.
    pub fn extend(&mut self, other: Self) {
        self.findings.extend(other.findings);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(severity: Severity) -> Finding {
        Finding::new(
            "CL001",
            "invoke-later",
            severity,
            Location::new(PathBuf::from("src/lib.rs"), 42, 10),
            "May produce NullPointerException #loc",
        )
    }

    #[test]
    fn finding_format_has_code_and_location() {
        let f = make_finding(Severity::Warning);
        let formatted = f.format();
        assert!(formatted.contains("CL001 invoke-later at src/lib.rs:42:10"));
        assert!(formatted.contains("warning: May produce NullPointerException #loc"));
    }

    #[test]
    fn finding_message_keeps_loc_token_verbatim() {
        let f = make_finding(Severity::Warning);
        assert!(f.message.ends_with("#loc"));
    }

    #[test]
    fn finding_display_is_compact() {
        let f = make_finding(Severity::Error);
        let display = format!("{f}");
        assert_eq!(
            display,
            "src/lib.rs:42:10: error [CL001] May produce NullPointerException #loc"
        );
    }

    #[test]
    fn result_counts_by_severity() {
        let mut result = InspectionResult::new();
        result.findings.push(make_finding(Severity::Warning));
        result.findings.push(make_finding(Severity::Error));
        result.findings.push(make_finding(Severity::Warning));

        assert_eq!(result.count_by_severity(), (1, 2, 0));
        assert!(result.has_errors());
        assert!(result.has_warnings());
    }

    #[test]
    fn result_without_errors() {
        let mut result = InspectionResult::new();
        result.findings.push(make_finding(Severity::Warning));
        assert!(!result.has_errors());
        assert!(result.has_warnings());
        assert_eq!(result.by_severity(Severity::Warning).len(), 1);
    }

    #[test]
    fn diagnostic_conversion_keeps_code_in_message() {
        let f = make_finding(Severity::Warning);
        let diag = FindingDiagnostic::from(&f);
        assert!(format!("{diag}").contains("[CL001]"));
    }
}
