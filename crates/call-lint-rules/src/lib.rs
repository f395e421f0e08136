//! # call-lint-rules
//!
//! Built-in inspections for call-lint.
//!
//! ## Available inspections
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CL001 | `invoke-later` | Reports calls whose qualified callee is `SwingUtilities.invokeLater` |
//!
//! ## Usage
//!
//! ```ignore
//! use call_lint_core::Analyzer;
//! use call_lint_rules::InvokeLater;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .inspection(InvokeLater::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod invoke_later;

pub use invoke_later::{InvokeLater, CODE, DEFAULT_CHECKED_CLASSES, NAME};

/// Re-export core types for convenience.
pub use call_lint_core::{Inspection, InspectionBox, Severity};

/// Returns every built-in inspection with default settings.
#[must_use]
pub fn all_inspections() -> Vec<InspectionBox> {
    vec![Box::new(InvokeLater::new())]
}
