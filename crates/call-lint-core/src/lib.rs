//! # call-lint-core
//!
//! Core framework for syntactic call inspections based on `syn` AST analysis.
//!
//! This crate plays the part of the host: it parses source files, drives the
//! traversal, persists configuration, and collects findings. Inspections plug
//! in through:
//!
//! - [`Inspection`] - the rule descriptor and visitor factory
//! - [`SourceVisitor`] - one pass of one inspection over one file
//! - [`ProblemsHolder`] - the sink visitors report findings to
//! - [`Analyzer`] - batch and single-buffer traversal driving
//!
//! ## Example
//!
//! ```ignore
//! use call_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .inspection(MyInspection::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod inspection;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use inspection::{Inspection, InspectionBox, ProblemsHolder, SourceVisitor};
pub use types::{Finding, FindingDiagnostic, InspectionResult, Location, Severity};
