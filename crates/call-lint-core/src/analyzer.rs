//! The host driver that parses files and dispatches them to inspections.

use crate::config::Config;
use crate::inspection::{Inspection, InspectionBox, ProblemsHolder};
use crate::types::{Finding, InspectionResult};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while driving an inspection pass.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a Rust source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    inspections: Vec<InspectionBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to inspect.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Registers an inspection.
    #[must_use]
    pub fn inspection<I: Inspection + 'static>(mut self, inspection: I) -> Self {
        self.inspections.push(Box::new(inspection));
        self
    }

    /// Registers a boxed inspection.
    #[must_use]
    pub fn inspection_box(mut self, inspection: InspectionBox) -> Self {
        self.inspections.push(inspection);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
        }

        if exclude_patterns.is_empty() {
            exclude_patterns.extend(["**/target/**".to_string(), "**/vendor/**".to_string()]);
        }

        Ok(Analyzer {
            root,
            inspections: self.inspections,
            exclude_patterns,
            config: self.config.unwrap_or_default(),
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Drives inspection passes over source files.
///
/// The analyzer owns what the original host owns: file discovery, parsing,
/// traversal scheduling, and the collection of findings. Inspections only see
/// parsed files through the visitors they build.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    inspections: Vec<InspectionBox>,
    exclude_patterns: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being inspected.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered inspections.
    #[must_use]
    pub fn inspection_count(&self) -> usize {
        self.inspections.len()
    }

    /// Runs a batch pass over all discovered files.
    ///
    /// Batch passes build visitors with `on_the_fly = false`. Findings are
    /// sorted by file, line, and column for the final report; within one file
    /// and one inspection they keep dispatch order.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, or if a file fails to parse
    /// and the analyzer was built with `fail_on_parse_error`.
    pub fn analyze(&self) -> Result<InspectionResult, AnalyzerError> {
        info!("Starting inspection pass at {:?}", self.root);

        let mut result = InspectionResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to inspect", files.len());

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(findings) => {
                    result.findings.extend(findings);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.findings.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Inspection pass complete: {} findings in {} files",
            result.findings.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs an interactive pass over a single in-memory buffer.
    ///
    /// This is the editor-driven mode: visitors are built with
    /// `on_the_fly = true` and findings keep pure dispatch order.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the buffer is not valid Rust.
    pub fn analyze_source(
        &self,
        name: impl Into<PathBuf>,
        content: &str,
    ) -> Result<Vec<Finding>, AnalyzerError> {
        let name = name.into();
        let ast = syn::parse_file(content).map_err(|e| AnalyzerError::Parse {
            path: name.clone(),
            message: e.to_string(),
        })?;
        Ok(self.run_inspections(&name, &ast, true))
    }

    /// Inspects a single file on disk.
    fn analyze_file(&self, path: &Path) -> Result<Vec<Finding>, AnalyzerError> {
        debug!("Inspecting: {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let ast = syn::parse_file(&content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let relative = path
            .strip_prefix(&self.root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Ok(self.run_inspections(&relative, &ast, false))
    }

    /// Builds a fresh visitor per enabled inspection and drives it over the
    /// parsed file.
    fn run_inspections(&self, file: &Path, ast: &syn::File, on_the_fly: bool) -> Vec<Finding> {
        let mut findings = Vec::new();

        for inspection in &self.inspections {
            if !self.config.is_rule_enabled(inspection.name()) {
                debug!("Skipping disabled inspection: {}", inspection.name());
                continue;
            }

            let mut holder = ProblemsHolder::new(file);
            {
                let mut visitor = inspection.build_visitor(&mut holder, on_the_fly);
                visitor.visit_file(ast);
            }

            let mut inspection_findings = holder.into_findings();
            if let Some(severity) = self.config.rule_severity(inspection.name()) {
                for finding in &mut inspection_findings {
                    finding.severity = severity;
                }
            }
            findings.extend(inspection_findings);
        }

        findings
    }

    /// Discovers all Rust source files to inspect.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let pattern = format!("{}/**/*.rs", self.root.display());
        let mut files = Vec::new();

        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| AnalyzerError::Io(e.into_error()))?;

            if self.should_exclude(&path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path);
        }

        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/target/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty() && path_str.contains(&normalized_pattern) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::SourceVisitor;

    struct Inert;

    impl Inspection for Inert {
        fn name(&self) -> &'static str {
            "inert"
        }
        fn code(&self) -> &'static str {
            "TEST000"
        }
        fn display_name(&self) -> &'static str {
            "Inert"
        }
        fn build_visitor<'a>(
            &'a self,
            _holder: &'a mut ProblemsHolder,
            _on_the_fly: bool,
        ) -> Box<dyn SourceVisitor + 'a> {
            struct Noop;
            impl SourceVisitor for Noop {
                fn visit_file(&mut self, _ast: &syn::File) {}
            }
            Box::new(Noop)
        }
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .inspection(Inert)
            .exclude("**/target/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.inspection_count(), 1);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/target/**")
            .exclude("**/vendor/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/target/debug/main.rs")));
        assert!(analyzer.should_exclude(Path::new("/foo/vendor/lib.rs")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/lib.rs")));
    }

    #[test]
    fn test_analyze_source_rejects_invalid_rust() {
        let analyzer = Analyzer::builder()
            .root(".")
            .inspection(Inert)
            .build()
            .expect("Failed to build analyzer");

        let err = analyzer
            .analyze_source("broken.rs", "fn {")
            .expect_err("should fail to parse");
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }

    #[test]
    fn test_disabled_inspection_is_skipped() {
        let config = Config::parse("[rules.inert]\nenabled = false\n").expect("valid toml");
        let analyzer = Analyzer::builder()
            .root(".")
            .inspection(Inert)
            .config(config)
            .build()
            .expect("Failed to build analyzer");

        let findings = analyzer
            .analyze_source("ok.rs", "fn main() {}")
            .expect("should parse");
        assert!(findings.is_empty());
    }
}
