//! The inspection contract: rule descriptors, visitors, and the problem sink.

use crate::types::{Finding, Location, Severity};
use std::path::{Path, PathBuf};

/// A visitor produced by an [`Inspection`] for one pass over one file.
///
/// The host drives the traversal by handing the parsed file to the visitor;
/// the visitor filters the nodes it cares about and registers findings with
/// the [`ProblemsHolder`] it was built with. Visitors hold no state across
/// nodes and may be discarded at any node boundary.
pub trait SourceVisitor {
    /// Walks the parsed file, reporting matches to the sink.
    fn visit_file(&mut self, ast: &syn::File);
}

/// Descriptor for a single inspection.
///
/// The descriptor exposes the inspection's identity and default
/// configuration, and acts as a factory for per-file visitors. The factory
/// must be callable repeatedly; each call yields an independent visitor whose
/// only shared state is the descriptor's own configuration, which visitors
/// read but never write. The factory must not perform I/O.
///
/// # Example
///
/// ```ignore
/// use call_lint_core::{Inspection, ProblemsHolder, SourceVisitor};
///
/// impl Inspection for MyInspection {
///     fn name(&self) -> &'static str { "my-inspection" }
///     fn code(&self) -> &'static str { "CL999" }
///     fn display_name(&self) -> &'static str { "My inspection" }
///
///     fn build_visitor<'a>(
///         &'a self,
///         holder: &'a mut ProblemsHolder,
///         on_the_fly: bool,
///     ) -> Box<dyn SourceVisitor + 'a> {
///         Box::new(MyVisitor { inspection: self, holder })
///     }
/// }
/// ```
pub trait Inspection: Send + Sync {
    /// Returns the stable, kebab-case identifier of this inspection
    /// (e.g., "invoke-later"). Used for configuration lookup.
    fn name(&self) -> &'static str;

    /// Returns the inspection code (e.g., "CL001").
    fn code(&self) -> &'static str;

    /// Returns the display group this inspection is presented under.
    fn group(&self) -> &'static str {
        "General"
    }

    /// Returns the short display name of this inspection.
    fn display_name(&self) -> &'static str;

    /// Returns a brief description of what this inspection reports.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for findings from this inspection.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Builds a fresh visitor for one pass over one file.
    ///
    /// # Arguments
    ///
    /// * `holder` - The sink the visitor reports findings to
    /// * `on_the_fly` - True when the pass runs interactively in an editor,
    ///   false for batch runs
    fn build_visitor<'a>(
        &'a self,
        holder: &'a mut ProblemsHolder,
        on_the_fly: bool,
    ) -> Box<dyn SourceVisitor + 'a>;
}

/// Type alias for boxed Inspection trait objects.
pub type InspectionBox = Box<dyn Inspection>;

/// The problem sink supplied to visitors.
///
/// Collects findings in the order they are registered. The holder never
/// deduplicates, reorders, or batches; one pass produces exactly the
/// registrations the visitor made, in dispatch order.
#[derive(Debug)]
pub struct ProblemsHolder {
    file: PathBuf,
    findings: Vec<Finding>,
}

impl ProblemsHolder {
    /// Creates a sink for one pass over the given file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            findings: Vec::new(),
        }
    }

    /// Returns the file this sink collects findings for.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Registers a finding against a node span.
    ///
    /// The description is stored verbatim; placeholder tokens such as `#loc`
    /// are left for the presentation layer to render.
    pub fn register_problem(
        &mut self,
        source: &dyn Inspection,
        span: proc_macro2::Span,
        description: impl Into<String>,
    ) {
        self.findings.push(Finding::new(
            source.code(),
            source.name(),
            source.default_severity(),
            Location::from_span(self.file.clone(), span),
            description,
        ));
    }

    /// Returns the findings registered so far.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consumes the sink, yielding the findings in registration order.
    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::visit::Visit;

    struct FlagEveryFn;

    struct FlagEveryFnVisitor<'a> {
        inspection: &'a FlagEveryFn,
        holder: &'a mut ProblemsHolder,
    }

    impl Inspection for FlagEveryFn {
        fn name(&self) -> &'static str {
            "flag-every-fn"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn display_name(&self) -> &'static str {
            "Flag every function"
        }

        fn build_visitor<'a>(
            &'a self,
            holder: &'a mut ProblemsHolder,
            _on_the_fly: bool,
        ) -> Box<dyn SourceVisitor + 'a> {
            Box::new(FlagEveryFnVisitor {
                inspection: self,
                holder,
            })
        }
    }

    impl SourceVisitor for FlagEveryFnVisitor<'_> {
        fn visit_file(&mut self, ast: &syn::File) {
            Visit::visit_file(self, ast);
        }
    }

    impl<'ast> Visit<'ast> for FlagEveryFnVisitor<'_> {
        fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
            self.holder
                .register_problem(self.inspection, node.sig.ident.span(), "function found");
            syn::visit::visit_item_fn(self, node);
        }
    }

    fn run(code: &str) -> Vec<Finding> {
        let ast = syn::parse_file(code).expect("test source should parse");
        let inspection = FlagEveryFn;
        let mut holder = ProblemsHolder::new("test.rs");
        {
            let mut visitor = inspection.build_visitor(&mut holder, true);
            visitor.visit_file(&ast);
        }
        holder.into_findings()
    }

    #[test]
    fn trait_defaults() {
        let inspection = FlagEveryFn;
        assert_eq!(inspection.group(), "General");
        assert_eq!(inspection.description(), "");
        assert_eq!(inspection.default_severity(), Severity::Warning);
    }

    #[test]
    fn holder_collects_in_dispatch_order() {
        let findings = run("fn a() {}\nfn b() {}\n");
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].location.line, 1);
        assert_eq!(findings[1].location.line, 2);
        assert_eq!(findings[0].code, "TEST001");
        assert_eq!(findings[0].rule, "flag-every-fn");
    }

    #[test]
    fn factory_yields_independent_visitors() {
        let first = run("fn a() {}\n");
        let second = run("fn a() {}\n");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn holder_tracks_file() {
        let holder = ProblemsHolder::new("src/main.rs");
        assert_eq!(holder.file(), Path::new("src/main.rs"));
        assert!(holder.findings().is_empty());
    }
}
