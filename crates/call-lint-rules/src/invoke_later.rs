//! Inspection that reports calls to `SwingUtilities.invokeLater`.
//!
//! # Matching
//!
//! The match is syntactic, not semantic: the textual qualified form of the
//! call target is compared for exact equality against the pattern. Calls made
//! through an intermediate variable, through an unqualified import, or
//! through a different qualifier do not match. Qualified names are rendered
//! dot-separated, the same form the configuration format uses, so both the
//! `SwingUtilities.invokeLater(r)` and `SwingUtilities::invokeLater(r)` call
//! shapes match.
//!
//! # Configuration
//!
//! - `checked-classes`: semicolon-separated fully qualified type names
//!   consulted by [`InvokeLater::is_checked_type`]
//!   (default: `"java.lang.String;java.util.Date"`)

use call_lint_core::{Inspection, ProblemsHolder, Severity, SourceVisitor};
use std::sync::RwLock;
use syn::spanned::Spanned;
use syn::visit::Visit;
use syn::{Expr, ExprCall, ExprMethodCall};

/// Inspection code for invoke-later.
pub const CODE: &str = "CL001";

/// Inspection name for invoke-later.
pub const NAME: &str = "invoke-later";

/// Default value of the checked-class list.
pub const DEFAULT_CHECKED_CLASSES: &str = "java.lang.String;java.util.Date";

const MATCH_PATTERN: &str = "SwingUtilities.invokeLater";

const DESCRIPTION_TEMPLATE: &str = "May produce NullPointerException #loc";

/// Reports call expressions whose qualified callee text equals
/// `SwingUtilities.invokeLater`.
///
/// The checked-class list is shared between the descriptor and its visitors:
/// edits replace the whole string, and readers capture the whole value before
/// tokenizing, so a visitor sees either the pre-edit or the post-edit list,
/// never a torn one.
#[derive(Debug)]
pub struct InvokeLater {
    /// Semicolon-separated fully qualified type names, stored verbatim.
    checked_classes: RwLock<String>,
    /// Severity used for findings.
    severity: Severity,
}

impl Default for InvokeLater {
    fn default() -> Self {
        Self::new()
    }
}

impl InvokeLater {
    /// Creates a new inspection with the default checked-class list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checked_classes: RwLock::new(DEFAULT_CHECKED_CLASSES.to_string()),
            severity: Severity::Warning,
        }
    }

    /// Sets the checked-class list at construction.
    #[must_use]
    pub fn with_checked_classes(self, raw: impl Into<String>) -> Self {
        self.set_checked_classes(raw);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the checked-class list exactly as stored.
    #[must_use]
    pub fn checked_classes(&self) -> String {
        match self.checked_classes.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the checked-class list with the given raw text, verbatim.
    ///
    /// No trimming, reordering, or canonicalization is applied; what the user
    /// typed is what gets persisted and what later reads see.
    pub fn set_checked_classes(&self, raw: impl Into<String>) {
        match self.checked_classes.write() {
            Ok(mut guard) => *guard = raw.into(),
            Err(poisoned) => *poisoned.into_inner() = raw.into(),
        }
    }

    /// Returns true iff the type is a plain path type whose dotted textual
    /// form appears as a `;`-separated token of the checked-class list.
    ///
    /// Tokens are compared verbatim: no trimming, no case folding. Empty
    /// tokens (from a trailing or doubled delimiter) match nothing. Types
    /// without a qualified class form (references, pointers, slices, tuples,
    /// qualified-self paths) never match. The list is re-read on every call,
    /// so edits take effect without rebuilding the inspection.
    #[must_use]
    pub fn is_checked_type(&self, ty: &syn::Type) -> bool {
        let syn::Type::Path(type_path) = ty else {
            return false;
        };
        if type_path.qself.is_some() {
            return false;
        }
        let canonical = dotted_path(&type_path.path);

        let raw = self.checked_classes();
        raw.split(';')
            .filter(|token| !token.is_empty())
            .any(|token| token == canonical)
    }
}

impl Inspection for InvokeLater {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn group(&self) -> &'static str {
        "Probable bugs"
    }

    fn display_name(&self) -> &'static str {
        "Invoke later"
    }

    fn description(&self) -> &'static str {
        "Reports call expressions whose qualified callee is SwingUtilities.invokeLater"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn build_visitor<'a>(
        &'a self,
        holder: &'a mut ProblemsHolder,
        on_the_fly: bool,
    ) -> Box<dyn SourceVisitor + 'a> {
        tracing::debug!(on_the_fly, "building invoke-later visitor");
        Box::new(InvokeLaterVisitor {
            inspection: self,
            holder,
        })
    }
}

struct InvokeLaterVisitor<'a> {
    inspection: &'a InvokeLater,
    holder: &'a mut ProblemsHolder,
}

impl InvokeLaterVisitor<'_> {
    /// Registers a finding when the qualified callee text equals the match
    /// pattern. A callee with no qualified form is a silent skip: unresolved
    /// references are a normal intermediate state while editing.
    fn on_call_expression(&mut self, qualified: Option<String>, span: proc_macro2::Span) {
        let Some(qualified) = qualified else {
            return;
        };
        if qualified == MATCH_PATTERN {
            self.holder
                .register_problem(self.inspection, span, DESCRIPTION_TEMPLATE);
        }
    }
}

impl SourceVisitor for InvokeLaterVisitor<'_> {
    fn visit_file(&mut self, ast: &syn::File) {
        Visit::visit_file(self, ast);
    }
}

impl<'ast> Visit<'ast> for InvokeLaterVisitor<'_> {
    fn visit_expr_call(&mut self, node: &'ast ExprCall) {
        self.on_call_expression(qualified_callee(&node.func), node.span());
        syn::visit::visit_expr_call(self, node);
    }

    fn visit_expr_method_call(&mut self, node: &'ast ExprMethodCall) {
        let qualified =
            qualified_callee(&node.receiver).map(|q| format!("{q}.{}", node.method));
        self.on_call_expression(qualified, node.span());
        syn::visit::visit_expr_method_call(self, node);
    }
}

/// Renders the qualified textual form of a call target, or `None` when the
/// expression has no qualified form (anything other than a plain path).
fn qualified_callee(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Path(path) if path.qself.is_none() => Some(dotted_path(&path.path)),
        _ => None,
    }
}

/// Joins path segments with `.`, the separator used by the configuration
/// format. Generic arguments carry no qualification and are ignored.
fn dotted_path(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
