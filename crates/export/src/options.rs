//! Per-call export options and the export result bundle.

use mailexport_core::Diagnostic;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Caller-supplied final transform of the exported HTML.
pub type WrapFn = Box<dyn Fn(String) -> String + Send + Sync>;

/// Configuration for a single export call.
pub struct ExportOptions {
    /// Literal substitutions keyed by exact variable name. These bypass the preset.
    pub merge_tag_overrides: HashMap<String, String>,
    /// Strip editor artifacts from the compiled HTML. Defaults to `true`.
    pub strip_editor_artifacts: bool,
    /// Applied to the HTML after every other step.
    pub wrap: Option<WrapFn>,
}

impl ExportOptions {
    /// Options with no overrides, stripping enabled, and no wrap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal override for `variable`.
    pub fn with_override(
        mut self,
        variable: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        self.merge_tag_overrides.insert(variable.into(), literal.into());
        self
    }

    /// Add several literal overrides.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.merge_tag_overrides
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Enable or disable stripping of the compiled HTML.
    pub fn with_strip_editor_artifacts(mut self, strip: bool) -> Self {
        self.strip_editor_artifacts = strip;
        self
    }

    /// Set the final wrap transform.
    pub fn with_wrap<F>(mut self, wrap: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.wrap = Some(Box::new(wrap));
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            merge_tag_overrides: HashMap::new(),
            strip_editor_artifacts: true,
            wrap: None,
        }
    }
}

impl fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportOptions")
            .field("merge_tag_overrides", &self.merge_tag_overrides)
            .field("strip_editor_artifacts", &self.strip_editor_artifacts)
            .field("wrap", &self.wrap.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// Final provider-ready HTML.
    pub html: String,
    /// Layout markup after stripping and merge-tag resolution, before compilation.
    pub intermediate_markup: String,
    /// Compiler issues, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExportResult {
    /// True when the compiler reported no issues.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
