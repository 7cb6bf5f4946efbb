use serde::Serialize;
use thiserror::Error;

/// Boxed error returned by external collaborators (renderer, compiler).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort an export call.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A provider identifier did not match any registered preset.
    #[error("Preset not found: {id}")]
    PresetNotFound {
        /// The identifier that was requested.
        id: String,
    },
    /// The document renderer failed; its error is surfaced as-is.
    #[error(transparent)]
    Render(BoxError),
    /// The markup compiler failed; its error is surfaced as-is.
    #[error(transparent)]
    Compile(BoxError),
    /// The HTML rewriter could not process the markup.
    #[error("Rewrite error: {0}")]
    Rewrite(String),
    /// A declarative preset descriptor was invalid.
    #[error("Preset config error: {0}")]
    Config(String),
}

impl ExportError {
    /// Create a preset-not-found error for `id`.
    pub fn preset_not_found(id: impl Into<String>) -> Self {
        Self::PresetNotFound { id: id.into() }
    }

    /// Wrap a renderer failure.
    pub fn render(err: impl Into<BoxError>) -> Self {
        Self::Render(err.into())
    }

    /// Wrap a compiler failure.
    pub fn compile(err: impl Into<BoxError>) -> Self {
        Self::Compile(err.into())
    }
}

impl From<lol_html::errors::RewritingError> for ExportError {
    fn from(err: lol_html::errors::RewritingError) -> Self {
        Self::Rewrite(err.to_string())
    }
}

/// A compiler-reported issue. Advisory only: diagnostics never abort an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Line number in the intermediate markup (1-indexed).
    pub line: usize,
    /// Compiler message.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_not_found_names_identifier() {
        let err = ExportError::preset_not_found("campaignr");
        assert_eq!(err.to_string(), "Preset not found: campaignr");
    }

    #[test]
    fn collaborator_errors_are_transparent() {
        let err = ExportError::compile("mj-column must be inside mj-section");
        assert_eq!(err.to_string(), "mj-column must be inside mj-section");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "renderer crashed");
        let err = ExportError::render(io);
        assert_eq!(err.to_string(), "renderer crashed");
    }

    #[test]
    fn diagnostic_display() {
        let diag = Diagnostic::new(12, "Attribute padding is illegal");
        assert_eq!(diag.to_string(), "line 12: Attribute padding is illegal");
    }
}
