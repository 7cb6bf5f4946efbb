//! The contract every export target implements.

use std::fmt;

/// Describes one target email provider (ESP).
///
/// A preset is immutable once constructed. `transform_tag` must be total: any
/// syntactically valid variable name yields a non-empty substitution, with
/// unrecognized names falling through to a provider-specific pattern.
/// Both methods must be deterministic for identical input.
pub trait Preset: Send + Sync {
    /// Stable short identifier, unique within a registry.
    fn id(&self) -> &str;

    /// Human-readable label.
    fn name(&self) -> &str;

    /// Translate a merge-tag variable into the provider's substitution syntax.
    fn transform_tag(&self, variable: &str) -> String;

    /// Final structural adjustment of the compiled HTML.
    ///
    /// The default passes the markup through unchanged.
    fn post_process(&self, html: String) -> String {
        html
    }
}

impl fmt::Debug for dyn Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}
