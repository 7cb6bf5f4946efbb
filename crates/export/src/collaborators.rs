//! Seams for the external document renderer and markup compiler.

use async_trait::async_trait;
use mailexport_core::{BoxError, Diagnostic};

/// Turns a document into intermediate layout markup.
pub trait Renderer<D: ?Sized>: Send + Sync {
    /// Render `document` to layout markup.
    fn render(&self, document: &D) -> Result<String, BoxError>;
}

impl<D, F> Renderer<D> for F
where
    D: ?Sized,
    F: Fn(&D) -> Result<String, BoxError> + Send + Sync,
{
    fn render(&self, document: &D) -> Result<String, BoxError> {
        (self)(document)
    }
}

/// Output of a markup compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    /// Compiled HTML.
    pub html: String,
    /// Issues reported by the compiler, in order. Empty means a clean compile.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    /// A clean compile result.
    pub fn clean(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            diagnostics: Vec::new(),
        }
    }
}

/// Compiles intermediate layout markup into final HTML.
///
/// Diagnostics are returned in [`CompileOutput`]; an `Err` is reserved for
/// failures that prevent producing any HTML.
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Compile `markup`.
    async fn compile(&self, markup: &str) -> Result<CompileOutput, BoxError>;
}
