#![deny(missing_docs)]
//! Provider-targeted email export.
//!
//! Renders a document to layout markup, resolves merge tags into the target
//! provider's syntax, compiles to HTML, and applies the provider's structural
//! fixes.
//!
//! ```ignore
//! use mailexport::{ExportOptions, Exporter};
//!
//! let exporter = Exporter::new(renderer, compiler);
//! let result = exporter
//!     .export(&document, "mailchimp", ExportOptions::default())
//!     .await?;
//! assert!(result.is_clean());
//! ```

/// Renderer and compiler seams.
pub mod collaborators;
/// Export options and results.
pub mod options;
/// The export orchestrator.
pub mod pipeline;
/// Per-provider entry points.
pub mod providers;

pub use collaborators::{CompileOutput, Compiler, Renderer};
pub use options::{ExportOptions, ExportResult, WrapFn};
pub use pipeline::{Exporter, export};

pub use mailexport_core::{BoxError, Diagnostic, ExportError, Preset};
pub use mailexport_presets::{PresetConfig, PresetRef, PresetRegistry, TablePreset, ids};
