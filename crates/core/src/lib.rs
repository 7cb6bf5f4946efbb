#![deny(missing_docs)]
//! mailexport core: the preset contract, merge-tag resolution, and editor-artifact cleanup.

/// Editor-artifact stripping for layout markup and compiled HTML.
pub mod artifacts;
/// Core error and diagnostic types.
pub mod error;
/// Merge-tag scanning and substitution.
pub mod merge_tags;
/// The provider preset contract.
pub mod preset;

pub use artifacts::{EDITOR_TOKEN_PREFIX, is_editor_token, strip_editor_artifacts};
pub use error::{BoxError, Diagnostic, ExportError};
pub use merge_tags::{
    MergeTag, extract_merge_tags, replace_merge_tags, scan_merge_tags, transform_merge_tags,
};
pub use preset::Preset;
