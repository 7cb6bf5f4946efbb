#![deny(missing_docs)]
//! mailexport presets: built-in ESP descriptors, the preset registry, and
//! declarative preset configuration.

/// Declarative (JSON/YAML) preset descriptors.
pub mod config;
/// Provider post-processing helpers.
pub mod postprocess;
/// Preset registry and built-in presets.
pub mod registry;

pub use config::PresetConfig;
pub use postprocess::{UnsubscribeFooter, ensure_unsubscribe_footer, triple_brace_urls};
pub use registry::{
    Fallback, PostProcessStep, PresetRef, PresetRegistry, PresetRegistryBuilder, TablePreset,
    builtin_presets, ids,
};
