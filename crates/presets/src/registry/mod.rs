/// Built-in provider presets and the shared registry.
pub mod defaults;
/// Preset, selector, and registry types.
pub mod types;

pub use defaults::{builtin_presets, ids};
pub use types::{
    Fallback, PostProcessStep, PresetRef, PresetRegistry, PresetRegistryBuilder, TablePreset,
};
