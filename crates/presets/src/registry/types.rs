//! Registry type definitions for provider presets.

use crate::postprocess::{UnsubscribeFooter, ensure_unsubscribe_footer, triple_brace_urls};
use mailexport_core::{ExportError, Preset};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Rule applied to variables missing from a preset's known-tag table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "kebab-case")]
pub enum Fallback {
    /// `*|UPPER|*`
    PipeUpper,
    /// `{{variable}}`
    Handlebars,
    /// `{{ contact.UPPER }}`
    ContactAttribute,
    /// A custom pattern; `{name}` is replaced with the variable and `{NAME}`
    /// with its uppercase form.
    Template {
        /// Pattern text.
        pattern: String,
    },
}

impl Fallback {
    /// Apply the fallback rule to `variable`.
    pub fn apply(&self, variable: &str) -> String {
        match self {
            Fallback::PipeUpper => format!("*|{}|*", variable.to_uppercase()),
            Fallback::Handlebars => format!("{{{{{}}}}}", variable),
            Fallback::ContactAttribute => {
                format!("{{{{ contact.{} }}}}", variable.to_uppercase())
            }
            Fallback::Template { pattern } => pattern
                .replace("{name}", variable)
                .replace("{NAME}", &variable.to_uppercase()),
        }
    }
}

/// A structural adjustment applied to compiled HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PostProcessStep {
    /// Inject an unsubscribe footer unless one of the tokens is present.
    EnsureUnsubscribe(UnsubscribeFooter),
    /// Rewrite `{{url}}` spans into un-escaped `{{{url}}}` spans.
    TripleBraceUrls,
}

impl PostProcessStep {
    /// Apply this step to `html`.
    pub fn apply(&self, html: String) -> String {
        match self {
            PostProcessStep::EnsureUnsubscribe(footer) => ensure_unsubscribe_footer(html, footer),
            PostProcessStep::TripleBraceUrls => triple_brace_urls(&html),
        }
    }
}

/// A preset driven by a closed table of known variables plus a fallback rule.
///
/// All built-in presets are `TablePreset`s; declarative configs produce them too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePreset {
    id: String,
    name: String,
    known_tags: BTreeMap<String, String>,
    fallback: Fallback,
    post_process: Vec<PostProcessStep>,
}

impl TablePreset {
    /// Create a preset with an empty known-tag table.
    ///
    /// Construction does not validate; call [`TablePreset::validate`] before
    /// registering a preset built from untrusted input.
    pub fn new(id: impl Into<String>, name: impl Into<String>, fallback: Fallback) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            known_tags: BTreeMap::new(),
            fallback,
            post_process: Vec::new(),
        }
    }

    /// Add a known variable mapping.
    pub fn with_tag(mut self, variable: impl Into<String>, literal: impl Into<String>) -> Self {
        self.known_tags.insert(variable.into(), literal.into());
        self
    }

    /// Append a post-process step.
    pub fn with_post_process(mut self, step: PostProcessStep) -> Self {
        self.post_process.push(step);
        self
    }

    /// The closed table of variables this preset maps explicitly.
    pub fn known_tags(&self) -> &BTreeMap<String, String> {
        &self.known_tags
    }

    /// The rule for variables outside the known table.
    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Post-process steps, in application order.
    pub fn post_process_steps(&self) -> &[PostProcessStep] {
        &self.post_process
    }

    /// Check the preset has an id and name and that every variable maps to a
    /// non-empty substitution.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.id.trim().is_empty() {
            return Err(ExportError::Config("preset id must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(ExportError::Config(format!(
                "preset '{}' must have a name",
                self.id
            )));
        }
        if let Some((variable, _)) = self.known_tags.iter().find(|(_, v)| v.is_empty()) {
            return Err(ExportError::Config(format!(
                "preset '{}' maps '{}' to an empty string",
                self.id, variable
            )));
        }
        if let Fallback::Template { pattern } = &self.fallback
            && !pattern.contains("{name}")
            && !pattern.contains("{NAME}")
        {
            return Err(ExportError::Config(format!(
                "preset '{}' fallback pattern must contain {{name}} or {{NAME}}",
                self.id
            )));
        }
        for step in &self.post_process {
            if let PostProcessStep::EnsureUnsubscribe(footer) = step
                && footer.tokens.iter().all(|t| t.is_empty())
            {
                return Err(ExportError::Config(format!(
                    "preset '{}' unsubscribe step needs at least one token",
                    self.id
                )));
            }
        }
        Ok(())
    }
}

impl Preset for TablePreset {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn transform_tag(&self, variable: &str) -> String {
        match self.known_tags.get(variable) {
            Some(literal) => literal.clone(),
            None => self.fallback.apply(variable),
        }
    }

    fn post_process(&self, html: String) -> String {
        self.post_process
            .iter()
            .fold(html, |html, step| step.apply(html))
    }
}

/// Selects a preset either by registry identifier or by value.
#[derive(Debug, Clone)]
pub enum PresetRef {
    /// Look the preset up in a registry.
    ByName(String),
    /// Use this preset directly, bypassing the registry.
    Literal(Arc<dyn Preset>),
}

impl From<&str> for PresetRef {
    fn from(id: &str) -> Self {
        PresetRef::ByName(id.to_string())
    }
}

impl From<String> for PresetRef {
    fn from(id: String) -> Self {
        PresetRef::ByName(id)
    }
}

impl From<Arc<dyn Preset>> for PresetRef {
    fn from(preset: Arc<dyn Preset>) -> Self {
        PresetRef::Literal(preset)
    }
}

impl From<TablePreset> for PresetRef {
    fn from(preset: TablePreset) -> Self {
        PresetRef::Literal(Arc::new(preset))
    }
}

/// Immutable index from provider identifier to preset.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: HashMap<String, Arc<dyn Preset>>,
}

impl PresetRegistry {
    /// Start a registry pre-populated with the built-in presets.
    pub fn builder() -> PresetRegistryBuilder {
        let mut builder = PresetRegistryBuilder::empty();
        for preset in super::defaults::builtin_presets() {
            builder = builder.with_preset(preset);
        }
        builder
    }

    /// Look up a preset by identifier.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Preset>> {
        self.presets.get(id).cloned()
    }

    /// Check if an identifier is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.presets.contains_key(id)
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Resolve a selector to a preset.
    ///
    /// Literal presets are returned unchanged; names that are not registered
    /// fail with [`ExportError::PresetNotFound`].
    pub fn resolve(&self, selector: impl Into<PresetRef>) -> Result<Arc<dyn Preset>, ExportError> {
        match selector.into() {
            PresetRef::Literal(preset) => Ok(preset),
            PresetRef::ByName(id) => {
                let preset = self.get(&id).ok_or_else(|| ExportError::preset_not_found(&id))?;
                log::debug!("Resolved preset '{}' ({})", id, preset.name());
                Ok(preset)
            }
        }
    }
}

/// Builder for a caller-owned [`PresetRegistry`].
#[derive(Debug, Default)]
pub struct PresetRegistryBuilder {
    presets: HashMap<String, Arc<dyn Preset>>,
}

impl PresetRegistryBuilder {
    /// A builder with no presets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a preset under its own identifier, replacing any previous entry.
    pub fn with_preset<P: Preset + 'static>(self, preset: P) -> Self {
        self.with_shared(Arc::new(preset))
    }

    /// Register an already-shared preset.
    pub fn with_shared(mut self, preset: Arc<dyn Preset>) -> Self {
        self.presets.insert(preset.id().to_string(), preset);
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> PresetRegistry {
        PresetRegistry {
            presets: self.presets,
        }
    }
}
