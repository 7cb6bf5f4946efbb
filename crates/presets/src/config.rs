//! Declarative preset descriptors loaded from JSON or YAML.
//!
//! ```yaml
//! id: acme
//! name: Acme Mailer
//! knownTags:
//!   first_name: "%recipient.first%"
//! fallback:
//!   style: template
//!   pattern: "%recipient.{name}%"
//! postProcess:
//!   - kind: ensureUnsubscribe
//!     tokens: ["%unsubscribe_url%"]
//! ```

use crate::registry::{Fallback, PostProcessStep, TablePreset};
use mailexport_core::ExportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A caller-supplied preset description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetConfig {
    /// Stable identifier.
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Closed table of known variables.
    #[serde(default)]
    pub known_tags: BTreeMap<String, String>,
    /// Rule for variables outside the table.
    pub fallback: Fallback,
    /// Post-process steps, applied in order.
    #[serde(default)]
    pub post_process: Vec<PostProcessStep>,
}

impl PresetConfig {
    /// Parse a descriptor from JSON.
    pub fn from_json(source: &str) -> Result<Self, ExportError> {
        serde_json::from_str(source).map_err(|e| ExportError::Config(e.to_string()))
    }

    /// Parse a descriptor from YAML.
    pub fn from_yaml(source: &str) -> Result<Self, ExportError> {
        serde_yaml::from_str(source).map_err(|e| ExportError::Config(e.to_string()))
    }

    /// Check the descriptor can produce a total, non-empty `transform_tag`.
    pub fn validate(&self) -> Result<(), ExportError> {
        self.clone().build().validate()
    }

    /// Validate and build the preset.
    pub fn into_preset(self) -> Result<TablePreset, ExportError> {
        let preset = self.build();
        preset.validate()?;
        Ok(preset)
    }

    fn build(self) -> TablePreset {
        let mut preset = TablePreset::new(self.id, self.name, self.fallback);
        for (variable, literal) in self.known_tags {
            preset = preset.with_tag(variable, literal);
        }
        for step in self.post_process {
            preset = preset.with_post_process(step);
        }
        preset
    }
}

impl From<&TablePreset> for PresetConfig {
    fn from(preset: &TablePreset) -> Self {
        use mailexport_core::Preset;
        Self {
            id: preset.id().to_string(),
            name: preset.name().to_string(),
            known_tags: preset.known_tags().clone(),
            fallback: preset.fallback().clone(),
            post_process: preset.post_process_steps().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::defaults;
    use mailexport_core::Preset;

    const ACME_YAML: &str = r#"
id: acme
name: Acme Mailer
knownTags:
  first_name: "%recipient.first%"
fallback:
  style: template
  pattern: "%recipient.{name}%"
postProcess:
  - kind: ensureUnsubscribe
    tokens: ["%unsubscribe_url%"]
    label: Opt out
"#;

    #[test]
    fn test_yaml_preset() {
        let preset = PresetConfig::from_yaml(ACME_YAML).unwrap().into_preset().unwrap();
        assert_eq!(preset.id(), "acme");
        assert_eq!(preset.transform_tag("first_name"), "%recipient.first%");
        assert_eq!(preset.transform_tag("city"), "%recipient.city%");

        let html = preset.post_process("<body><p>x</p></body>".to_string());
        assert!(html.contains(r#"href="%unsubscribe_url%""#));
        assert!(html.contains(">Opt out</a>"));
    }

    #[test]
    fn test_json_preset_with_builtin_styles() {
        let json = r#"{
            "id": "crm",
            "name": "CRM",
            "fallback": { "style": "contact-attribute" },
            "postProcess": [{ "kind": "tripleBraceUrls" }]
        }"#;
        let preset = PresetConfig::from_json(json).unwrap().into_preset().unwrap();
        assert_eq!(preset.transform_tag("city"), "{{ contact.CITY }}");
        assert!(preset.known_tags().is_empty());
        assert_eq!(preset.post_process_steps(), &[PostProcessStep::TripleBraceUrls]);
    }

    #[test]
    fn test_template_must_reference_variable() {
        let json = r#"{"id":"x","name":"X","fallback":{"style":"template","pattern":"static"}}"#;
        let err = PresetConfig::from_json(json).unwrap().into_preset().unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_rejects_empty_id_and_bad_json() {
        let json = r#"{"id":" ","name":"X","fallback":{"style":"handlebars"}}"#;
        assert!(PresetConfig::from_json(json).unwrap().validate().is_err());
        assert!(matches!(
            PresetConfig::from_json("{\"id\":"),
            Err(ExportError::Config(_))
        ));
    }

    #[test]
    fn test_builtin_round_trips_through_config() {
        let original = defaults::mailchimp();
        let json = serde_json::to_string(&PresetConfig::from(&original)).unwrap();
        let rebuilt = PresetConfig::from_json(&json).unwrap().into_preset().unwrap();
        assert_eq!(rebuilt, original);
    }
}
