//! Built-in presets for the supported email providers.
//!
//! Each preset carries a hand-curated table of well-known variables; anything
//! else falls through to the provider's deterministic pattern.

use super::types::{Fallback, PostProcessStep, PresetRegistry, TablePreset};
use crate::postprocess::UnsubscribeFooter;
use once_cell::sync::Lazy;

/// Identifiers of the built-in presets.
pub mod ids {
    /// Mailchimp (`*|FNAME|*`).
    pub const MAILCHIMP: &str = "mailchimp";
    /// SendGrid dynamic templates (`{{first_name}}`).
    pub const SENDGRID: &str = "sendgrid";
    /// Brevo contact attributes (`{{ contact.FIRSTNAME }}`).
    pub const BREVO: &str = "brevo";
    /// Postmark templates, camelCase variables (`{{firstName}}`).
    pub const POSTMARK: &str = "postmark";
    /// Mailgun templates, snake_case variables (`{{first_name}}`).
    pub const MAILGUN: &str = "mailgun";
    /// Plain handlebars, every variable passed through.
    pub const HANDLEBARS: &str = "handlebars";
}

static BUILTIN: Lazy<PresetRegistry> = Lazy::new(|| PresetRegistry::builder().build());

impl PresetRegistry {
    /// The shared registry of built-in presets, initialized on first use.
    pub fn builtin() -> &'static PresetRegistry {
        &BUILTIN
    }
}

/// All built-in presets.
pub fn builtin_presets() -> Vec<TablePreset> {
    vec![
        mailchimp(),
        sendgrid(),
        brevo(),
        postmark(),
        mailgun(),
        handlebars(),
    ]
}

/// Mailchimp merge fields. Guarantees an unsubscribe link.
pub fn mailchimp() -> TablePreset {
    TablePreset::new(ids::MAILCHIMP, "Mailchimp", Fallback::PipeUpper)
        .with_tag("first_name", "*|FNAME|*")
        .with_tag("last_name", "*|LNAME|*")
        .with_tag("email", "*|EMAIL|*")
        .with_tag("phone", "*|PHONE|*")
        .with_tag("company", "*|LIST:COMPANY|*")
        .with_tag("address", "*|LIST:ADDRESSLINE|*")
        .with_tag("list_name", "*|LIST:NAME|*")
        .with_tag("unsubscribe_url", "*|UNSUB|*")
        .with_tag("update_profile_url", "*|UPDATE_PROFILE|*")
        .with_tag("archive_url", "*|ARCHIVE|*")
        .with_tag("forward_url", "*|FORWARD|*")
        .with_tag("current_date", "*|DATE:d/m/y|*")
        .with_tag("current_year", "*|CURRENT_YEAR|*")
        .with_post_process(PostProcessStep::EnsureUnsubscribe(
            UnsubscribeFooter::new(["*|UNSUB|*", "*|UNSUBSCRIBE|*"]),
        ))
}

/// SendGrid handlebars. URL-valued variables are emitted un-escaped.
pub fn sendgrid() -> TablePreset {
    TablePreset::new(ids::SENDGRID, "SendGrid", Fallback::Handlebars)
        .with_tag("first_name", "{{first_name}}")
        .with_tag("last_name", "{{last_name}}")
        .with_tag("email", "{{email}}")
        .with_tag("company", "{{company}}")
        .with_tag("phone", "{{phone_number}}")
        .with_tag("address", "{{address_line_1}}")
        .with_tag("city", "{{city}}")
        .with_tag("country", "{{country}}")
        .with_tag("unsubscribe_url", "{{{unsubscribe}}}")
        .with_tag("update_profile_url", "{{{unsubscribe_preferences}}}")
        .with_tag("current_year", "{{current_year}}")
        .with_post_process(PostProcessStep::TripleBraceUrls)
}

/// Brevo (formerly Sendinblue) contact attributes.
pub fn brevo() -> TablePreset {
    TablePreset::new(ids::BREVO, "Brevo", Fallback::ContactAttribute)
        .with_tag("first_name", "{{ contact.FIRSTNAME }}")
        .with_tag("last_name", "{{ contact.LASTNAME }}")
        .with_tag("email", "{{ contact.EMAIL }}")
        .with_tag("phone", "{{ contact.SMS }}")
        .with_tag("company", "{{ contact.COMPANY }}")
        .with_tag("unsubscribe_url", "{{ unsubscribe }}")
        .with_tag("update_profile_url", "{{ update_profile }}")
        .with_tag("archive_url", "{{ mirror }}")
}

/// Postmark templates using camelCase model keys.
pub fn postmark() -> TablePreset {
    TablePreset::new(ids::POSTMARK, "Postmark", Fallback::Handlebars)
        .with_tag("first_name", "{{firstName}}")
        .with_tag("last_name", "{{lastName}}")
        .with_tag("email", "{{email}}")
        .with_tag("company", "{{companyName}}")
        .with_tag("phone", "{{phoneNumber}}")
        .with_tag("address", "{{companyAddress}}")
        .with_tag("unsubscribe_url", "{{{pm:unsubscribe}}}")
        .with_tag("archive_url", "{{{viewInBrowserUrl}}}")
        .with_tag("current_year", "{{currentYear}}")
}

/// Mailgun templates using snake_case variables.
pub fn mailgun() -> TablePreset {
    TablePreset::new(ids::MAILGUN, "Mailgun", Fallback::Handlebars)
        .with_tag("first_name", "{{first_name}}")
        .with_tag("last_name", "{{last_name}}")
        .with_tag("email", "{{email}}")
        .with_tag("company", "{{company}}")
        .with_tag("unsubscribe_url", "{{{unsubscribe_url}}}")
        .with_tag("update_profile_url", "{{{update_profile_url}}}")
        .with_tag("archive_url", "{{{archive_url}}}")
        .with_tag("current_year", "{{current_year}}")
}

/// Generic handlebars: every variable passes through as `{{variable}}`.
pub fn handlebars() -> TablePreset {
    TablePreset::new(ids::HANDLEBARS, "Handlebars", Fallback::Handlebars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailexport_core::Preset;

    #[test]
    fn test_builtin_registry_has_all_providers() {
        let registry = PresetRegistry::builtin();
        assert_eq!(
            registry.ids(),
            vec!["brevo", "handlebars", "mailchimp", "mailgun", "postmark", "sendgrid"]
        );
    }

    #[test]
    fn test_known_tags_match_documented_literals() {
        assert_eq!(mailchimp().transform_tag("first_name"), "*|FNAME|*");
        assert_eq!(sendgrid().transform_tag("first_name"), "{{first_name}}");
        assert_eq!(sendgrid().transform_tag("unsubscribe_url"), "{{{unsubscribe}}}");
        assert_eq!(brevo().transform_tag("first_name"), "{{ contact.FIRSTNAME }}");
        assert_eq!(postmark().transform_tag("first_name"), "{{firstName}}");
        assert_eq!(mailgun().transform_tag("unsubscribe_url"), "{{{unsubscribe_url}}}");
        assert_eq!(handlebars().transform_tag("first_name"), "{{first_name}}");
    }

    #[test]
    fn test_every_known_tag_resolves_to_its_table_entry() {
        for preset in builtin_presets() {
            for (variable, literal) in preset.known_tags() {
                assert_eq!(&preset.transform_tag(variable), literal, "{}", preset.id());
            }
        }
    }

    #[test]
    fn test_unknown_variables_use_fallback() {
        let unknown = "loyalty_tier";
        assert_eq!(mailchimp().transform_tag(unknown), "*|LOYALTY_TIER|*");
        assert_eq!(sendgrid().transform_tag(unknown), "{{loyalty_tier}}");
        assert_eq!(brevo().transform_tag(unknown), "{{ contact.LOYALTY_TIER }}");
        assert_eq!(postmark().transform_tag(unknown), "{{loyalty_tier}}");
        assert_eq!(mailgun().transform_tag(unknown), "{{loyalty_tier}}");
        assert_eq!(handlebars().transform_tag(unknown), "{{loyalty_tier}}");
    }

    #[test]
    fn test_handlebars_table_is_empty() {
        assert!(handlebars().known_tags().is_empty());
    }

    #[test]
    fn test_only_mailchimp_and_sendgrid_post_process() {
        let with_steps: Vec<String> = builtin_presets()
            .into_iter()
            .filter(|p| !p.post_process_steps().is_empty())
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(with_steps, vec!["mailchimp", "sendgrid"]);
    }
}
