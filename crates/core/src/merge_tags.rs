//! Merge-tag scanning and provider substitution.
//!
//! A merge tag is two opening braces, optional whitespace, an identifier
//! (`[A-Za-z_][A-Za-z0-9_.]*`), optional whitespace, and two closing braces.
//! Anything that does not match exactly is left untouched.

use crate::preset::Preset;
use std::collections::HashMap;
use std::ops::Range;

/// A single merge tag located in a piece of markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeTag<'a> {
    /// Byte range of the whole tag, braces included.
    pub span: Range<usize>,
    /// The variable name between the braces.
    pub variable: &'a str,
}

/// Iterator over merge tags in left-to-right, non-overlapping order.
pub struct MergeTags<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Iterator for MergeTags<'a> {
    type Item = MergeTag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.input[self.pos..].find("{{") {
            let start = self.pos + offset;
            if let Some(tag) = parse_tag_at(self.input, start) {
                self.pos = tag.span.end;
                return Some(tag);
            }
            // Retry one byte later so `{{{name}}}` still yields the inner tag.
            self.pos = start + 1;
        }
        self.pos = self.input.len();
        None
    }
}

/// Scan `input` for merge tags.
pub fn scan_merge_tags(input: &str) -> MergeTags<'_> {
    MergeTags { input, pos: 0 }
}

fn parse_tag_at(input: &str, start: usize) -> Option<MergeTag<'_>> {
    let after_open = start + 2;
    let rest = &input[after_open..];
    let name_start = after_open + (rest.len() - rest.trim_start().len());

    let bytes = input.as_bytes();
    let first = *bytes.get(name_start)?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let name_len = input[name_start..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'.')
        .count();
    let name_end = name_start + name_len;

    let tail = &input[name_end..];
    let close = name_end + (tail.len() - tail.trim_start().len());
    if !input[close..].starts_with("}}") {
        return None;
    }

    Some(MergeTag {
        span: start..close + 2,
        variable: &input[name_start..name_end],
    })
}

/// Replace every merge tag in `input` with the result of `resolve`.
///
/// Text outside tags is copied verbatim and replacements are never re-scanned.
pub fn replace_merge_tags<F>(input: &str, mut resolve: F) -> String
where
    F: FnMut(&MergeTag<'_>) -> Option<String>,
{
    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for tag in scan_merge_tags(input) {
        if let Some(replacement) = resolve(&tag) {
            output.push_str(&input[last..tag.span.start]);
            output.push_str(&replacement);
            last = tag.span.end;
        }
    }
    output.push_str(&input[last..]);
    output
}

/// Resolve every merge tag in `markup` for `preset`.
///
/// An exact variable-name match in `overrides` wins and is substituted
/// verbatim; every other tag goes through [`Preset::transform_tag`].
pub fn transform_merge_tags(
    markup: &str,
    preset: &dyn Preset,
    overrides: &HashMap<String, String>,
) -> String {
    replace_merge_tags(markup, |tag| {
        Some(match overrides.get(tag.variable) {
            Some(literal) => literal.clone(),
            None => preset.transform_tag(tag.variable),
        })
    })
}

/// Distinct variable names referenced by `markup`, in first-appearance order.
pub fn extract_merge_tags(markup: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for tag in scan_merge_tags(markup) {
        if !seen.iter().any(|name| name == tag.variable) {
            seen.push(tag.variable.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Shouting;

    impl Preset for Shouting {
        fn id(&self) -> &str {
            "shouting"
        }

        fn name(&self) -> &str {
            "Shouting"
        }

        fn transform_tag(&self, variable: &str) -> String {
            format!("<{}>", variable.to_uppercase())
        }
    }

    fn variables(input: &str) -> Vec<&str> {
        scan_merge_tags(input).map(|t| t.variable).collect()
    }

    #[test]
    fn test_scans_plain_and_padded_tags() {
        assert_eq!(
            variables("Hi {{first_name}}, {{  last_name  }}!"),
            vec!["first_name", "last_name"]
        );
    }

    #[test]
    fn test_scans_dotted_identifiers() {
        assert_eq!(variables("{{contact.city}}"), vec!["contact.city"]);
    }

    #[test]
    fn test_ignores_malformed_tags() {
        assert!(variables("{{1abc}} {{first name}} {{}} {first} {{x}").is_empty());
        assert!(variables("{{ na-me }}").is_empty());
    }

    #[test]
    fn test_triple_brace_yields_inner_tag() {
        let tags: Vec<_> = scan_merge_tags("{{{unsubscribe}}}").collect();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].span, 1..16);
        assert_eq!(tags[0].variable, "unsubscribe");
    }

    #[test]
    fn test_handles_multibyte_text() {
        assert_eq!(variables("héllo {{ naïve }} {{ café_name }}"), Vec::<&str>::new());
        assert_eq!(variables("héllo ✉ {{ name }}"), vec!["name"]);
    }

    #[test]
    fn test_transform_uses_preset() {
        let out = transform_merge_tags("<p>Hello {{first_name}}</p>", &Shouting, &HashMap::new());
        assert_eq!(out, "<p>Hello <FIRST_NAME></p>");
    }

    #[test]
    fn test_override_wins_for_exact_name_only() {
        let mut overrides = HashMap::new();
        overrides.insert("name".to_string(), "%%CUSTOM_NAME%%".to_string());
        let out = transform_merge_tags("{{name}} {{ name }} {{name2}}", &Shouting, &overrides);
        assert_eq!(out, "%%CUSTOM_NAME%% %%CUSTOM_NAME%% <NAME2>");
    }

    #[test]
    fn test_substitutions_are_not_rescanned() {
        let mut overrides = HashMap::new();
        overrides.insert("a".to_string(), "{{b}}".to_string());
        overrides.insert("b".to_string(), "{{a}}".to_string());
        let out = transform_merge_tags("{{a}}", &Shouting, &overrides);
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn test_text_outside_tags_is_untouched() {
        let input = "{ {x}} {{x} }} {{{y}}} {{z}}}";
        let out = transform_merge_tags(input, &Shouting, &HashMap::new());
        assert_eq!(out, "{ {x}} {{x} }} {<Y>} <Z>}");
    }

    #[test]
    fn test_extract_merge_tags_dedupes_in_order() {
        let names = extract_merge_tags("{{b}} {{a}} {{ b }} {{c}}");
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
