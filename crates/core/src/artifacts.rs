//! Removes editor bookkeeping annotations from markup.
//!
//! The authoring tool tags nodes with class tokens starting with
//! [`EDITOR_TOKEN_PREFIX`]. These must never reach exported output, in either
//! the intermediate layout markup (`css-class`) or the compiled HTML (`class`).
//! Conditional comments (`<!--[if mso]>...<![endif]-->`) carry markup as
//! comment text, so their `class` runs are cleaned as well.

use crate::ExportError;
use lol_html::{
    DocumentContentHandlers, ElementContentHandlers, RewriteStrSettings, Selector, doc_comments,
    element, rewrite_str,
};
use std::borrow::Cow;

/// Prefix shared by every editor-owned class token.
pub const EDITOR_TOKEN_PREFIX: &str = "editor-";

/// Attributes that carry whitespace-separated class tokens.
pub const ANNOTATED_ATTRIBUTES: &[&str] = &["class", "css-class"];

/// Returns true when `token` is editor-owned.
pub fn is_editor_token(token: &str) -> bool {
    token.starts_with(EDITOR_TOKEN_PREFIX)
}

/// Strip editor tokens from every annotated attribute in `markup`.
///
/// Attributes left without any token are removed entirely. Idempotent.
pub fn strip_editor_artifacts(markup: &str) -> Result<String, ExportError> {
    let output = rewrite_str(
        markup,
        RewriteStrSettings {
            element_content_handlers: vec![annotation_handler()],
            document_content_handlers: vec![comment_handler()],
            strict: false,
            ..RewriteStrSettings::new()
        },
    )?;
    Ok(output)
}

fn annotation_handler() -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    element!("*", |el| {
        for &attr in ANNOTATED_ATTRIBUTES {
            let Some(value) = el.get_attribute(attr) else {
                continue;
            };
            match strip_tokens(&value) {
                None => {}
                Some(kept) if kept.is_empty() => el.remove_attribute(attr),
                Some(kept) => el.set_attribute(attr, &kept)?,
            }
        }
        Ok(())
    })
}

fn comment_handler() -> DocumentContentHandlers<'static> {
    doc_comments!(|comment| {
        if let Some(text) = strip_comment_markup(&comment.text()) {
            comment.set_text(&text)?;
        }
        Ok(())
    })
}

/// Strips editor tokens from `class="..."` / `css-class="..."` runs inside
/// comment text. Returns `None` when nothing changed.
fn strip_comment_markup(text: &str) -> Option<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;
    let mut changed = false;

    while let Some(offset) = text[pos..].find("class=") {
        let name_at = pos + offset;
        let value_at = name_at + "class=".len();
        pos = value_at;

        let attr_start = if text[..name_at].ends_with("css-") {
            name_at - 4
        } else {
            name_at
        };
        if !text[..attr_start].ends_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }
        let quote = match text[value_at..].chars().next() {
            Some(c @ ('"' | '\'')) => c,
            _ => continue,
        };
        let Some(len) = text[value_at + 1..].find(quote) else {
            break;
        };
        let value_end = value_at + 1 + len;
        pos = value_end + 1;

        let Some(kept) = strip_tokens(&text[value_at + 1..value_end]) else {
            continue;
        };
        changed = true;
        if kept.is_empty() {
            let before = text[..attr_start].trim_end_matches(|c: char| c.is_ascii_whitespace());
            output.push_str(&text[last..before.len().max(last)]);
            last = value_end + 1;
        } else {
            output.push_str(&text[last..value_at + 1]);
            output.push_str(&kept);
            last = value_end;
        }
    }

    changed.then(|| {
        output.push_str(&text[last..]);
        output
    })
}

/// Returns the cleaned token list, or `None` when the value needs no rewrite.
fn strip_tokens(value: &str) -> Option<String> {
    let total = value.split_whitespace().count();
    let kept: Vec<&str> = value
        .split_whitespace()
        .filter(|token| !is_editor_token(token))
        .collect();
    if kept.len() == total && !kept.is_empty() {
        return None;
    }
    Some(kept.join(" "))
}
