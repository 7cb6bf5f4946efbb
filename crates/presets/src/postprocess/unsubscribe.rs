use serde::{Deserialize, Serialize};

/// Configuration for the injected unsubscribe footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeFooter {
    /// Accepted spellings of the provider's unsubscribe token. The first one
    /// is used as the footer link target.
    pub tokens: Vec<String>,
    /// Link text.
    #[serde(default = "default_label")]
    pub label: String,
}

fn default_label() -> String {
    "Unsubscribe".to_string()
}

impl UnsubscribeFooter {
    /// Create a footer config with the default label.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            label: default_label(),
        }
    }

    /// Override the link text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns true when `html` already contains any accepted token.
    pub fn is_present_in(&self, html: &str) -> bool {
        self.tokens.iter().any(|token| html.contains(token.as_str()))
    }

    /// Render the minimal centered footer markup.
    pub fn to_html(&self) -> String {
        let href = self.tokens.first().map(String::as_str).unwrap_or_default();
        format!(
            "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\">\
             <tr><td align=\"center\" style=\"padding:16px 0;font-size:12px;color:#666666;\">\
             <a href=\"{}\" style=\"color:#666666;text-decoration:underline;\">{}</a>\
             </td></tr></table>",
            html_escape::encode_double_quoted_attribute(href),
            html_escape::encode_text(&self.label),
        )
    }
}

/// Ensure the unsubscribe token appears in `html`.
///
/// When none of the footer's tokens are present, the footer is inserted right
/// before the last `</body>` tag. Markup without a closing body tag is returned
/// unchanged.
pub fn ensure_unsubscribe_footer(html: String, footer: &UnsubscribeFooter) -> String {
    if footer.is_present_in(&html) {
        return html;
    }
    let Some(at) = find_body_close(&html) else {
        log::debug!("No </body> found, skipping unsubscribe footer");
        return html;
    };
    log::debug!("Injecting unsubscribe footer at byte {}", at);
    let mut output = String::with_capacity(html.len() + 320);
    output.push_str(&html[..at]);
    output.push_str(&footer.to_html());
    output.push_str(&html[at..]);
    output
}

/// Byte offset of the last `</body>` end tag, matched case-insensitively.
fn find_body_close(html: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let mut search = lower.as_str();
    while let Some(at) = search.rfind("</body") {
        let next = lower.as_bytes().get(at + 6).copied();
        if matches!(next, Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
            return Some(at);
        }
        search = &lower[..at];
    }
    None
}
