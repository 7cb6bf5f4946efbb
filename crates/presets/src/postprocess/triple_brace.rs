/// Returns true when the content of a `{{ ... }}` span is a bare URL.
///
/// Either a literal `http(s)://` URL or a variable named `url`, ending in
/// `_url` / `.url`, or camelCased `...Url` (e.g. `unsubscribe_url`,
/// `viewOnlineUrl`). Names like `curl` do not count.
pub fn is_url_span(content: &str) -> bool {
    let content = content.trim();
    if content.starts_with("http://") || content.starts_with("https://") {
        return !content.contains(char::is_whitespace);
    }
    let mut chars = content.chars();
    let valid_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if !valid_identifier {
        return false;
    }
    let lower = content.to_ascii_lowercase();
    lower == "url"
        || lower.ends_with("_url")
        || lower.ends_with(".url")
        || content.ends_with("Url")
}

/// Rewrite `{{url}}` spans into un-escaped `{{{url}}}` spans.
///
/// Spans that are already triple-braced are left alone, as is everything that
/// is not a bare URL.
pub fn triple_brace_urls(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut last = 0;
    let mut pos = 0;

    while let Some(offset) = html[pos..].find("{{") {
        let open = pos + offset;
        let inner_start = open + 2;
        let Some(close_offset) = html[inner_start..].find("}}") else {
            break;
        };
        let close = inner_start + close_offset;
        let content = &html[inner_start..close];

        let triple_open = html[..open].ends_with('{') || content.starts_with('{');
        let triple_close = html[close + 2..].starts_with('}');
        let nested = content.contains(['{', '}', '\n']);

        if !triple_open && !triple_close && !nested && is_url_span(content) {
            output.push_str(&html[last..open]);
            output.push_str("{{{");
            output.push_str(content);
            output.push_str("}}}");
            last = close + 2;
            pos = close + 2;
        } else {
            pos = open + 2;
        }
    }

    output.push_str(&html[last..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_span_detection() {
        assert!(is_url_span("unsubscribe_url"));
        assert!(is_url_span(" viewOnlineUrl "));
        assert!(is_url_span("https://example.com/u?id=1"));
        assert!(is_url_span("URL"));
        assert!(is_url_span("contact.url"));
        assert!(!is_url_span("first_name"));
        assert!(!is_url_span("curl"));
        assert!(!is_url_span("churl"));
        assert!(!is_url_span("url shortener"));
        assert!(!is_url_span("https://example.com/a b"));
    }

    #[test]
    fn test_rewrites_url_spans() {
        let html = r#"<a href="{{view_online_url}}">View</a> <a href="{{ https://x.io/p }}">P</a>"#;
        assert_eq!(
            triple_brace_urls(html),
            r#"<a href="{{{view_online_url}}}">View</a> <a href="{{{ https://x.io/p }}}">P</a>"#
        );
    }

    #[test]
    fn test_leaves_non_urls_and_triples_alone() {
        let html = "Hi {{first_name}}, {{{unsubscribe}}} {{{profile_url}}}";
        assert_eq!(triple_brace_urls(html), html);
    }

    #[test]
    fn test_leaves_url_suffixed_words_escaped() {
        let html = "Grab a {{curl}} from {{churl}}";
        assert_eq!(triple_brace_urls(html), html);
    }

    #[test]
    fn test_is_idempotent() {
        let once = triple_brace_urls("<a href=\"{{archive_url}}\">a</a>");
        assert_eq!(triple_brace_urls(&once), once);
    }

    #[test]
    fn test_unterminated_span_passes_through() {
        let html = "{{unsubscribe_url";
        assert_eq!(triple_brace_urls(html), html);
    }
}
