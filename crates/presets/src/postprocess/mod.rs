//! Provider-specific structural adjustments applied to compiled HTML.
//!
//! - `unsubscribe`: injects a footer when the required unsubscribe token is missing.
//! - `triple_brace`: un-escapes URL interpolations for handlebars providers.

/// Triple-brace rewriting for URL-valued interpolations.
pub mod triple_brace;
/// Unsubscribe footer injection.
pub mod unsubscribe;

pub use triple_brace::{is_url_span, triple_brace_urls};
pub use unsubscribe::{UnsubscribeFooter, ensure_unsubscribe_footer};
