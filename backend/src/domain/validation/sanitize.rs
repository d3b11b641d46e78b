//! Text sanitisation applied to inbound text fields before their rules run.
//!
//! `birthday` is only trimmed; its accepted shape has nothing to escape.

/// Trim surrounding whitespace and escape HTML-significant characters.
///
/// Escapes `&`, `<`, `>`, `"`, `'` and `/`, so the stored value is safe to
/// echo into markup.
///
/// # Examples
/// ```
/// use contacts_api::domain::validation::sanitize;
///
/// assert_eq!(sanitize("  Jo  "), "Jo");
/// assert_eq!(sanitize("<b>Jo</b>"), "&lt;b&gt;Jo&lt;&#x2F;b&gt;");
/// ```
#[must_use]
pub fn sanitize(raw: &str) -> String {
    html_escape::encode_safe(raw.trim()).into_owned()
}
