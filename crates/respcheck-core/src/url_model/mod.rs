//! URL normalization for spreadsheet cell text.
//!
//! Turns whatever a user typed into a URL cell into a request target with an
//! explicit scheme. Also derives the plain-http fallback target for https URLs.

mod fallback;
mod scheme;

pub use fallback::http_fallback;
pub use scheme::scheme_of;

/// Normalizes raw cell text into a request target.
///
/// - surrounding whitespace is trimmed; blank input yields `""` (no URL present)
/// - protocol-relative `//host/path` becomes `http://host/path`
/// - text without a scheme gets `http://` prepended
/// - text with a scheme is returned as-is
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("//") {
        return format!("http:{}", trimmed);
    }
    if scheme_of(trimmed).is_none() {
        return format!("http://{}", trimmed);
    }
    trimmed.to_string()
}
