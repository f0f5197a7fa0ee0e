//! https → http fallback target.

use url::Url;

/// Returns the plain-http equivalent of an `https` URL (same host, path and
/// query), or `None` when the URL is not https.
pub fn http_fallback(url: &str) -> Option<String> {
    if let Ok(mut parsed) = Url::parse(url) {
        if parsed.scheme() != "https" {
            return None;
        }
        // https and http are both special schemes, so the switch cannot be refused.
        if parsed.set_scheme("http").is_ok() {
            return Some(parsed.into());
        }
        return None;
    }

    // Unparseable but still https-looking: swap the scheme textually.
    let (scheme, rest) = url.split_once(':')?;
    if scheme.eq_ignore_ascii_case("https") {
        Some(format!("http:{}", rest))
    } else {
        None
    }
}
