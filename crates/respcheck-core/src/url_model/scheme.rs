//! URI scheme detection.

/// Returns the scheme of `s` if it starts with one.
///
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`, then `:`.
/// When the `:` is followed by a digit the prefix is a host with a port
/// (`localhost:8080`), not a scheme.
pub fn scheme_of(s: &str) -> Option<&str> {
    let (candidate, rest) = s.split_once(':')?;
    let mut chars = candidate.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(candidate)
}
