//! Href resolution for trimmed candidates.
//!
//! Candidates matched without an explicit scheme still need a dereferenceable
//! address. The policy is an ordered first-match-wins list, kept as data so
//! it reads the same way it is tested.

use std::borrow::Cow;

use crate::patterns::starts_with_scheme;

/// Host prefixes that imply a protocol, checked in order before the
/// `http://` fallback.
const PREFIX_SCHEMES: &[(&str, &str)] = &[("irc.", "irc://"), ("ftp.", "ftp://")];

const MAILTO: &str = "mailto:";

/// Resolve the href for a trimmed candidate.
///
/// Borrowed when the candidate is already dereferenceable, owned when a
/// scheme had to be prepended:
/// 1. explicit `scheme://` — kept as-is
/// 2. contains `@` — `mailto:` prepended unless already present
/// 3. `irc.` / `ftp.` host prefix — matching scheme prepended
/// 4. everything else — `http://` prepended
pub fn resolve_href(candidate: &str) -> Cow<'_, str> {
    if starts_with_scheme(candidate.as_bytes()) {
        return Cow::Borrowed(candidate);
    }
    if candidate.contains('@') {
        return if candidate.starts_with(MAILTO) {
            Cow::Borrowed(candidate)
        } else {
            Cow::Owned(format!("{MAILTO}{candidate}"))
        };
    }
    for (prefix, scheme) in PREFIX_SCHEMES {
        if candidate.starts_with(prefix) {
            return Cow::Owned(format!("{scheme}{candidate}"));
        }
    }
    Cow::Owned(format!("http://{candidate}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_scheme_kept() {
        assert_eq!(resolve_href("http://example.com"), "http://example.com");
        assert_eq!(resolve_href("https://example.com/x"), "https://example.com/x");
        assert_eq!(resolve_href("ftp://example.com"), "ftp://example.com");
        assert!(matches!(resolve_href("http://example.com"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_email_gets_mailto() {
        assert_eq!(resolve_href("user@example.com"), "mailto:user@example.com");
    }

    #[test]
    fn test_existing_mailto_kept() {
        assert_eq!(
            resolve_href("mailto:user@example.com"),
            "mailto:user@example.com"
        );
        assert!(matches!(
            resolve_href("mailto:user@example.com"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_irc_and_ftp_prefixes() {
        assert_eq!(resolve_href("irc.example.com"), "irc://irc.example.com");
        assert_eq!(resolve_href("ftp.example.com"), "ftp://ftp.example.com");
    }

    #[test]
    fn test_http_fallback() {
        assert_eq!(resolve_href("www.example.com"), "http://www.example.com");
        assert_eq!(resolve_href("127.0.0.1/admin"), "http://127.0.0.1/admin");
    }

    #[test]
    fn test_at_sign_wins_over_host_prefix() {
        // Rule order: '@' is checked before the irc./ftp. prefixes.
        assert_eq!(
            resolve_href("irc.admin@example.com"),
            "mailto:irc.admin@example.com"
        );
    }
}
