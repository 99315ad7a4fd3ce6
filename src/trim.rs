//! Trailing punctuation and unbalanced-delimiter trimming.
//!
//! A raw candidate is greedy: `(http://example.com)` matches through the
//! closing paren, and `user@example.com.` through the full stop. The trimmer
//! walks that back: per iteration it strips at most one unmatched closing
//! delimiter and one trailing punctuation token, looping until the candidate
//! stops changing. Each iteration either shrinks the candidate or ends the
//! loop, so termination is structural.

/// Closing delimiter to its expected opening counterpart.
///
/// A trailing closer is stripped only when the candidate holds more closers
/// than openers, i.e. the final character closes something outside the link.
const QUOTE_PAIRS: &[(char, char)] = &[
    ('\'', '`'),
    ('>', '<'),
    (')', '('),
    (']', '['),
    ('}', '{'),
    ('»', '«'),
    ('›', '‹'),
];

/// Punctuation characters stripped from the end of a candidate.
const TRAILING_PUNCT: &[char] = &['!', '?', '.', ',', ':', ';', '\'', '"'];

/// HTML entity names stripped from the end of a candidate, with either a
/// raw `&` or an already-encoded `&amp;` lead-in.
const TRAILING_ENTITIES: &[&str] = &[
    "lt", "gt", "quot", "apos", "raquo", "laquo", "rsaquo", "lsaquo",
];

/// Trailing-punctuation policy for the trimmer.
///
/// `Custom` receives the current candidate and returns the byte length of the
/// trailing run to strip (0 for none). It is re-applied each trimming
/// iteration, like the default rule.
#[derive(Clone, Copy, Default)]
pub enum TrailingPunctuation<'a> {
    /// Strip `! ? . , : ; ' "` and trailing `&lt;`-style entities.
    #[default]
    Default,
    /// Skip the punctuation step entirely; only unbalanced closers are trimmed.
    Disabled,
    /// Caller-supplied rule.
    Custom(&'a dyn Fn(&str) -> usize),
}

impl std::fmt::Debug for TrailingPunctuation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Disabled => f.write_str("Disabled"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Trim a raw candidate, returning the byte length that survives.
///
/// The result is a fixed point: trimming the trimmed candidate again changes
/// nothing.
///
/// # Panics
/// Panics if a [`TrailingPunctuation::Custom`] rule reports a run longer than
/// the candidate or one that splits a character; that is a caller
/// configuration error, not something to paper over.
pub fn trim_candidate(candidate: &str, punctuation: &TrailingPunctuation<'_>) -> usize {
    let mut len = candidate.len();
    loop {
        let before = len;
        len = strip_unbalanced_closer(candidate, len);
        len = match punctuation {
            TrailingPunctuation::Default => len - default_punct_suffix(&candidate[..len]),
            TrailingPunctuation::Disabled => len,
            TrailingPunctuation::Custom(rule) => {
                let strip = rule(&candidate[..len]);
                assert!(
                    strip <= len && candidate.is_char_boundary(len - strip),
                    "trailing punctuation rule returned invalid run length {strip} \
                     for candidate of {len} bytes"
                );
                len - strip
            }
        };
        if len == 0 || len == before {
            return len;
        }
    }
}

/// Strip the final character if it is a closing delimiter with no matching
/// opener inside the candidate.
fn strip_unbalanced_closer(candidate: &str, len: usize) -> usize {
    let s = &candidate[..len];
    let Some(closer) = s.chars().next_back() else {
        return len;
    };
    let Some(opener) = pair_for(closer) else {
        return len;
    };
    // Openers in final position don't count: they can't enclose anything.
    let openers = s
        .char_indices()
        .filter(|&(i, ch)| ch == opener && i + ch.len_utf8() != len)
        .count();
    let closers = s.chars().filter(|&ch| ch == closer).count();
    if openers < closers {
        len - closer.len_utf8()
    } else {
        len
    }
}

fn pair_for(closer: char) -> Option<char> {
    QUOTE_PAIRS
        .iter()
        .find(|(close, _)| *close == closer)
        .map(|&(_, open)| open)
}

/// Byte length of the default punctuation suffix: a single trailing HTML
/// entity, or a single trailing punctuation character. The entity is checked
/// first since it subsumes its own trailing `;`.
fn default_punct_suffix(s: &str) -> usize {
    let entity = entity_suffix(s);
    if entity > 0 {
        return entity;
    }
    match s.chars().next_back() {
        Some(ch) if TRAILING_PUNCT.contains(&ch) => ch.len_utf8(),
        _ => 0,
    }
}

fn entity_suffix(s: &str) -> usize {
    let Some(body) = s.strip_suffix(';') else {
        return 0;
    };
    for name in TRAILING_ENTITIES {
        if let Some(head) = body.strip_suffix(name) {
            if head.ends_with("&amp;") {
                return name.len() + "&amp;".len() + 1;
            }
            if head.ends_with('&') {
                return name.len() + 2;
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trimmed<'a>(candidate: &'a str) -> &'a str {
        &candidate[..trim_candidate(candidate, &TrailingPunctuation::Default)]
    }

    #[test]
    fn test_no_trimming_needed() {
        assert_eq!(trimmed("http://example.com"), "http://example.com");
        assert_eq!(trimmed("user@example.com"), "user@example.com");
    }

    #[test]
    fn test_trailing_punctuation() {
        assert_eq!(trimmed("example.com."), "example.com");
        assert_eq!(trimmed("example.com,"), "example.com");
        assert_eq!(trimmed("example.com!?"), "example.com");
        assert_eq!(trimmed("example.com...!"), "example.com");
    }

    #[test]
    fn test_unbalanced_closing_paren() {
        assert_eq!(trimmed("http://example.com)"), "http://example.com");
        assert_eq!(trimmed("http://example.com),"), "http://example.com");
    }

    #[test]
    fn test_balanced_paren_kept() {
        assert_eq!(
            trimmed("http://en.wikipedia.org/wiki/Rust_(film)"),
            "http://en.wikipedia.org/wiki/Rust_(film)"
        );
    }

    #[test]
    fn test_balanced_trailing_pair_kept() {
        // The '(' balances the ')', so neither is stripped.
        assert_eq!(trimmed("example.com()"), "example.com()");
    }

    #[test]
    fn test_unbalanced_bracket_and_guillemet() {
        assert_eq!(trimmed("example.com]"), "example.com");
        assert_eq!(trimmed("example.com}"), "example.com");
        assert_eq!(trimmed("example.com»"), "example.com");
        assert_eq!(trimmed("example.com›"), "example.com");
    }

    #[test]
    fn test_entity_suffixes() {
        assert_eq!(trimmed("example.com&gt;"), "example.com");
        assert_eq!(trimmed("example.com&amp;quot;"), "example.com");
        assert_eq!(trimmed("example.com&raquo;"), "example.com");
        // Unlisted entity stays.
        assert_eq!(trimmed("example.com&copy;"), "example.com&copy");
    }

    #[test]
    fn test_mixed_fixed_point() {
        assert_eq!(trimmed("example.com).,"), "example.com");
        assert_eq!(trimmed("example.com\"»."), "example.com");
    }

    #[test]
    fn test_idempotent() {
        for raw in ["http://example.com).", "example.com...", "a.com»»"] {
            let once = trimmed(raw);
            assert_eq!(trimmed(once), once);
        }
    }

    #[test]
    fn test_disabled_skips_punctuation() {
        let len = trim_candidate("example.com.", &TrailingPunctuation::Disabled);
        assert_eq!(len, "example.com.".len());
        // Unbalanced closers are still stripped.
        let len = trim_candidate("example.com)", &TrailingPunctuation::Disabled);
        assert_eq!(len, "example.com".len());
    }

    #[test]
    fn test_custom_rule() {
        let strip_tilde = |s: &str| if s.ends_with('~') { 1 } else { 0 };
        let len = trim_candidate("example.com~~", &TrailingPunctuation::Custom(&strip_tilde));
        assert_eq!(len, "example.com".len());
        // Default punctuation is not applied under a custom rule.
        let len = trim_candidate("example.com.", &TrailingPunctuation::Custom(&strip_tilde));
        assert_eq!(len, "example.com.".len());
    }

    #[test]
    #[should_panic(expected = "invalid run length")]
    fn test_custom_rule_overrun_panics() {
        let bad = |s: &str| s.len() + 1;
        trim_candidate("example.com", &TrailingPunctuation::Custom(&bad));
    }
}
