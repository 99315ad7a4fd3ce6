//! Single-pass candidate scanner.
//!
//! Finds the next non-overlapping occurrence of the combined grammar, left to
//! right, with no backtracking across already-emitted spans. Every candidate
//! token contains a `.`, `:` or `@`, so the scanner hops between those
//! trigger bytes with `memchr3` and only attempts grammar matches inside the
//! token run leading up to each trigger, instead of probing every byte.
//!
//! The scan cursor lives in the `Scanner` value itself; a fresh scanner per
//! call means interleaved scans can never corrupt each other's position.

use memchr::memchr3;

use crate::cursor::Cursor;
use crate::patterns::{self, is_host_label_byte, is_word_byte};

/// A raw match: the span of a candidate before trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte (pre-trim).
    pub end: usize,
}

/// Iterator over raw candidates in a text.
#[derive(Debug)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        let bytes = self.text.as_bytes();
        'scan: loop {
            let trigger = self.pos + memchr3(b'.', b':', b'@', &bytes[self.pos..])?;
            // A match can only start inside the token run ending at the
            // trigger: any earlier start would cross a byte no token allows.
            let mut run_start = trigger;
            while run_start > self.pos && is_token_byte(bytes[run_start - 1]) {
                run_start -= 1;
            }
            for start in run_start..=trigger {
                if !self.text.is_char_boundary(start) {
                    continue;
                }
                if let Some(end) = match_at(bytes, start) {
                    // Resume after the raw match whether or not it is kept.
                    self.pos = end;
                    if start > 0 && matches!(bytes[start - 1], b'/' | b':') {
                        // Spurious continuation of a scheme or path already
                        // consumed, e.g. the second host in `http://a.com//b.com`.
                        continue 'scan;
                    }
                    return Some(Candidate { start, end });
                }
            }
            self.pos = trigger + 1;
        }
    }
}

/// Try the combined grammar at one position, in priority order.
fn match_at(bytes: &[u8], start: usize) -> Option<usize> {
    let cursor = Cursor::new_at(bytes, start);
    // Scheme URLs and bare hosts require a word boundary; emails don't.
    if at_word_boundary(bytes, start) {
        if let Some(end) = patterns::scheme_url(cursor) {
            return Some(end.offset());
        }
        if let Some(end) = patterns::bare_host(cursor) {
            return Some(end.offset());
        }
    }
    patterns::email(cursor).map(|c| c.offset())
}

/// `\b` against the ASCII word class: exactly one side is a word byte.
fn at_word_boundary(bytes: &[u8], pos: usize) -> bool {
    let before = pos > 0 && is_word_byte(bytes[pos - 1]);
    let here = pos < bytes.len() && is_word_byte(bytes[pos]);
    before != here
}

/// Union of the byte classes a candidate can start-and-run through before
/// its first trigger byte: hostname labels, email local parts, scheme names.
#[inline]
fn is_token_byte(b: u8) -> bool {
    is_host_label_byte(b)
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'/'
                | b'='
                | b'?'
                | b'^'
                | b'_'
                | b'{'
                | b'|'
                | b'}'
                | b'~'
                | b'.'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<&str> {
        Scanner::new(text).map(|c| &text[c.start..c.end]).collect()
    }

    #[test]
    fn test_empty_and_plain_text() {
        assert!(spans("").is_empty());
        assert!(spans("no links in here").is_empty());
        assert!(spans("dots and colons: yes. at signs @ too").is_empty());
    }

    #[test]
    fn test_single_url() {
        assert_eq!(spans("Visit http://example.com today"), ["http://example.com"]);
    }

    #[test]
    fn test_raw_match_is_greedy() {
        // Trailing punctuation belongs to the raw match; the trimmer deals
        // with it later.
        assert_eq!(spans("See (http://example.com)"), ["http://example.com)"]);
    }

    #[test]
    fn test_multiple_candidates_in_order() {
        assert_eq!(
            spans("a.com then b.org then c@d.net"),
            ["a.com", "b.org", "c@d.net"]
        );
    }

    #[test]
    fn test_slash_prefixed_match_rejected() {
        // The embedded `//example2.com` must not become a second link.
        assert_eq!(
            spans("http://example.com x //example2.com"),
            ["http://example.com"]
        );
    }

    #[test]
    fn test_colon_prefixed_match_rejected() {
        assert!(spans("foo:bar.com").is_empty());
    }

    #[test]
    fn test_scan_resumes_after_rejected_match() {
        // The rejected candidate is consumed whole; scanning picks up after it.
        assert_eq!(spans("foo:bar.com and baz.org"), ["baz.org"]);
    }

    #[test]
    fn test_scheme_url_wins_over_bare_host() {
        assert_eq!(spans("example.com://weird"), ["example.com://weird"]);
    }

    #[test]
    fn test_candidate_offsets() {
        let text = "go to www.example.com now";
        let all: Vec<Candidate> = Scanner::new(text).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(&text[all[0].start..all[0].end], "www.example.com");
        assert_eq!(all[0].start, 6);
    }

    #[test]
    fn test_match_after_non_word_junk() {
        // An underscore breaks the label grammar but a later label run matches.
        assert_eq!(spans("foo_www.example.com"), ["example.com"]);
    }

    #[test]
    fn test_multibyte_text_is_safe() {
        assert_eq!(spans("héllo www.example.com wörld"), ["www.example.com"]);
        assert!(spans("é.com").is_empty());
    }

    #[test]
    fn test_word_boundary_blocks_embedded_host() {
        assert!(spans("notadomain1234.5.6.7.8x").is_empty());
    }
}
