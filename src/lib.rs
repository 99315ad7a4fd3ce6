//! ferrolink: high-performance plain-text URL and email linkifier
//!
//! Finds URLs, bare hostnames, IPv4 addresses, and email addresses in plain
//! text and rewrites them as HTML anchors, trimming trailing punctuation and
//! unbalanced closing delimiters that aren't part of the address.
//!
//! # Design Principles
//! - No regex: pure byte-level scanning
//! - Single pass: the scan cursor only moves forward
//! - Minimal allocations: chunks borrow the input text
//! - Pure: no global state, no I/O, deterministic output
//!
//! # Trust model
//! Input text is assumed trusted or pre-sanitized: the default formatter
//! emits chunk text verbatim and only attribute-escapes the href. Run
//! untrusted text through an HTML sanitizer before (or instead of) this
//! crate.
//!
//! # Example
//! ```
//! let html = ferrolink::linkify("Visit http://example.com today");
//! assert_eq!(
//!     html,
//!     "Visit <a href=\"http://example.com\" title=\"http://example.com\">http://example.com</a> today"
//! );
//! ```

pub mod cursor;
pub mod patterns;
pub mod scanner;
pub mod scheme;
pub mod trim;

use std::borrow::Cow;

pub use scanner::{Candidate, Scanner};
pub use scheme::resolve_href;
pub use trim::TrailingPunctuation;

use trim::trim_candidate;

/// A contiguous span of the output: literal text, or a recognized link.
///
/// Chunks partition the input losslessly: concatenating every chunk's text
/// reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// Literal, unlinked text.
    Text(&'a str),
    /// A recognized link and its resolved address.
    Link {
        /// The trimmed candidate as it appeared in the input.
        text: &'a str,
        /// The dereferenceable address; borrowed when the candidate already
        /// carries a scheme.
        href: Cow<'a, str>,
    },
}

impl Chunk<'_> {
    /// The chunk's text as it appeared in the input.
    pub fn text(&self) -> &str {
        match self {
            Chunk::Text(text) => text,
            Chunk::Link { text, .. } => text,
        }
    }

    /// The resolved address, for link chunks.
    pub fn href(&self) -> Option<&str> {
        match self {
            Chunk::Text(_) => None,
            Chunk::Link { href, .. } => Some(href),
        }
    }
}

/// How chunks are rendered to output fragments.
#[derive(Clone, Copy, Default)]
pub enum Formatter<'a> {
    /// `<a href="HREF" title="HREF">TEXT</a>` for links, verbatim text
    /// otherwise. The href is attribute-escaped; the text is not.
    #[default]
    Default,
    /// Caller-supplied formatter, called with the chunk text and, for link
    /// chunks, the resolved href.
    Custom(&'a dyn Fn(&str, Option<&str>) -> String),
}

impl std::fmt::Debug for Formatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Linkification options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options<'a> {
    pub formatter: Formatter<'a>,
    pub trailing_punctuation: TrailingPunctuation<'a>,
}

/// Linkify text with default options.
///
/// This is the primary API for simple use cases.
pub fn linkify(text: &str) -> String {
    linkify_with_options(text, &Options::default())
}

/// Linkify text with options.
///
/// Returns the input unchanged when nothing in it links, or when the
/// rendered result comes out empty (a formatter that swallows everything
/// should not be able to erase the note text it was handed).
pub fn linkify_with_options(text: &str, options: &Options<'_>) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    for chunk in chunks(text, &options.trailing_punctuation) {
        match options.formatter {
            Formatter::Default => match &chunk {
                Chunk::Text(t) => out.push_str(t),
                Chunk::Link { text, href } => write_anchor(&mut out, text, href),
            },
            Formatter::Custom(format) => out.push_str(&format(chunk.text(), chunk.href())),
        }
    }
    if out.is_empty() { text.to_owned() } else { out }
}

/// Split text into the ordered text/link chunks that `linkify` renders.
///
/// Exposed separately so the partition itself is inspectable: chunk texts
/// concatenate back to the input, byte for byte.
pub fn chunks<'a>(text: &'a str, punctuation: &TrailingPunctuation<'_>) -> Vec<Chunk<'a>> {
    let mut parts = Vec::new();
    let mut prev_end = 0;
    for candidate in Scanner::new(text) {
        let raw = &text[candidate.start..candidate.end];
        let link_end = candidate.start + trim_candidate(raw, punctuation);
        let link = &text[candidate.start..link_end];
        if prev_end != candidate.start {
            parts.push(Chunk::Text(&text[prev_end..candidate.start]));
        }
        parts.push(Chunk::Link {
            text: link,
            href: resolve_href(link),
        });
        // Trimmed-off bytes fall into the next text chunk; the scanner still
        // resumes after the raw end.
        prev_end = link_end;
    }
    if prev_end != text.len() {
        parts.push(Chunk::Text(&text[prev_end..]));
    }
    parts
}

fn write_anchor(out: &mut String, text: &str, href: &str) {
    let attr = html_escape::encode_double_quoted_attribute(href);
    out.push_str("<a href=\"");
    out.push_str(&attr);
    out.push_str("\" title=\"");
    out.push_str(&attr);
    out.push_str("\">");
    out.push_str(text);
    out.push_str("</a>");
}
