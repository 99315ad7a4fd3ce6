//! Lexical grammar for link candidates.
//!
//! Hand-rolled byte matchers instead of a regex alternation: each matcher
//! takes a [`Cursor`] by value and returns the cursor advanced past the match
//! on success. Character classes are 256-entry lookup tables so the hot loops
//! stay branch-light.
//!
//! Three token shapes exist, tried by the scanner in this priority order:
//! 1. `scheme://` followed by a run of non-space bytes
//! 2. a bare hostname-plus-TLD or IPv4 literal, with optional path/query
//!    suffix, not followed by a word byte
//! 3. an email address (optionally `mailto:`-prefixed), with optional
//!    query/fragment suffix, not followed by a word byte
//!
//! The TLD set is a closed, enumerated list. Unrecognized TLDs never match;
//! extending the set means extending [`TLD_LIST`].

use std::sync::LazyLock;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cursor::Cursor;

/// Recognized top-level domains.
///
/// Hostname candidates only link when their final label resolves against this
/// list; there is deliberately no wildcard fallback.
pub const TLD_LIST: &[&[u8]] = &[
    b"ac", b"ad", b"aero", b"ae", b"af", b"ag", b"ai", b"al", b"am", b"an", b"ao", b"aq", b"arpa",
    b"ar", b"asia", b"as", b"at", b"au", b"aw", b"ax", b"az", b"ba", b"bb", b"bd", b"be", b"bf",
    b"bg", b"bh", b"biz", b"bi", b"bj", b"bm", b"bn", b"bo", b"br", b"bs", b"bt", b"bv", b"bw",
    b"by", b"bz", b"cat", b"ca", b"cc", b"cd", b"cf", b"cg", b"ch", b"ci", b"ck", b"cl", b"cm",
    b"cn", b"coop", b"com", b"co", b"cr", b"cu", b"cv", b"cx", b"cy", b"cz", b"de", b"dj", b"dk",
    b"dm", b"do", b"dz", b"ec", b"edu", b"ee", b"eg", b"er", b"es", b"et", b"eu", b"fi", b"fj",
    b"fk", b"fm", b"fo", b"fr", b"ga", b"gb", b"gd", b"ge", b"gf", b"gg", b"gh", b"gi", b"gl",
    b"gm", b"gn", b"gov", b"gp", b"gq", b"gr", b"gs", b"gt", b"gu", b"gw", b"gy", b"hk", b"hm",
    b"hn", b"hr", b"ht", b"hu", b"id", b"ie", b"il", b"im", b"info", b"int", b"in", b"io", b"iq",
    b"ir", b"is", b"it", b"je", b"jm", b"jobs", b"jo", b"jp", b"ke", b"kg", b"kh", b"ki", b"km",
    b"kn", b"kp", b"kr", b"kw", b"ky", b"kz", b"la", b"lb", b"lc", b"li", b"lk", b"lr", b"ls",
    b"lt", b"lu", b"lv", b"ly", b"ma", b"mc", b"md", b"me", b"mg", b"mh", b"mil", b"mk", b"ml",
    b"mm", b"mn", b"mobi", b"mo", b"mp", b"mq", b"mr", b"ms", b"mt", b"museum", b"mu", b"mv",
    b"mw", b"mx", b"my", b"mz", b"name", b"na", b"nc", b"net", b"ne", b"nf", b"ng", b"ni", b"nl",
    b"no", b"np", b"nr", b"nu", b"nz", b"om", b"org", b"pa", b"pe", b"pf", b"pg", b"ph", b"pk",
    b"pl", b"pm", b"pn", b"pro", b"pr", b"ps", b"pt", b"pw", b"py", b"qa", b"re", b"ro", b"rs",
    b"ru", b"rw", b"sa", b"sb", b"sc", b"sd", b"se", b"sg", b"sh", b"si", b"sj", b"sk", b"sl",
    b"sm", b"sn", b"so", b"sr", b"st", b"su", b"sv", b"sy", b"sz", b"tc", b"td", b"tel", b"tf",
    b"tg", b"th", b"tj", b"tk", b"tl", b"tm", b"tn", b"to", b"tp", b"travel", b"tr", b"tt", b"tv",
    b"tw", b"tz", b"ua", b"ug", b"uk", b"um", b"us", b"uy", b"uz", b"va", b"vc", b"ve", b"vg",
    b"vi", b"vn", b"vu", b"wf", b"ws", b"xn--0zwm56d", b"xn--11b5bs3a9aj6g", b"xn--80akhbyknj4f",
    b"xn--9t4b11yi5a", b"xn--deba0ad", b"xn--g6w251d", b"xn--hgbk6aj7f53bba",
    b"xn--hlcj6aya9esc7a", b"xn--jxalpdlp", b"xn--kgbechtv", b"xn--zckzah", b"ye", b"yt", b"yu",
    b"za", b"zm", b"zw",
];

/// Longest entry in [`TLD_LIST`] (`xn--hgbk6aj7f53bba`).
pub(crate) const MAX_TLD_LEN: usize = 18;

static TLDS: LazyLock<FxHashSet<&'static [u8]>> =
    LazyLock::new(|| TLD_LIST.iter().copied().collect());

/// ASCII whitespace as the scan grammar sees it.
#[inline]
pub(crate) const fn is_space_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Word bytes for boundary and lookahead checks (`[A-Za-z0-9_]`).
///
/// Non-ASCII bytes are never word bytes, so multi-byte characters terminate
/// bare-host and email tokens the same way punctuation does.
#[inline]
pub(crate) const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Bytes allowed in a scheme name (`[a-zA-Z0-9.-]`).
#[inline]
const fn is_scheme_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-'
}

const fn exclude(mut table: [bool; 256], bytes: &[u8]) -> [bool; 256] {
    let mut i = 0;
    while i < bytes.len() {
        table[bytes[i] as usize] = false;
        i += 1;
    }
    table
}

const fn exclude_space(mut table: [bool; 256]) -> [bool; 256] {
    let mut b = 0usize;
    while b < 256 {
        if is_space_byte(b as u8) {
            table[b] = false;
        }
        b += 1;
    }
    table
}

/// Bytes allowed inside a hostname label. Everything except whitespace and
/// the separator/punctuation set; bytes >= 0x80 are allowed, so multi-byte
/// characters pass through labels untouched.
const HOST_LABEL_TABLE: [bool; 256] =
    exclude_space(exclude([true; 256], b"!@#$%^&*()_=+[]{}\\|;:'\",.<>/?"));

/// Bytes allowed in the local part of an email address (dots are handled
/// structurally: runs separated by single dots).
const EMAIL_LOCAL_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut b = 0usize;
    while b < 256 {
        if (b as u8).is_ascii_alphanumeric() {
            table[b] = true;
        }
        b += 1;
    }
    let extras = b"!#$%&'*+/=?^_`{|}~-";
    let mut i = 0;
    while i < extras.len() {
        table[extras[i] as usize] = true;
        i += 1;
    }
    table
};

/// Bytes allowed after `scheme://` and in fragments (`[^<>\s]`).
const URL_TAIL_TABLE: [bool; 256] = exclude_space(exclude([true; 256], b"<>"));

/// Bytes allowed in a path suffix (`[^#?<>\s]`).
const PATH_TABLE: [bool; 256] = exclude_space(exclude([true; 256], b"#?<>"));

/// Bytes allowed in a query suffix (`[^#<>\s]`).
const QUERY_TABLE: [bool; 256] = exclude_space(exclude([true; 256], b"#<>"));

#[inline]
pub(crate) fn is_host_label_byte(b: u8) -> bool {
    HOST_LABEL_TABLE[b as usize]
}

#[inline]
fn is_email_local_byte(b: u8) -> bool {
    EMAIL_LOCAL_TABLE[b as usize]
}

#[inline]
fn is_url_tail_byte(b: u8) -> bool {
    URL_TAIL_TABLE[b as usize]
}

/// Match `scheme://` followed by at least one non-space byte.
pub(crate) fn scheme_url(mut c: Cursor<'_>) -> Option<Cursor<'_>> {
    if c.skip_while(is_scheme_byte) == 0 {
        return None;
    }
    if !(c.eat(b':') && c.eat(b'/') && c.eat(b'/')) {
        return None;
    }
    if c.skip_while(is_url_tail_byte) == 0 {
        return None;
    }
    Some(c)
}

/// Check whether a trimmed candidate still carries an explicit scheme.
pub(crate) fn starts_with_scheme(bytes: &[u8]) -> bool {
    let mut c = Cursor::new(bytes);
    c.skip_while(is_scheme_byte) > 0 && c.eat(b':') && c.eat(b'/') && c.eat(b'/')
}

/// Match a bare host-or-IP token with optional path/query/fragment suffix,
/// not followed by a word byte.
pub(crate) fn bare_host(c: Cursor<'_>) -> Option<Cursor<'_>> {
    host_or_ip_then(c, |mut c| {
        if matches!(c.peek(), Some(b';' | b'/')) {
            c.bump();
            c.skip_while(|b| PATH_TABLE[b as usize]);
        }
        let c = query_fragment(c);
        end_boundary(c)
    })
}

/// Match an email token, optionally `mailto:`-prefixed, with optional
/// query/fragment suffix, not followed by a word byte.
pub(crate) fn email(c: Cursor<'_>) -> Option<Cursor<'_>> {
    let mut probe = c;
    probe.eat_ignore_ascii_case(b"mailto:");
    if probe.skip_while(is_email_local_byte) == 0 {
        return None;
    }
    // Further dot-separated local runs; a dot must be followed by another run.
    loop {
        let mut dotted = probe;
        if !dotted.eat(b'.') || dotted.skip_while(is_email_local_byte) == 0 {
            break;
        }
        probe = dotted;
    }
    if !probe.eat(b'@') {
        return None;
    }
    host_or_ip_then(probe, |c| end_boundary(query_fragment(c)))
}

/// Optional `?query` and `#fragment` suffixes.
fn query_fragment(mut c: Cursor<'_>) -> Cursor<'_> {
    if c.eat(b'?') {
        c.skip_while(|b| QUERY_TABLE[b as usize]);
    }
    if c.eat(b'#') {
        c.skip_while(is_url_tail_byte);
    }
    c
}

/// The `(?!\w)` lookahead: the token must not run straight into a word byte.
#[inline]
fn end_boundary(c: Cursor<'_>) -> Option<Cursor<'_>> {
    match c.peek() {
        Some(b) if is_word_byte(b) => None,
        _ => Some(c),
    }
}

/// Match a hostname+TLD or an IPv4 literal, then apply `rest` to whatever
/// follows. Hostname labels are consumed greedily and given back one at a
/// time when no TLD (or no valid suffix) fits, mirroring how a backtracking
/// alternation would settle.
fn host_or_ip_then<'a, F>(c: Cursor<'a>, rest: F) -> Option<Cursor<'a>>
where
    F: Fn(Cursor<'a>) -> Option<Cursor<'a>>,
{
    // Collect the cursor position after each `label.` prefix.
    let mut after_dots: SmallVec<[Cursor<'a>; 8]> = SmallVec::new();
    let mut probe = c;
    loop {
        let mut label = probe;
        if label.skip_while(is_host_label_byte) == 0 || !label.eat(b'.') {
            break;
        }
        probe = label;
        after_dots.push(probe);
    }
    // Longest prefix first: most labels, then longest TLD.
    for &tld_start in after_dots.iter().rev() {
        if let Some(end) = tld_then(tld_start, &rest) {
            return Some(end);
        }
    }
    ipv4_then(c, &rest)
}

/// Try the longest recognized TLD at the cursor whose suffix also matches.
fn tld_then<'a, F>(c: Cursor<'a>, rest: &F) -> Option<Cursor<'a>>
where
    F: Fn(Cursor<'a>) -> Option<Cursor<'a>>,
{
    let avail = c.remaining().min(MAX_TLD_LEN);
    for len in (2..=avail).rev() {
        let mut lowered: SmallVec<[u8; MAX_TLD_LEN]> = SmallVec::from_slice(&c.rest()[..len]);
        lowered.make_ascii_lowercase();
        if !TLDS.contains(lowered.as_slice()) {
            continue;
        }
        let mut after = c;
        after.advance(len);
        if let Some(end) = rest(after) {
            return Some(end);
        }
    }
    None
}

/// Match four dot-separated octets, each 0-255 with no leading zeros.
fn ipv4_then<'a, F>(c: Cursor<'a>, rest: &F) -> Option<Cursor<'a>>
where
    F: Fn(Cursor<'a>) -> Option<Cursor<'a>>,
{
    let mut probe = c;
    for i in 0..4 {
        let digits = probe
            .rest()
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 || digits > 3 || !valid_octet(&probe.rest()[..digits]) {
            return None;
        }
        probe.advance(digits);
        if i < 3 && !probe.eat(b'.') {
            return None;
        }
    }
    rest(probe)
}

/// An octet is one digit, two digits not starting with zero, or three digits
/// in 100-255.
fn valid_octet(digits: &[u8]) -> bool {
    match digits {
        [_] => true,
        [first, _] => *first != b'0',
        [b'1', _, _] => true,
        [b'2', second, third] => *second < b'5' || (*second == b'5' && *third <= b'5'),
        _ => false,
    }
}
