//! Reverses the transport encoding applied by the submission page.
//!
//! Query-string transport folds a raw `+` into a space and cannot carry raw
//! newlines, so the front end ships source text with every newline written as
//! the two characters `\n` and every plus sign written as the token `\plus`.
//! [`decode`] undoes that; [`encode`] is the exact inverse, used by the
//! shipped page and by the round-trip tests.
//!
//! Both directions rewrite every occurrence. Source that itself contains a
//! literal `\n` or `\plus` substring cannot survive a round trip; that
//! ambiguity is intrinsic to the scheme and accepted.

/// Decode transported text into literal source.
///
/// Pure and total: any input decodes to something. A single left-to-right
/// scan handles both tokens, so neither rewrite can create or destroy an
/// occurrence of the other. Unrecognized escapes and a trailing lone
/// backslash pass through verbatim.
pub fn decode(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    let mut rest = data;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("\\n") {
            out.push('\n');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("\\plus") {
            out.push('+');
            rest = after;
        } else {
            out.push('\\');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Encode literal source for transport: every newline becomes `\n`, every
/// plus sign becomes `\plus`.
pub fn encode(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for ch in source.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '+' => out.push_str("\\plus"),
            other => out.push(other),
        }
    }
    out
}
