use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Closed set of literal shapes an initializer expression can take.
///
/// Anything that is not one of the four literal forms is `Other`; there is no
/// unmatched case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    Integer,
    Float,
    Boolean,
    String,
    Other,
}

// ------------------------------- Shapes ---------------------------------- //

static INTEGER_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0x[0-9A-Fa-f][0-9A-Fa-f_]*|0o[0-7][0-7_]*|0b[01][01_]*|[0-9][0-9_]*)$")
        .expect("integer literal pattern")
});

static DECIMAL_FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9][0-9_]*(?:\.[0-9][0-9_]*(?:[eE][+-]?[0-9][0-9_]*)?|[eE][+-]?[0-9][0-9_]*)$")
        .expect("decimal float literal pattern")
});

static HEX_FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0x[0-9A-Fa-f][0-9A-Fa-f_]*(?:\.[0-9A-Fa-f][0-9A-Fa-f_]*)?[pP][+-]?[0-9][0-9_]*$")
        .expect("hex float literal pattern")
});

/// Classify expression text by its literal shape.
///
/// A leading `-` is a prefix operator applied to a literal, not part of the
/// literal itself, so `-5` is `Other`.
pub fn classify(text: &str) -> LiteralKind {
    let text = text.trim();
    if text == "true" || text == "false" {
        LiteralKind::Boolean
    } else if INTEGER_LITERAL.is_match(text) {
        LiteralKind::Integer
    } else if DECIMAL_FLOAT_LITERAL.is_match(text) || HEX_FLOAT_LITERAL.is_match(text) {
        LiteralKind::Float
    } else if is_string_literal(text) {
        LiteralKind::String
    } else {
        LiteralKind::Other
    }
}

/// True when `text` is exactly one string literal: `"..."`, `"""..."""`, or a
/// raw `#"..."#` form. Concatenations such as `"a" + "b"` are not.
pub fn is_string_literal(text: &str) -> bool {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    let rest = &text[hashes..];
    let delimiter = if rest.starts_with("\"\"\"") {
        "\"\"\""
    } else if rest.starts_with('"') {
        "\""
    } else {
        return false;
    };
    let closing = format!("{delimiter}{}", "#".repeat(hashes));
    let body = &rest[delimiter.len()..];
    match find_terminator(body, &closing, hashes) {
        Some(end) => end + closing.len() == body.len(),
        None => false,
    }
}

/// Byte offset of the first unescaped `closing` delimiter in `body`.
fn find_terminator(body: &str, closing: &str, hashes: usize) -> Option<usize> {
    let escape = format!("\\{}", "#".repeat(hashes));
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if body[i..].starts_with(&escape) {
            i += escape.len();
            if bytes.get(i) == Some(&b'(') {
                i = skip_interpolation(body, i)?;
            } else {
                // skip the escaped character (whole code point)
                i += body[i..].chars().next().map(char::len_utf8).unwrap_or(0);
            }
            continue;
        }
        if body[i..].starts_with(closing) {
            return Some(i);
        }
        i += body[i..].chars().next().map(char::len_utf8).unwrap_or(1);
    }
    None
}

/// `open` points at the `(` of an interpolation; returns the offset just past
/// its matching `)`. Quoted segments inside the interpolation are skipped.
fn skip_interpolation(body: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_quote = false;
    let mut escaped = false;
    for (offset, c) in body[open..].char_indices() {
        if in_quote {
            match (escaped, c) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_quote = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quote = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}
