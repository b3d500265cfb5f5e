//! Text cleanup applied to everything read out of a page
//!
//! Generated docs embed escaped unicode and invisible characters (JDK 9 puts a
//! zero-width space between a method name and its parameter list). Both break
//! name equality, so every extracted string passes through [`normalize`].

use scraper::ElementRef;

/// Elements whose boundaries separate words in rendered text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "blockquote", "br", "caption", "dd", "div", "dl", "dt", "h1", "h2", "h3", "h4",
    "h5", "h6", "hr", "li", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Decodes escapes, strips invisible characters and collapses whitespace
pub fn normalize(input: &str) -> String {
    let decoded = decode_unicode_escapes(input);
    let mut out = String::with_capacity(decoded.len());
    let mut pending_space = false;

    for c in decoded.chars() {
        if is_invisible(c) {
            continue;
        }
        if c.is_whitespace() || c.is_control() || c == '\u{00A0}' {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

/// Zero-width, bidi-format and soft-hyphen characters
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
            | '\u{00AD}'
    )
}

/// Replaces `\uXXXX` sequences with the characters they name
///
/// Surrogate pairs written as two escapes are combined. Malformed escapes and
/// lone surrogates are left as written.
pub fn decode_unicode_escapes(input: &str) -> String {
    if !input.contains("\\u") {
        return input.to_string();
    }

    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if let Some(high) = escape_at(&chars, i) {
            if (0xD800..0xDC00).contains(&high) {
                if let Some(low) = escape_at(&chars, i + 6) {
                    if (0xDC00..0xE000).contains(&low) {
                        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                        if let Some(c) = char::from_u32(code) {
                            out.push(c);
                            i += 12;
                            continue;
                        }
                    }
                }
            } else if let Some(c) = char::from_u32(high) {
                out.push(c);
                i += 6;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Reads the code unit of a `\uXXXX` escape starting at `i`
fn escape_at(chars: &[char], i: usize) -> Option<u32> {
    if i + 6 > chars.len() || chars[i] != '\\' || chars[i + 1] != 'u' {
        return None;
    }
    let hex: String = chars[i + 2..i + 6].iter().collect();
    u32::from_str_radix(&hex, 16).ok()
}

/// Text of an element with its text nodes concatenated, normalized
///
/// Suited to code such as signatures, where markup splits tokens.
pub fn inline_text(element: &ElementRef<'_>) -> String {
    normalize(&element.text().collect::<String>())
}

/// Text of an element as it reads when rendered, normalized
///
/// Inline markup such as `<code>` or `<a>` joins its neighbours directly;
/// block elements and `<br>` separate words.
pub fn block_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_rendered(element, &mut raw);
    normalize(&raw)
}

fn push_rendered(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let block = BLOCK_ELEMENTS.contains(&child.value().name());
            if block {
                out.push(' ');
            }
            push_rendered(&child, out);
            if block {
                out.push(' ');
            }
        }
    }
}
