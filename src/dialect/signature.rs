//! Splitting member signatures into structured parts
//!
//! All inputs are already normalized text (see [`super::text::normalize`]).

use crate::model::ParameterDoc;

/// Java modifier keywords, in no particular order
const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "default",
    "synchronized",
    "native",
    "strictfp",
    "transient",
    "volatile",
    "sealed",
    "non-sealed",
];

/// Returns true for a Java modifier keyword
pub fn is_modifier(token: &str) -> bool {
    MODIFIERS.contains(&token)
}

/// Splits a `modifiers type` string into its modifiers and the remaining type
///
/// Annotations in front of the declaration are dropped.
pub fn split_modifiers(text: &str) -> (Vec<String>, String) {
    let mut modifiers = Vec::new();
    let mut rest = text.trim();

    loop {
        let (token, tail) = match rest.split_once(' ') {
            Some((token, tail)) => (token, tail.trim_start()),
            None => (rest, ""),
        };
        if token.is_empty() {
            break;
        }
        let is_annotation = token.starts_with('@') && !tail.is_empty();
        if is_modifier(token) {
            modifiers.push(token.to_string());
        } else if !is_annotation {
            break;
        }
        rest = tail;
    }

    (modifiers, rest.to_string())
}

/// Member name from a signature such as `foo(int x)` or `static int foo(int x)`
pub fn member_name(signature: &str) -> String {
    let head = match signature.find('(') {
        Some(idx) => &signature[..idx],
        None => signature,
    };
    let head = head.split(" = ").next().unwrap_or(head);
    head.split_whitespace().last().unwrap_or("").to_string()
}

/// Returns true if `declaration` contains `signature` at the start of an identifier
///
/// Keeps `get(int i)` from matching inside `forget(int i)`.
pub fn contains_signature(declaration: &str, signature: &str) -> bool {
    if signature.is_empty() {
        return false;
    }
    declaration.match_indices(signature).any(|(idx, _)| {
        declaration[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_' || c == '$'))
    })
}

/// Text between the first `(` and its matching `)`
fn parameter_list(signature: &str) -> Option<&str> {
    let start = signature.find('(')?;
    let mut depth = 0usize;
    for (offset, c) in signature[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&signature[start + 1..start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits on `separator` where it is not nested inside `<>`, `()` or `[]`
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();

    for c in text.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            _ => {}
        }
        if c == separator && depth <= 0 {
            parts.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(c);
        }
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts.retain(|p| !p.is_empty());
    parts
}

/// Declared parameters of a method or constructor signature
///
/// Types keep their generic arguments; descriptions are left empty.
pub fn parse_parameters(signature: &str) -> Vec<ParameterDoc> {
    let Some(list) = parameter_list(signature) else {
        return Vec::new();
    };

    split_top_level(list, ',')
        .into_iter()
        .filter_map(|param| {
            let tokens: Vec<&str> = param
                .split_whitespace()
                .filter(|t| !t.starts_with('@') && *t != "final")
                .collect();
            match tokens.as_slice() {
                [] => None,
                [only] => Some(ParameterDoc {
                    name: String::new(),
                    type_name: only.to_string(),
                    description: String::new(),
                }),
                [types @ .., name] => Some(ParameterDoc {
                    name: name.to_string(),
                    type_name: types.join(" "),
                    description: String::new(),
                }),
            }
        })
        .collect()
}

/// Exception types named in a `throws` clause
pub fn parse_throws(signature: &str) -> Vec<String> {
    let tail = match signature.rfind(')') {
        Some(idx) => &signature[idx + 1..],
        None => signature,
    };
    match tail.split_once("throws ") {
        Some((_, list)) => split_top_level(list, ','),
        None => Vec::new(),
    }
}

/// Value after ` = ` in a field declaration
pub fn constant_value(signature: &str) -> Option<String> {
    signature
        .split_once(" = ")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Splits a `name - description` note into its two halves
pub fn split_note(note: &str) -> (String, String) {
    match note.split_once(" - ") {
        Some((name, description)) => (name.trim().to_string(), description.trim().to_string()),
        None => {
            let mut parts = note.trim().splitn(2, ' ');
            let name = parts.next().unwrap_or("").to_string();
            let description = parts.next().unwrap_or("").trim().to_string();
            (name, description)
        }
    }
}
