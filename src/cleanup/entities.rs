use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

const REPLACEMENT: char = '\u{FFFD}';

// Numeric references 0x80-0x9F name windows-1252 characters, not C1 controls.
// The five positions windows-1252 leaves undefined keep their code point.
const WINDOWS_1252: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

static CHAR_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+)|#([0-9]+)|[A-Za-z][A-Za-z0-9]*);?")
        .expect("CHAR_REF_RE: hardcoded regex is valid")
});

/// Decode named, decimal and hexadecimal character references in one pass.
///
/// Each reference is decoded on its own, so `&amp;lt;` becomes `&lt;`, not `<`.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    CHAR_REF_RE.replace_all(text, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => Some(u32::from_str_radix(hex.as_str(), 16).ok()),
            (None, Some(dec)) => Some(dec.as_str().parse::<u32>().ok()),
            (None, None) => None,
        };

        match code {
            Some(code) => numeric_reference(code),
            None => html_escape::decode_html_entities(&caps[0]).into_owned(),
        }
    })
}

fn numeric_reference(code: Option<u32>) -> String {
    let Some(code) = code else {
        return REPLACEMENT.to_string();
    };

    match code {
        0 | 0xD800..=0xDFFF | 0x11_0000.. => REPLACEMENT.to_string(),
        0x80..=0x9F => WINDOWS_1252[(code - 0x80) as usize].to_string(),
        0x0D => "\r".to_string(),
        _ if is_disallowed(code) => String::new(),
        _ => char::from_u32(code).map_or_else(|| REPLACEMENT.to_string(), String::from),
    }
}

// Control characters and noncharacters are dropped.
fn is_disallowed(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F | 0xFDD0..=0xFDEF)
        || code & 0xFFFE == 0xFFFE
}
