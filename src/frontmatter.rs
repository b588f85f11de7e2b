use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::trace;

pub const DELIMITER: &str = "---";

// Top-level `key:` (YAML) or `key =` (TOML) declaration.
static KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)[ \t]*[:=]").expect("KEY_RE: hardcoded regex is valid")
});

/// Split a document into `(front_matter, body)`.
///
/// The front matter runs from the opening `---` line through the next line
/// whose trimmed content is exactly `---`, inclusive. Blank lines before the
/// opening delimiter stay with the front matter so that
/// `front_matter + body == content` always holds.
///
/// A document without an opening delimiter, or with one that is never
/// closed, has no front matter: the whole text is returned as the body.
pub fn split_front_matter(content: &str) -> (&str, &str) {
    if !content.trim_start().starts_with(DELIMITER) {
        return ("", content);
    }

    let mut offset = 0;
    let mut opened = false;

    for line in content.split_inclusive('\n') {
        offset += line.len();

        if !opened {
            if line.trim().is_empty() {
                continue;
            }
            if !is_delimiter(line) {
                return ("", content);
            }
            opened = true;
        } else if is_delimiter(line) {
            return content.split_at(offset);
        }
    }

    ("", content)
}

pub fn filter_keys(front_matter: &str, drop_keys: &HashSet<String>) -> String {
    let mut kept = String::with_capacity(front_matter.len());
    let mut skipping: Option<&str> = None;

    for line in front_matter.split_inclusive('\n') {
        if is_delimiter(line) {
            skipping = None;
            kept.push_str(line);
            continue;
        }

        match declared_key(line) {
            Some(key) if drop_keys.contains(key) => {
                trace!(key, "dropping front matter key");
                skipping = Some(key);
                continue;
            }
            Some(_) => skipping = None,
            None if skipping.is_some() => continue,
            None => {}
        }

        kept.push_str(line);
    }

    kept
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

fn declared_key(line: &str) -> Option<&str> {
    KEY_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
