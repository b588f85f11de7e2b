use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static MORE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--more-->").expect("MORE_TAG_RE: hardcoded regex is valid"));

#[derive(Debug, Clone)]
pub struct ShortcodeStripper {
    pattern: Option<Regex>,
}

impl ShortcodeStripper {
    pub fn new(prefixes: &[String]) -> Result<Self, regex::Error> {
        let pattern = match alternation(prefixes) {
            Some(alt) => Some(Regex::new(&format!(r"\[/?(?:{alt})[^\]]*\]"))?),
            None => None,
        };
        Ok(Self { pattern })
    }

    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(re) => re.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoreTagStripper;

impl MoreTagStripper {
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        MORE_TAG_RE.replace_all(text, "")
    }
}

/// Removes `div` and `span` elements whose `class` attribute starts with a
/// theme prefix, together with their content.
///
/// A match ends at the first closing tag of the same element type, so a
/// nested element of that type cuts the match short and leaves the rest of
/// the outer wrapper behind.
#[derive(Debug, Clone)]
pub struct LayoutWrapperStripper {
    pattern: Option<Regex>,
}

impl LayoutWrapperStripper {
    pub fn new(class_prefixes: &[String]) -> Result<Self, regex::Error> {
        let Some(alt) = alternation(class_prefixes) else {
            return Ok(Self { pattern: None });
        };

        let element = |tag: &str| format!(r#"<{tag}\b[^>]*\bclass="(?:{alt})[^>]*>.*?</{tag}>"#);
        let pattern = Regex::new(&format!("(?is){}|{}", element("div"), element("span")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(re) => re.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }
}

fn alternation(literals: &[String]) -> Option<String> {
    if literals.is_empty() {
        return None;
    }
    let escaped: Vec<String> = literals.iter().map(|l| regex::escape(l)).collect();
    Some(escaped.join("|"))
}
