use crate::error::CleanupError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_DROP_KEYS: &[&str] = &[
    "eltd_disable_footer_meta",
    "eltd_hide_background_image_meta",
    "eltd_show_title_area_meta",
    "eltd_page_padding_meta",
    "aktt_notify_twitter",
    // themes read the author from site config instead
    "author",
];

pub const DEFAULT_SHORTCODE_PREFIXES: &[&str] = &["vc_"];

pub const DEFAULT_WRAPPER_CLASS_PREFIXES: &[&str] = &["eltd-", "wp-"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub drop_keys: Vec<String>,
    pub shortcode_prefixes: Vec<String>,
    pub wrapper_class_prefixes: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            drop_keys: to_owned(DEFAULT_DROP_KEYS),
            shortcode_prefixes: to_owned(DEFAULT_SHORTCODE_PREFIXES),
            wrapper_class_prefixes: to_owned(DEFAULT_WRAPPER_CLASS_PREFIXES),
        }
    }
}

impl Rules {
    pub fn load(path: &Path) -> Result<Self, CleanupError> {
        let raw = fs::read_to_string(path).map_err(|source| CleanupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let rules = Self::from_yaml(&raw).map_err(|source| CleanupError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        rules.validate()?;
        Ok(rules)
    }

    fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), CleanupError> {
        if self.shortcode_prefixes.iter().any(|p| p.is_empty()) {
            return Err(CleanupError::InvalidRule("empty shortcode prefix".into()));
        }
        if self.wrapper_class_prefixes.iter().any(|p| p.is_empty()) {
            return Err(CleanupError::InvalidRule("empty wrapper class prefix".into()));
        }
        Ok(())
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
