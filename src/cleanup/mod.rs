pub mod entities;
pub mod strip;

use crate::config::Rules;
use crate::frontmatter;
use std::collections::HashSet;
use strip::{LayoutWrapperStripper, MoreTagStripper, ShortcodeStripper};

pub use entities::decode_entities;

#[derive(Debug, Clone)]
pub struct Normalizer {
    drop_keys: HashSet<String>,
    shortcodes: ShortcodeStripper,
    more_tag: MoreTagStripper,
    wrappers: LayoutWrapperStripper,
}

impl Normalizer {
    pub fn new(rules: &Rules) -> Result<Self, regex::Error> {
        Ok(Self {
            drop_keys: rules.drop_keys.iter().cloned().collect(),
            shortcodes: ShortcodeStripper::new(&rules.shortcode_prefixes)?,
            more_tag: MoreTagStripper,
            wrappers: LayoutWrapperStripper::new(&rules.wrapper_class_prefixes)?,
        })
    }

    pub fn transform(&self, text: &str) -> String {
        let (front_matter, body) = frontmatter::split_front_matter(text);

        let mut cleaned = frontmatter::filter_keys(front_matter, &self.drop_keys);

        let body = self.shortcodes.strip(body);
        let body = self.more_tag.strip(&body);
        let body = self.wrappers.strip(&body);
        let body = decode_entities(&body);

        cleaned.push_str(&body);
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(&Rules::default()).unwrap()
    }

    #[test]
    fn test_all_stages_compose() {
        let input = "---\nauthor: Jane\nfoo: bar\n---\n\
                     Hello [vc_row]World[/vc_row]&amp;more<!--more--><div class=\"eltd-x\">junk</div>kept";
        assert_eq!(
            normalizer().transform(input),
            "---\nfoo: bar\n---\nHello World&morekept"
        );
    }

    #[test]
    fn test_clean_input_is_unchanged() {
        let input = "---\r\ntitle: \"Post\"\r\ntags:\r\n  - rust\r\n---\r\n\
                     # Heading\r\n\r\nA [link](https://example.com) and <div class=\"note\">x</div>.";
        assert_eq!(normalizer().transform(input), input);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalizer().transform(""), "");
    }

    #[test]
    fn test_front_matter_is_not_stripped_or_decoded() {
        let input = "---\ntitle: Tom &amp; Jerry [vc_row]\n---\n&amp;";
        assert_eq!(
            normalizer().transform(input),
            "---\ntitle: Tom &amp; Jerry [vc_row]\n---\n&"
        );
    }

    #[test]
    fn test_document_without_front_matter() {
        let input = "author: not metadata\n[vc_row]Body&hellip;[/vc_row]\n";
        assert_eq!(
            normalizer().transform(input),
            "author: not metadata\nBody\u{2026}\n"
        );
    }

    #[test]
    fn test_unclosed_front_matter_is_cleaned_as_body() {
        let input = "---\nauthor: Jane\n[vc_row]text";
        assert_eq!(normalizer().transform(input), "---\nauthor: Jane\ntext");
    }

    #[test]
    fn test_transform_is_idempotent() {
        let inputs = [
            "---\nauthor:\n  name: J\neltd_show_title_area_meta: 'no'\ntitle: T\n---\n\
             [vc_row][vc_column]It&rsquo;s<!--more--> here[/vc_column][/vc_row]\n\
             <span class=\"wp-caption\">c</span>&nbsp;end\n",
            "no front matter &lt;p&gt;\n",
            "---\ntitle: only\n---\n",
        ];
        let n = normalizer();
        for input in inputs {
            let once = n.transform(input);
            assert_eq!(n.transform(&once), once);
        }
    }

    #[test]
    fn test_custom_rules() {
        let rules = Rules {
            drop_keys: vec!["draft".into()],
            shortcode_prefixes: vec!["et_pb_".into()],
            wrapper_class_prefixes: vec![],
        };
        let n = Normalizer::new(&rules).unwrap();
        let input = "---\nauthor: A\ndraft: true\n---\n[et_pb_text]x[/et_pb_text][vc_row]<div class=\"wp-a\">y</div>";
        assert_eq!(
            n.transform(input),
            "---\nauthor: A\n---\nx[vc_row]<div class=\"wp-a\">y</div>"
        );
    }
}
