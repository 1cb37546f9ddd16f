//! Shortcode detection.
//!
//! Finds every supported shortcode with exact byte positions so the rewriter
//! can replace them without re-scanning.

use crate::patterns::{IMGS_SHORTCODE_RE, PERMALINK_SHORTCODE_RE, SHORTCODE_PARAM_RE};
use crate::shortcode::types::{ShortcodeKind, ShortcodeMatch};

/// Find all shortcodes in `content`, sorted by start offset.
pub fn find_shortcodes(content: &str) -> Vec<ShortcodeMatch> {
    let imgs = IMGS_SHORTCODE_RE.find_iter(content).map(|m| ShortcodeMatch {
        kind: ShortcodeKind::Imgs,
        start: m.start(),
        end: m.end(),
        original: m.as_str().to_string(),
        params: parse_params(m.as_str()),
    });

    let permalinks = PERMALINK_SHORTCODE_RE.find_iter(content).map(|m| ShortcodeMatch {
        kind: ShortcodeKind::Permalink,
        start: m.start(),
        end: m.end(),
        original: m.as_str().to_string(),
        params: Vec::new(),
    });

    let mut found: Vec<ShortcodeMatch> = imgs.chain(permalinks).collect();
    found.sort_by_key(|m| m.start);
    found
}

/// Extract `key="value"` parameters in source order.
pub fn parse_params(shortcode: &str) -> Vec<(String, String)> {
    SHORTCODE_PARAM_RE
        .captures_iter(shortcode)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shortcodes_in_order() {
        let content = concat!(
            "Intro\n",
            "{{< permalink >}}\n",
            "{{< imgs kind=\"photo\" size=\"md\" imgs=\"a.png\" >}}\n",
            "{{<imgs imgs=\"b.png, c.png\">}}\n"
        );
        let found = find_shortcodes(content);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].kind, ShortcodeKind::Permalink);
        assert_eq!(found[1].param("size"), Some("md"));
        assert_eq!(found[1].param("kind"), Some("photo"));
        assert_eq!(found[2].param("imgs"), Some("b.png, c.png"));
        assert!(found.windows(2).all(|w| w[0].end <= w[1].start));
        for m in &found {
            assert_eq!(&content[m.start..m.end], m.original);
        }
    }

    #[test]
    fn ignores_other_shortcodes() {
        assert!(find_shortcodes("{{< youtube id=\"abc\" >}}").is_empty());
    }
}
