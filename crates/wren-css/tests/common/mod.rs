//! Shared helpers for wren-css integration tests.

use std::sync::Arc;

use wren_css::{
    resolve_styles, sort_by_cascade, CSSParser, Font, FontHandle, FontKey, FontMetrics,
    FontProvider, Rule,
};
use wren_dom::DomTree;
use wren_html::parse_html;

/// Deterministic font service: every character advances size/2 pixels,
/// ascent is 3/4 of the size, descent 1/4, linespace 5/4.
pub struct FixedFonts;

struct FixedFont {
    key: FontKey,
}

impl Font for FixedFont {
    fn key(&self) -> FontKey {
        self.key
    }

    fn measure(&self, text: &str) -> i32 {
        text.chars().count() as i32 * (self.key.size / 2)
    }

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: self.key.size * 3 / 4,
            descent: self.key.size / 4,
            linespace: self.key.size * 5 / 4,
        }
    }
}

impl FontProvider for FixedFonts {
    fn font(&self, key: FontKey) -> FontHandle {
        Arc::new(FixedFont { key })
    }
}

/// Parse HTML and a stylesheet, run the cascade, and return the styled tree.
pub fn styled_tree(html: &str, css: &str) -> DomTree {
    let mut tree = parse_html(html);
    let mut rules: Vec<Rule> = CSSParser::new(css).parse_stylesheet().rules;
    sort_by_cascade(&mut rules);
    resolve_styles(&mut tree, &rules);
    tree
}
