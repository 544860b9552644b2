//! High-level browser pipeline for the Wren browser.
//!
//! # Scope
//!
//! This crate ties the leaves together:
//!
//! - **Stylesheet collection** - user-agent rules, linked stylesheets, and
//!   `<style>` elements, merged and cascade-sorted.
//! - **Viewport** - scroll offset and viewport size; clipping and dispatch
//!   of the display list; resize invalidation ([`viewport`]).
//! - **Fonts** - the fontdue-backed implementation of the font service
//!   ([`fonts`]).
//!
//! The windowing toolkit itself stays outside: anything that can implement
//! [`wren_css::Canvas`] can host a [`Viewport`].

pub mod fonts;
pub mod viewport;

pub use wren_common as common;
pub use wren_css as css;
pub use wren_dom as dom;
pub use wren_html as html;

pub use fonts::SystemFonts;
pub use viewport::{Viewport, INITIAL_HEIGHT, INITIAL_WIDTH, MIN_HEIGHT, MIN_WIDTH, SCROLL_STEP};

use thiserror::Error;
use wren_common::{warn_once, FetchError, Url, UrlError};
use wren_css::{extract_style_content, sort_by_cascade, ua_stylesheet, CSSParser, Rule};
use wren_dom::DomTree;

/// Errors that abort a page load.
///
/// Anything recoverable (a single stylesheet failing to fetch, malformed
/// CSS) is warned about and skipped instead.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document URL itself was unusable.
    #[error(transparent)]
    Url(#[from] UrlError),
    /// Fetching the document body failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Gather the full, cascade-sorted rule list for a document.
///
/// The stable sort breaks ties at equal specificity, so pre-sort order
/// matters: user-agent rules first, then `<link rel=stylesheet>` sheets in
/// document order, then `<style>` element content. A linked sheet that
/// fails to resolve or fetch is warned about and skipped; the page renders
/// with whatever loaded.
#[must_use]
pub fn collect_rules(tree: &DomTree, base: Option<&Url>) -> Vec<Rule> {
    let mut rules = ua_stylesheet().rules.clone();

    for id in tree.iter_all() {
        let Some(element) = tree.as_element(id) else {
            continue;
        };
        if element.tag_name != "link"
            || element.attr("rel") != Some("stylesheet")
        {
            continue;
        }
        let Some(href) = element.attr("href") else {
            continue;
        };
        let Some(base) = base else {
            warn_once("CSS", &format!("no base url to resolve stylesheet {href:?}"));
            continue;
        };
        match base.resolve(href) {
            Ok(url) => match url.request() {
                Ok(css) => rules.extend(CSSParser::new(&css).parse_stylesheet().rules),
                Err(error) => {
                    warn_once("CSS", &format!("failed to fetch stylesheet {url}: {error}"));
                }
            },
            Err(error) => {
                warn_once("CSS", &format!("cannot resolve stylesheet {href:?}: {error}"));
            }
        }
    }

    let inline = extract_style_content(tree);
    if !inline.is_empty() {
        rules.extend(CSSParser::new(&inline).parse_stylesheet().rules);
    }

    sort_by_cascade(&mut rules);
    rules
}
