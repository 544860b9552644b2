//! User-agent stylesheet.
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents
//! elements of HTML documents in ways consistent with general user
//! expectations."
//!
//! These rules form the base of the cascade: they are prepended to the
//! document's own stylesheets before sorting, so any author rule of equal
//! specificity overrides them.

use std::sync::OnceLock;

use crate::parser::{CSSParser, Stylesheet};

/// Default rules for the elements this engine styles, limited to the
/// properties the pipeline consumes.
const UA_CSS: &str = r"
a { color: blue; }
i { font-style: italic; }
b { font-weight: bold; }
small { font-size: 90%; }
big { font-size: 110%; }
u { text-decoration: underline; }
pre { background-color: gray; }
";

/// Return the parsed user-agent stylesheet, parsing only once.
pub fn ua_stylesheet() -> &'static Stylesheet {
    static STYLESHEET: OnceLock<Stylesheet> = OnceLock::new();
    STYLESHEET.get_or_init(|| CSSParser::new(UA_CSS).parse_stylesheet())
}
