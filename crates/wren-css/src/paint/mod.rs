//! Paint: lowering the layout tree to a flat display list.
//!
//! [CSS 2.1 Appendix E Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)

mod display_list;
mod painter;

pub use display_list::{Canvas, DisplayCommand};
pub use painter::paint_tree;
