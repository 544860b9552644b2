//! Integration tests for the painter.

mod common;

use common::{styled_tree, FixedFonts};
use wren_css::{paint_tree, DisplayCommand, DocumentLayout, HSTEP, VSTEP};
use wren_dom::DomTree;

fn display_list(tree: &DomTree, width: f32) -> Vec<DisplayCommand> {
    let mut document = DocumentLayout::new(tree.root(), width);
    document.layout(tree, &FixedFonts);
    let mut list = Vec::new();
    paint_tree(tree, &document, &mut list);
    list
}

#[test]
fn background_color_paints_a_rect_behind_the_text() {
    let tree = styled_tree(
        "<body><pre>code</pre></body>",
        "pre { background-color: gray; }",
    );
    let list = display_list(&tree, 800.0);

    // Preorder: the pre's background rect must come before its text.
    let rect_index = list
        .iter()
        .position(|cmd| matches!(cmd, DisplayCommand::DrawRect { .. }))
        .expect("no rect painted");
    let text_index = list
        .iter()
        .position(|cmd| matches!(cmd, DisplayCommand::DrawText { .. }))
        .expect("no text painted");
    assert!(rect_index < text_index);

    let DisplayCommand::DrawRect {
        left,
        top,
        right,
        bottom,
        color,
    } = &list[rect_index]
    else {
        unreachable!()
    };
    assert_eq!(color, "gray");
    assert!((left - HSTEP).abs() < f32::EPSILON);
    assert!((top - VSTEP).abs() < f32::EPSILON);
    assert!((right - (HSTEP + 800.0 - 2.0 * HSTEP)).abs() < f32::EPSILON);
    // One line of 16px text: 1.25·9 + 1.25·3 = 15 tall.
    assert!((bottom - (VSTEP + 15.0)).abs() < 0.01);
}

#[test]
fn transparent_background_paints_nothing() {
    let tree = styled_tree(
        "<body><p>x</p></body>",
        "p { background-color: transparent; }",
    );
    let list = display_list(&tree, 800.0);
    assert!(
        !list
            .iter()
            .any(|cmd| matches!(cmd, DisplayCommand::DrawRect { .. }))
    );
}

#[test]
fn no_background_paints_nothing() {
    let tree = styled_tree("<body><p>x</p></body>", "");
    let list = display_list(&tree, 800.0);
    assert!(
        !list
            .iter()
            .any(|cmd| matches!(cmd, DisplayCommand::DrawRect { .. }))
    );
}

#[test]
fn draw_text_bottom_is_top_plus_linespace() {
    let tree = styled_tree("<body>word</body>", "");
    let list = display_list(&tree, 800.0);
    let DisplayCommand::DrawText { top, bottom, font, .. } = &list[0] else {
        panic!("expected text, got {:?}", list[0]);
    };
    assert!((bottom - top - font.metrics().linespace as f32).abs() < 0.01);
}

#[test]
fn display_commands_expose_culling_edges() {
    let tree = styled_tree(
        "<body><pre>a</pre></body>",
        "pre { background-color: gray; }",
    );
    let list = display_list(&tree, 800.0);
    for cmd in &list {
        assert!(cmd.bottom() >= cmd.top());
    }
}

#[test]
fn identical_inputs_produce_equal_display_lists() {
    let tree = styled_tree("<body><b>A</b> b</body>", "b { font-weight: bold; }");
    let first = display_list(&tree, 800.0);
    let second = display_list(&tree, 800.0);
    assert_eq!(first, second);
}
