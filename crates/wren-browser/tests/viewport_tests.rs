//! Integration tests for the viewport: scrolling, culling, and resize.
//!
//! With the fixed font metrics (see `common`), default-size text lays out
//! 15px tall lines starting at y = VSTEP.

mod common;

use common::{CanvasOp, FixedFonts, RecordingCanvas};
use wren_browser::{Viewport, SCROLL_STEP};
use wren_css::VSTEP;

/// A document whose body is `lines` one-line paragraphs.
fn page_with_lines(lines: usize) -> String {
    let mut html = String::from("<body>");
    for i in 0..lines {
        html.push_str(&format!("<p>line{i}</p>"));
    }
    html.push_str("</body>");
    html
}

fn loaded_viewport(html: &str) -> (Viewport, RecordingCanvas) {
    let mut canvas = RecordingCanvas::new();
    let mut viewport = Viewport::new();
    viewport.load_html(html, &FixedFonts, &mut canvas);
    (viewport, canvas)
}

#[test]
fn load_draws_the_document() {
    let (viewport, canvas) = loaded_viewport("<body>hi</body>");
    assert_eq!(viewport.scroll(), 0.0);
    let texts = canvas.texts();
    assert_eq!(texts.len(), 1);
    let CanvasOp::Text { text, y, .. } = texts[0] else {
        unreachable!()
    };
    assert_eq!(text, "hi");
    // Scroll is zero, so the canvas sees document coordinates.
    assert!((y - (VSTEP + 1.25 * 9.0 - 9.0)).abs() < 0.01);
}

#[test]
fn document_shorter_than_viewport_cannot_scroll() {
    // 33 lines × 15px = 495px of content in a 600px viewport.
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(33));
    assert!(viewport.document_height() < viewport.height());

    viewport.scroll_down(&mut canvas);
    assert_eq!(viewport.scroll(), 0.0);

    viewport.handle_mouse_wheel(-120.0, &mut canvas);
    assert_eq!(viewport.scroll(), 0.0);
}

#[test]
fn scroll_clamps_at_both_ends() {
    // 100 lines × 15px = 1500px of content.
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(100));
    let max = viewport.document_height() + 2.0 * VSTEP - viewport.height();

    viewport.scroll_up(&mut canvas);
    assert_eq!(viewport.scroll(), 0.0, "cannot scroll above the top");

    for _ in 0..100 {
        viewport.scroll_down(&mut canvas);
    }
    assert!((viewport.scroll() - max).abs() < 0.01, "clamped at the bottom");

    viewport.scroll_up(&mut canvas);
    assert!((viewport.scroll() - (max - SCROLL_STEP)).abs() < 0.01);
}

#[test]
fn mouse_wheel_maps_sign_to_direction() {
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(100));

    viewport.handle_mouse_wheel(-120.0, &mut canvas);
    assert_eq!(viewport.scroll(), 120.0);

    viewport.handle_mouse_wheel(50.0, &mut canvas);
    assert_eq!(viewport.scroll(), 70.0);
}

#[test]
fn draw_culls_to_the_visible_band() {
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(100));
    viewport.scroll_down(&mut canvas);
    let scroll = viewport.scroll();
    assert_eq!(scroll, SCROLL_STEP);

    let expected = viewport
        .display_list()
        .iter()
        .filter(|cmd| cmd.top() <= scroll + viewport.height() && cmd.bottom() >= scroll)
        .count();
    assert_eq!(canvas.ops.len(), expected);
    assert!(expected > 0);
    assert!(
        expected < viewport.display_list().len(),
        "something above the viewport should have been culled"
    );

    // Executed commands have the scroll subtracted from y.
    let first_visible = viewport
        .display_list()
        .iter()
        .find(|cmd| cmd.top() <= scroll + viewport.height() && cmd.bottom() >= scroll)
        .unwrap();
    let CanvasOp::Text { y, .. } = &canvas.ops[0] else {
        unreachable!()
    };
    assert!((y - (first_visible.top() - scroll)).abs() < 0.01);
}

#[test]
fn resize_with_unchanged_size_is_byte_identical() {
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(10));
    let before: Vec<_> = viewport.display_list().to_vec();
    let before_ptr = viewport.display_list().as_ptr();

    viewport.handle_resize(800.0, 600.0, &FixedFonts, &mut canvas);

    assert_eq!(viewport.display_list(), before.as_slice());
    assert_eq!(viewport.display_list().as_ptr(), before_ptr, "no rebuild");
}

#[test]
fn height_only_resize_redraws_without_relayout() {
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(100));
    let before_ptr = viewport.display_list().as_ptr();
    let drawn_before = canvas.ops.len();

    viewport.handle_resize(800.0, 900.0, &FixedFonts, &mut canvas);

    assert_eq!(viewport.height(), 900.0);
    assert_eq!(
        viewport.display_list().as_ptr(),
        before_ptr,
        "height-only resize must not rebuild the display list"
    );
    assert!(
        canvas.ops.len() > drawn_before,
        "a taller viewport shows more of the document"
    );
}

#[test]
fn width_resize_relayouts_and_changes_the_display_list() {
    let words = "word ".repeat(60);
    let (mut viewport, mut canvas) = loaded_viewport(&format!("<body><p>{words}</p></body>"));
    let before: Vec<_> = viewport.display_list().to_vec();
    let height_before = viewport.document_height();

    viewport.handle_resize(400.0, 600.0, &FixedFonts, &mut canvas);

    assert_eq!(viewport.width(), 400.0);
    assert_ne!(
        viewport.display_list(),
        before.as_slice(),
        "narrower lines must wrap differently"
    );
    assert!(viewport.document_height() > height_before);
}

#[test]
fn resize_below_minimum_is_clamped() {
    let (mut viewport, mut canvas) = loaded_viewport("<body>x</body>");
    viewport.handle_resize(100.0, 100.0, &FixedFonts, &mut canvas);
    assert_eq!(viewport.width(), 400.0);
    assert_eq!(viewport.height(), 250.0);
}

#[test]
fn growing_the_viewport_reclamps_scroll() {
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(100));
    for _ in 0..100 {
        viewport.scroll_down(&mut canvas);
    }
    let max_before = viewport.document_height() + 2.0 * VSTEP - viewport.height();
    assert!((viewport.scroll() - max_before).abs() < 0.01);

    viewport.handle_resize(800.0, 1500.0, &FixedFonts, &mut canvas);
    let max_after = (viewport.document_height() + 2.0 * VSTEP - 1500.0).max(0.0);
    assert!(
        (viewport.scroll() - max_after).abs() < 0.01,
        "scroll must stay within the new bounds"
    );
}

#[test]
fn loading_a_new_page_resets_scroll() {
    let (mut viewport, mut canvas) = loaded_viewport(&page_with_lines(100));
    viewport.scroll_down(&mut canvas);
    assert!(viewport.scroll() > 0.0);

    viewport.load_html("<body>fresh</body>", &FixedFonts, &mut canvas);
    assert_eq!(viewport.scroll(), 0.0);
    assert_eq!(canvas.texts().len(), 1);
}

#[test]
fn inline_style_elements_are_collected() {
    let (viewport, canvas) = loaded_viewport(
        "<html><head><style>p { color: red; }</style></head><body><p>x</p></body></html>",
    );
    assert!(!viewport.rules().is_empty());
    let CanvasOp::Text { color, .. } = canvas.texts()[0] else {
        unreachable!()
    };
    assert_eq!(color, "red");
}
