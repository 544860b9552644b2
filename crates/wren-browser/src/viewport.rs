//! The viewport: scroll state, clipping, and invalidation.
//!
//! [CSS Overflow § 3 Scrolling](https://www.w3.org/TR/css-overflow-3/)
//!
//! The viewport owns the loaded page (DOM, rule list, layout tree, display
//! list) and the scroll offset. Events mutate it one at a time: scrolling
//! only re-clips the existing display list, a width change rebuilds the
//! layout tree and display list, and a height-only change just redraws.

use wren_common::{clear_warnings, Url};
use wren_css::{
    paint_tree, resolve_styles, Canvas, DisplayCommand, DocumentLayout, FontProvider, Rule, VSTEP,
};
use wren_dom::DomTree;
use wren_html::parse_html;

use crate::{collect_rules, LoadError};

/// Startup viewport width in pixels.
pub const INITIAL_WIDTH: f32 = 800.0;
/// Startup viewport height in pixels.
pub const INITIAL_HEIGHT: f32 = 600.0;
/// Minimum allowed viewport width.
pub const MIN_WIDTH: f32 = 400.0;
/// Minimum allowed viewport height.
pub const MIN_HEIGHT: f32 = 250.0;
/// Keyboard scroll delta in pixels.
pub const SCROLL_STEP: f32 = 100.0;

/// Everything owned for the lifetime of one loaded document.
struct Page {
    dom: DomTree,
    /// Cascade-sorted rules; kept so a future style pass could rerun
    /// without refetching.
    rules: Vec<Rule>,
    layout: DocumentLayout,
    display_list: Vec<DisplayCommand>,
}

/// Scrollable, resizable view onto a loaded document.
pub struct Viewport {
    scroll: f32,
    width: f32,
    height: f32,
    page: Option<Page>,
}

impl Viewport {
    /// A viewport at the startup size with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scroll: 0.0,
            width: INITIAL_WIDTH,
            height: INITIAL_HEIGHT,
            page: None,
        }
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Current viewport width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current viewport height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The loaded document's DOM, if any.
    #[must_use]
    pub fn dom(&self) -> Option<&DomTree> {
        self.page.as_ref().map(|p| &p.dom)
    }

    /// The loaded document's cascade-sorted rule list.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        self.page.as_ref().map_or(&[], |p| p.rules.as_slice())
    }

    /// The current display list.
    #[must_use]
    pub fn display_list(&self) -> &[DisplayCommand] {
        self.page.as_ref().map_or(&[], |p| p.display_list.as_slice())
    }

    /// Height of the laid-out document content.
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.page.as_ref().map_or(0.0, |p| p.layout.height)
    }

    /// Fetch a URL and run the full pipeline: parse, collect stylesheets,
    /// resolve styles, lay out, paint, draw. Scroll resets to the top.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the document itself cannot be fetched.
    /// Stylesheet failures are warned about and skipped.
    pub fn load(
        &mut self,
        url: &Url,
        fonts: &dyn FontProvider,
        canvas: &mut dyn Canvas,
    ) -> Result<(), LoadError> {
        clear_warnings();
        let body = url.request()?;
        let dom = parse_html(&body);
        let rules = collect_rules(&dom, Some(url));
        self.install(dom, rules, fonts);
        self.draw(canvas);
        Ok(())
    }

    /// Run the pipeline over an in-memory document. Linked stylesheets have
    /// no base URL to resolve against and are skipped with a warning.
    pub fn load_html(&mut self, html: &str, fonts: &dyn FontProvider, canvas: &mut dyn Canvas) {
        clear_warnings();
        let dom = parse_html(html);
        let rules = collect_rules(&dom, None);
        self.install(dom, rules, fonts);
        self.draw(canvas);
    }

    /// Style, lay out, and paint a parsed document at the current width.
    fn install(&mut self, mut dom: DomTree, rules: Vec<Rule>, fonts: &dyn FontProvider) {
        resolve_styles(&mut dom, &rules);
        let mut layout = DocumentLayout::new(dom.root(), self.width);
        layout.layout(&dom, fonts);
        let mut display_list = Vec::new();
        paint_tree(&dom, &layout, &mut display_list);
        self.page = Some(Page {
            dom,
            rules,
            layout,
            display_list,
        });
        self.scroll = 0.0;
    }

    /// Draw the visible band of the display list.
    ///
    /// An instruction is skipped when it lies wholly above or below the
    /// viewport; everything else executes with the scroll offset subtracted
    /// from its y coordinates.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear();
        let Some(page) = &self.page else { return };
        for command in &page.display_list {
            if command.top() > self.scroll + self.height {
                continue;
            }
            if command.bottom() < self.scroll {
                continue;
            }
            command.execute(self.scroll, canvas);
        }
    }

    /// Greatest allowed scroll offset for the current document and height.
    fn max_scroll(&self) -> f32 {
        (self.document_height() + 2.0 * VSTEP - self.height).max(0.0)
    }

    /// Scroll up one step and redraw.
    pub fn scroll_up(&mut self, canvas: &mut dyn Canvas) {
        self.scroll_up_by(SCROLL_STEP, canvas);
    }

    /// Scroll down one step and redraw.
    pub fn scroll_down(&mut self, canvas: &mut dyn Canvas) {
        self.scroll_down_by(SCROLL_STEP, canvas);
    }

    fn scroll_up_by(&mut self, delta: f32, canvas: &mut dyn Canvas) {
        self.scroll = (self.scroll - delta).max(0.0);
        self.draw(canvas);
    }

    fn scroll_down_by(&mut self, delta: f32, canvas: &mut dyn Canvas) {
        self.scroll = (self.scroll + delta).min(self.max_scroll());
        self.draw(canvas);
    }

    /// Mouse wheel input: a positive delta scrolls up by that amount, a
    /// negative delta scrolls down.
    pub fn handle_mouse_wheel(&mut self, delta: f32, canvas: &mut dyn Canvas) {
        if delta > 0.0 {
            self.scroll_up_by(delta, canvas);
        } else {
            self.scroll_down_by(-delta, canvas);
        }
    }

    /// Window resize. Unchanged dimensions are a no-op. A width change
    /// rebuilds the layout tree and display list at the new width; a
    /// height-only change keeps both and just redraws. The scroll offset is
    /// re-clamped so it stays within the document's new bounds.
    pub fn handle_resize(
        &mut self,
        width: f32,
        height: f32,
        fonts: &dyn FontProvider,
        canvas: &mut dyn Canvas,
    ) {
        let width = width.max(MIN_WIDTH);
        let height = height.max(MIN_HEIGHT);
        if width == self.width && height == self.height {
            return;
        }

        if width != self.width
            && let Some(page) = &mut self.page
        {
            let mut layout = DocumentLayout::new(page.dom.root(), width);
            layout.layout(&page.dom, fonts);
            let mut display_list = Vec::new();
            paint_tree(&page.dom, &layout, &mut display_list);
            page.layout = layout;
            page.display_list = display_list;
        }

        self.width = width;
        self.height = height;
        self.scroll = self.scroll.min(self.max_scroll());
        self.draw(canvas);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}
