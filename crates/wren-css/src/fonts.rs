//! Abstract font measurement service.
//!
//! [CSS 2.1 § 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."
//!
//! Layout only needs to measure text and read vertical metrics; it never
//! rasterizes. The traits here are that seam: the browser crate provides a
//! fontdue-backed implementation, tests provide fixed-metrics fakes.

use std::sync::Arc;

use strum_macros::Display;

/// Font weight variants the pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// Map a CSS `font-weight` value; anything but `bold` is normal.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        if value == "bold" { Self::Bold } else { Self::Normal }
    }
}

/// Font slant variants the pipeline distinguishes. CSS `normal` maps to
/// roman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FontSlant {
    /// Upright.
    Roman,
    /// Italic.
    Italic,
}

impl FontSlant {
    /// Map a CSS `font-style` value; anything but `italic` is roman.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        if value == "italic" { Self::Italic } else { Self::Roman }
    }
}

/// Cache key identifying one font variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontKey {
    /// Size in points.
    pub size: i32,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub slant: FontSlant,
    /// Whether text in this font is underlined.
    pub underline: bool,
}

/// Vertical metrics of a font, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Height above the baseline.
    pub ascent: i32,
    /// Depth below the baseline.
    pub descent: i32,
    /// Distance between successive baselines.
    pub linespace: i32,
}

/// An immutable font handle.
pub trait Font: Send + Sync {
    /// The key this handle was created for.
    fn key(&self) -> FontKey;
    /// Advance width of `text` in pixels.
    fn measure(&self, text: &str) -> i32;
    /// Vertical metrics.
    fn metrics(&self) -> FontMetrics;
}

/// Shared font handle; cheap to clone into line buffers and draw commands.
pub type FontHandle = Arc<dyn Font>;

/// Source of font handles, keyed by (size, weight, slant, underline).
///
/// Implementations cache: handles are created on first use and live for the
/// life of the process.
pub trait FontProvider {
    /// Get (or create) the handle for a key.
    fn font(&self, key: FontKey) -> FontHandle;
}
