//! Fontdue-backed implementation of the font service.
//!
//! [CSS 2.1 § 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! Handles are cached process-wide, keyed by (size, weight, slant,
//! underline); entries are created on first use and never evicted. The
//! browser's event loop is single-threaded, but the cache is mutex-gated so
//! an embedder that adds threads stays sound. Font files are searched on
//! well-known system paths per variant; when none is found a metrics-only
//! approximation keeps layout working (warned once).

use std::collections::HashMap;
use std::fs;
use std::sync::{Arc, Mutex, OnceLock};

use fontdue::FontSettings;
use wren_common::warn_once;
use wren_css::{Font, FontHandle, FontKey, FontMetrics, FontProvider, FontSlant, FontWeight};

/// CSS pixel per point ratio (96dpi).
const PX_PER_POINT: f32 = 4.0 / 3.0;

/// Common system font paths for the regular variant.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// System font paths for the bold variant.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for the italic variant.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for the bold-italic variant.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

type FaceCache = Mutex<HashMap<(FontWeight, FontSlant), Option<Arc<fontdue::Font>>>>;
type HandleCache = Mutex<HashMap<FontKey, FontHandle>>;

fn faces() -> &'static FaceCache {
    static FACES: OnceLock<FaceCache> = OnceLock::new();
    FACES.get_or_init(|| Mutex::new(HashMap::new()))
}

fn handles() -> &'static HandleCache {
    static HANDLES: OnceLock<HandleCache> = OnceLock::new();
    HANDLES.get_or_init(|| Mutex::new(HashMap::new()))
}

/// The process-wide system font provider.
///
/// Cloning or recreating this type is free; all state lives in the shared
/// caches.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFonts;

impl FontProvider for SystemFonts {
    fn font(&self, key: FontKey) -> FontHandle {
        let mut cache = handles().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        cache
            .entry(key)
            .or_insert_with(|| {
                Arc::new(SystemFont {
                    key,
                    face: load_face(key.weight, key.slant),
                })
            })
            .clone()
    }
}

/// Load (or reuse) the fontdue face for a weight/slant variant.
fn load_face(weight: FontWeight, slant: FontSlant) -> Option<Arc<fontdue::Font>> {
    let mut cache = faces().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    cache
        .entry((weight, slant))
        .or_insert_with(|| {
            let paths = match (weight, slant) {
                (FontWeight::Normal, FontSlant::Roman) => FONT_SEARCH_PATHS,
                (FontWeight::Bold, FontSlant::Roman) => FONT_BOLD_SEARCH_PATHS,
                (FontWeight::Normal, FontSlant::Italic) => FONT_ITALIC_SEARCH_PATHS,
                (FontWeight::Bold, FontSlant::Italic) => FONT_BOLD_ITALIC_SEARCH_PATHS,
            };
            for path in paths {
                if let Ok(bytes) = fs::read(path)
                    && let Ok(face) = fontdue::Font::from_bytes(bytes, FontSettings::default())
                {
                    return Some(Arc::new(face));
                }
            }
            warn_once(
                "Fonts",
                &format!("no system font found for {weight} {slant}; using approximate metrics"),
            );
            None
        })
        .clone()
}

/// One cached font variant at one size.
struct SystemFont {
    key: FontKey,
    /// The loaded face, or `None` when no font file was found.
    face: Option<Arc<fontdue::Font>>,
}

impl SystemFont {
    fn px(&self) -> f32 {
        self.key.size as f32 * PX_PER_POINT
    }
}

impl Font for SystemFont {
    fn key(&self) -> FontKey {
        self.key
    }

    fn measure(&self, text: &str) -> i32 {
        let px = self.px();
        match &self.face {
            Some(face) => text
                .chars()
                .filter(|c| !c.is_control())
                .map(|c| face.metrics(c, px).advance_width)
                .sum::<f32>()
                .round() as i32,
            // Approximation: half an em per character.
            None => (text.chars().count() as f32 * px * 0.5).round() as i32,
        }
    }

    fn metrics(&self) -> FontMetrics {
        let px = self.px();
        match self
            .face
            .as_ref()
            .and_then(|face| face.horizontal_line_metrics(px))
        {
            Some(line) => FontMetrics {
                ascent: line.ascent.round() as i32,
                // fontdue reports descent as a negative offset.
                descent: (-line.descent).round() as i32,
                linespace: line.new_line_size.round() as i32,
            },
            None => FontMetrics {
                ascent: (px * 0.8).round() as i32,
                descent: (px * 0.2).round() as i32,
                linespace: (px * 1.2).round() as i32,
            },
        }
    }
}
