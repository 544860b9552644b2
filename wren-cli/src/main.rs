//! Wren browser CLI.
//!
//! Loads a URL through the full rendering pipeline and prints the DOM tree
//! and the visible display list: a headless view of what a windowed
//! frontend would draw.

mod canvas;

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use wren_browser::{SystemFonts, Viewport};
use wren_common::Url;
use wren_html::print_tree;

use canvas::{Drawn, TextCanvas};

/// Fallback when no URL is given on the command line.
const DEFAULT_URL: &str = "http://example.com/";

/// Wren browser CLI - render a page headlessly
#[derive(Parser, Debug)]
#[command(name = "wren-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to fetch and render (http, https, or file)
    #[arg(value_name = "URL")]
    url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let url = Url::parse(cli.url.as_deref().unwrap_or(DEFAULT_URL))?;

    let fonts = SystemFonts;
    let mut canvas = TextCanvas::new();
    let mut viewport = Viewport::new();
    viewport.load(&url, &fonts, &mut canvas)?;

    println!("{}", "=== DOM Tree ===".bold());
    if let Some(dom) = viewport.dom() {
        print_tree(dom, dom.root(), 0);
    }

    println!();
    println!("{}", "=== Stylesheet ===".bold());
    println!("{} rules in cascade order", viewport.rules().len());

    println!();
    println!("{}", "=== Display List ===".bold());
    println!(
        "{} instructions, document height {:.0}px, viewport {:.0}x{:.0}",
        viewport.display_list().len(),
        viewport.document_height(),
        viewport.width(),
        viewport.height(),
    );
    for drawn in &canvas.drawn {
        match drawn {
            Drawn::Text { x, y, text, color } => {
                println!("  text ({x:>7.1}, {y:>7.1}) {color:<8} {text:?}");
            }
            Drawn::Rect {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                println!("  rect ({x1:>7.1}, {y1:>7.1})-({x2:>7.1}, {y2:>7.1}) {color}");
            }
        }
    }

    Ok(())
}
