//! Terminal rendering of the search panel.
//!
//! [`render_view`] turns a [`PanelView`] into the text the panel displays:
//! a heading, the input line, then either nothing, an error, or the matched
//! card with a wrapped gallery of its printings. Gallery tiles flow left to
//! right and wrap onto a new row when the width runs out.

mod display;

pub use display::{pad_to_width, terminal_width, text_width, truncate_with_ellipsis, DEFAULT_WIDTH};

use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::models::{Card, PanelView};

/// Panel heading
pub const HEADING: &str = "Search Magic: The Gathering Card";

/// Placeholder shown while the input is empty
pub const PLACEHOLDER: &str = "Card name";

/// Heading above the printings gallery
pub const PRINTINGS_HEADING: &str = "Printings";

/// Shown in place of a thumbnail for printings without image data
pub const NO_IMAGE: &str = "No image available";

/// Columns between gallery tiles
const TILE_GAP: usize = 2;

/// Rendering options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Available width in columns
    pub width: usize,

    /// Emit ANSI styling
    pub colors: bool,
}

impl RenderOptions {
    /// Options for plain, unstyled output
    pub fn plain(width: usize) -> Self {
        Self {
            width,
            colors: false,
        }
    }

    /// Options matching the attached terminal
    pub fn detect() -> Self {
        Self {
            width: terminal_width(),
            colors: std::io::stdout().is_terminal(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::plain(DEFAULT_WIDTH)
    }
}

/// Render the whole panel.
pub fn render_view(view: &PanelView, options: &RenderOptions) -> String {
    let style = Styler(options.colors);
    let width = options.width.max(1);
    let mut out = Vec::new();

    out.push(style.heading(&truncate_with_ellipsis(HEADING, width)));
    out.push(input_line(&view.query, width, &style));

    if view.is_loading() {
        out.push(style.dim("Searching..."));
    }

    if let Some(error) = &view.error {
        out.push(String::new());
        out.push(style.error(&truncate_with_ellipsis(error, width)));
    }

    if let Some(card) = &view.card {
        out.push(String::new());
        out.push(style.title(&truncate_with_ellipsis(&card.name, width)));
        out.push(style.subheading(PRINTINGS_HEADING));
        out.extend(render_gallery(&view.prints, width, &style));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn input_line(query: &str, width: usize, style: &Styler) -> String {
    let prompt = "> ";
    let room = width.saturating_sub(prompt.len());
    if query.is_empty() {
        format!("{}{}", prompt, style.dim(&truncate_with_ellipsis(PLACEHOLDER, room)))
    } else {
        format!("{}{}", prompt, truncate_with_ellipsis(query, room))
    }
}

/// One gallery tile: set name above the thumbnail (or placeholder).
fn tile_lines(print: &Card) -> [String; 2] {
    let image = match print.thumbnail() {
        Some(url) => url.to_string(),
        None => NO_IMAGE.to_string(),
    };
    [print.set_name.clone(), image]
}

/// Lay printings out in rows of equally sized tiles.
fn render_gallery(prints: &[Card], width: usize, style: &Styler) -> Vec<String> {
    if prints.is_empty() {
        return Vec::new();
    }

    let tiles: Vec<[String; 2]> = prints.iter().map(tile_lines).collect();
    let tile_width = tiles
        .iter()
        .flat_map(|lines| lines.iter().map(|line| text_width(line)))
        .max()
        .unwrap_or(0)
        .min(width);
    let per_row = ((width + TILE_GAP) / (tile_width + TILE_GAP)).max(1);

    let mut rows = Vec::new();
    for chunk in tiles.chunks(per_row) {
        let names: Vec<String> = chunk
            .iter()
            .map(|[name, _]| style.set_name(&fit(name, tile_width)))
            .collect();
        let images: Vec<String> = chunk
            .iter()
            .map(|[_, image]| {
                let cell = fit(image, tile_width);
                if image == NO_IMAGE {
                    style.dim(&cell)
                } else {
                    style.link(&cell)
                }
            })
            .collect();

        let gap = " ".repeat(TILE_GAP);
        rows.push(names.join(&gap).trim_end().to_string());
        rows.push(images.join(&gap).trim_end().to_string());
        rows.push(String::new());
    }
    rows.pop();
    rows
}

fn fit(text: &str, width: usize) -> String {
    pad_to_width(&truncate_with_ellipsis(text, width), width)
}

/// Applies styling only when colors are enabled
struct Styler(bool);

impl Styler {
    fn heading(&self, s: &str) -> String {
        if self.0 {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn title(&self, s: &str) -> String {
        if self.0 {
            s.cyan().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn subheading(&self, s: &str) -> String {
        if self.0 {
            s.underline().to_string()
        } else {
            s.to_string()
        }
    }

    fn error(&self, s: &str) -> String {
        if self.0 {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn set_name(&self, s: &str) -> String {
        if self.0 {
            s.green().to_string()
        } else {
            s.to_string()
        }
    }

    fn link(&self, s: &str) -> String {
        if self.0 {
            s.blue().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.0 {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }
}
