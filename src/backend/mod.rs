//! Drawing backends and the replay of a laid-out document onto one.

mod pdf;

pub use pdf::PdfBackend;

use std::time::Instant;

use crate::assets::ImageAsset;
use crate::compose::Document;
use crate::draw::{DrawCommand, RectStyle, Stroke};
use crate::error::{AssetError, Error};
use crate::geometry::Rect;
use crate::theme::TextStyle;

/// Primitive drawing capability. Coordinates are top-down page points; a
/// text `y` is the baseline.
pub trait DrawingBackend {
    fn new_page(&mut self, width: f32, height: f32) -> Result<(), Error>;

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<(), Error>;

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) -> Result<(), Error>;

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) -> Result<(), Error>;

    /// Place an image inside `rect`. A failure here is recoverable: the
    /// caller draws the image's text label instead.
    fn add_image(&mut self, asset: &ImageAsset, rect: Rect) -> Result<(), AssetError>;

    fn save_page(&mut self) -> Result<(), Error>;

    fn serialize(self) -> Result<Vec<u8>, Error>
    where
        Self: Sized;
}

/// Replay every page of `doc` onto `backend`, content before chrome, and
/// return the serialized bytes.
pub fn write_document<B: DrawingBackend>(doc: &Document, mut backend: B) -> Result<Vec<u8>, Error> {
    let t0 = Instant::now();
    let g = &doc.geometry;
    let mut degraded = 0usize;

    for page in &doc.pages {
        backend.new_page(g.page_width, g.page_height)?;
        for cmd in page.draw_commands() {
            match cmd {
                DrawCommand::Text { x, y, text, style } => backend.draw_text(text, *x, *y, style)?,
                DrawCommand::Rect { rect, style } => backend.draw_rect(*rect, style)?,
                DrawCommand::Line { from, to, stroke } => backend.draw_line(*from, *to, stroke)?,
                DrawCommand::Image {
                    rect,
                    asset,
                    fallback,
                    fallback_style,
                } => {
                    if let Err(e) = backend.add_image(asset, *rect) {
                        log::warn!("image on page {} replaced by its label: {e}", page.index + 1);
                        degraded += 1;
                        let (x, y) = label_origin(*rect, fallback_style);
                        backend.draw_text(fallback, x, y, fallback_style)?;
                    }
                }
            }
        }
        backend.save_page()?;
    }

    let bytes = backend.serialize()?;
    log::info!(
        "Write: {} pages, {} degraded images, {:.1}ms (output {} bytes)",
        doc.pages.len(),
        degraded,
        t0.elapsed().as_secs_f64() * 1000.0,
        bytes.len(),
    );
    Ok(bytes)
}

/// Baseline origin of a label vertically centered in `rect`.
fn label_origin(rect: Rect, style: &TextStyle) -> (f32, f32) {
    let line_h = crate::blocks::line_height(style);
    let top = rect.y + (rect.height - line_h).max(0.0) / 2.0;
    (rect.x, crate::draw::baseline(top, line_h, style))
}
