//! Declarative, position-free layout blocks.
//!
//! Each variant knows its own height for a given content width and how to
//! draw itself once the flow writer has chosen its top-left corner.

mod card;
mod chart;
mod table;

use std::sync::Arc;

pub use card::{Badge, Card, CardLine};
pub use chart::Bar;
pub use table::{Cell, Column, TableId, TableRow, TableSpec};

use crate::assets::ImageAsset;
use crate::draw::{DrawCommand, RectStyle, Stroke, baseline};
use crate::geometry::Rect;
use crate::text;
use crate::theme::{Color, TextStyle, Theme};

/// Line box height as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.4;
pub const SEPARATOR_HEIGHT: f32 = 14.0;

pub(crate) fn line_height(style: &TextStyle) -> f32 {
    style.size * LINE_SPACING
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

fn aligned_x(align: Align, x: f32, width: f32, text_width: f32) -> f32 {
    match align {
        Align::Left => x,
        Align::Center => x + (width - text_width).max(0.0) / 2.0,
        Align::Right => x + (width - text_width).max(0.0),
    }
}

/// A single unwrapped line, truncated with an ellipsis when too wide.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    /// Never end a page with this line; it moves along with the next block.
    pub keep_with_next: bool,
}

impl TextLine {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        TextLine {
            text: text.into(),
            style,
            align: Align::Left,
            keep_with_next: false,
        }
    }

    pub fn heading(text: impl Into<String>, style: TextStyle) -> Self {
        TextLine {
            keep_with_next: true,
            ..TextLine::new(text, style)
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn height(&self) -> f32 {
        line_height(&self.style)
    }

    fn draw(&self, x: f32, y: f32, width: f32) -> Vec<DrawCommand> {
        let s = &self.style;
        let shown = text::truncate(&self.text, width, s.size, s.font);
        let w = text::estimate_width(&shown, s.size, s.font);
        vec![DrawCommand::Text {
            x: aligned_x(self.align, x, width, w),
            y: baseline(y, self.height(), s),
            text: shown,
            style: *s,
        }]
    }
}

/// Word-wrapped text with an optional hanging marker (list number, bullet).
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    pub marker: Option<String>,
    pub indent: f32,
    pub space_after: f32,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Paragraph {
            text: text.into(),
            style,
            marker: None,
            indent: 0.0,
            space_after: 4.0,
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>, indent: f32) -> Self {
        self.marker = Some(marker.into());
        self.indent = indent;
        self
    }

    pub fn lines(&self, width: f32) -> Vec<String> {
        text::wrap(
            &self.text,
            (width - self.indent).max(1.0),
            self.style.size,
            self.style.font,
        )
    }

    pub(crate) fn line_height(&self) -> f32 {
        line_height(&self.style)
    }

    fn height(&self, width: f32) -> f32 {
        self.lines(width).len() as f32 * self.line_height() + self.space_after
    }

    /// Split after `n` wrapped lines. The tail keeps the indent but loses the
    /// marker and re-wraps to exactly the remaining lines.
    pub(crate) fn split_after(&self, n: usize, width: f32) -> (Paragraph, Paragraph) {
        let lines = self.lines(width);
        let head = Paragraph {
            text: lines[..n.min(lines.len())].join("\n"),
            space_after: 0.0,
            ..self.clone()
        };
        let tail = Paragraph {
            text: lines[n.min(lines.len())..].join("\n"),
            marker: None,
            ..self.clone()
        };
        (head, tail)
    }

    fn draw(&self, x: f32, y: f32, width: f32) -> Vec<DrawCommand> {
        let lh = self.line_height();
        let mut out = Vec::new();
        if let Some(marker) = &self.marker {
            out.push(DrawCommand::Text {
                x,
                y: baseline(y, lh, &self.style),
                text: marker.clone(),
                style: self.style,
            });
        }
        for (i, line) in self.lines(width).into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let top = y + i as f32 * lh;
            out.push(DrawCommand::Text {
                x: x + self.indent,
                y: baseline(top, lh, &self.style),
                text: line,
                style: self.style,
            });
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Separator {
    pub color: Color,
    pub thickness: f32,
}

impl Separator {
    fn draw(&self, x: f32, y: f32, width: f32) -> Vec<DrawCommand> {
        let mid = y + SEPARATOR_HEIGHT / 2.0;
        vec![DrawCommand::Line {
            from: (x, mid),
            to: (x + width, mid),
            stroke: Stroke {
                color: self.color,
                width: self.thickness,
            },
        }]
    }
}

/// Optional image with a text label standing in when the asset is missing.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBlock {
    pub asset: Option<Arc<ImageAsset>>,
    pub fallback: String,
    pub fallback_style: TextStyle,
    pub max_width: f32,
    pub height: f32,
    pub align: Align,
}

impl ImageBlock {
    fn draw(&self, x: f32, y: f32, width: f32) -> Vec<DrawCommand> {
        let box_w = self.max_width.min(width);
        match &self.asset {
            Some(asset) => {
                let (mut w, mut h) = (self.height * asset.aspect(), self.height);
                if w > box_w {
                    w = box_w;
                    h = box_w / asset.aspect();
                }
                let rect = Rect::new(aligned_x(self.align, x, width, w), y, w, h);
                vec![DrawCommand::Image {
                    rect,
                    asset: Arc::clone(asset),
                    fallback: self.fallback.clone(),
                    fallback_style: self.fallback_style,
                }]
            }
            None => {
                let line = TextLine {
                    text: self.fallback.clone(),
                    style: self.fallback_style,
                    align: self.align,
                    keep_with_next: false,
                };
                let top = y + (self.height - line.height()).max(0.0) / 2.0;
                line.draw(x, top, width)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    TextLine(TextLine),
    Paragraph(Paragraph),
    Card(Card),
    Badge(Badge),
    Bar(Bar),
    TableHeader(Arc<TableSpec>),
    TableRow(TableRow),
    Separator(Separator),
    Spacer(f32),
    PageBreak,
    Image(ImageBlock),
}

/// Variant tag, used when inspecting laid-out pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    TextLine,
    Paragraph,
    Card,
    Badge,
    Bar,
    TableHeader,
    TableRow,
    Separator,
    Spacer,
    PageBreak,
    Image,
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::TextLine(_) => BlockKind::TextLine,
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Card(_) => BlockKind::Card,
            Block::Badge(_) => BlockKind::Badge,
            Block::Bar(_) => BlockKind::Bar,
            Block::TableHeader(_) => BlockKind::TableHeader,
            Block::TableRow(_) => BlockKind::TableRow,
            Block::Separator(_) => BlockKind::Separator,
            Block::Spacer(_) => BlockKind::Spacer,
            Block::PageBreak => BlockKind::PageBreak,
            Block::Image(_) => BlockKind::Image,
        }
    }

    /// Height this block occupies when laid out `width` points wide.
    pub fn required_height(&self, width: f32) -> f32 {
        match self {
            Block::TextLine(b) => b.height(),
            Block::Paragraph(b) => b.height(width),
            Block::Card(b) => b.height(),
            Block::Badge(_) => card::BADGE_HEIGHT,
            Block::Bar(_) => chart::BAR_HEIGHT,
            Block::TableHeader(_) => table::HEADER_HEIGHT,
            Block::TableRow(_) => table::ROW_HEIGHT,
            Block::Separator(_) => SEPARATOR_HEIGHT,
            Block::Spacer(h) => *h,
            Block::PageBreak => 0.0,
            Block::Image(b) => b.height,
        }
    }

    /// Smallest height that must fit on the current page for the block to
    /// start there: one row for a table header, two lines for a paragraph.
    pub(crate) fn min_start_height(&self, width: f32) -> f32 {
        match self {
            Block::TableHeader(_) => table::HEADER_HEIGHT + table::ROW_HEIGHT,
            Block::Paragraph(p) => {
                let n = p.lines(width).len().min(2) as f32;
                n * p.line_height()
            }
            other => other.required_height(width),
        }
    }

    pub fn draw(&self, x: f32, y: f32, width: f32, theme: &Theme) -> Vec<DrawCommand> {
        match self {
            Block::TextLine(b) => b.draw(x, y, width),
            Block::Paragraph(b) => b.draw(x, y, width),
            Block::Card(b) => b.draw(x, y, width, theme),
            Block::Badge(b) => b.draw(x, y, width, theme),
            Block::Bar(b) => b.draw(x, y, width, theme),
            Block::TableHeader(spec) => table::draw_header(spec, x, y, width, theme),
            Block::TableRow(row) => row.draw(x, y, width, theme),
            Block::Separator(b) => b.draw(x, y, width),
            Block::Image(b) => b.draw(x, y, width),
            Block::Spacer(_) | Block::PageBreak => Vec::new(),
        }
    }
}

/// A filled rectangle, the most common primitive of the renderers.
pub(crate) fn fill(x: f32, y: f32, w: f32, h: f32, color: Color) -> DrawCommand {
    DrawCommand::Rect {
        rect: Rect::new(x, y, w, h),
        style: RectStyle::filled(color),
    }
}
