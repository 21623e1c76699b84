use std::sync::Arc;

use crate::assets::ImageAsset;
use crate::geometry::Rect;
use crate::theme::{Color, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl RectStyle {
    pub fn filled(color: Color) -> Self {
        RectStyle {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn outlined(color: Color, width: f32) -> Self {
        RectStyle {
            fill: None,
            stroke: Some(Stroke { color, width }),
        }
    }
}

/// A positioned drawing primitive in top-down page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    Rect {
        rect: Rect,
        style: RectStyle,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    /// An optional image. Writers draw `fallback` inside `rect` when the
    /// backend cannot place the image.
    Image {
        rect: Rect,
        asset: Arc<ImageAsset>,
        fallback: String,
        fallback_style: TextStyle,
    },
}

impl DrawCommand {
    /// Top and bottom of the area the command paints.
    pub fn vertical_extent(&self) -> (f32, f32) {
        match self {
            DrawCommand::Text { y, style, .. } => {
                let ascent = style.font.ascent() * style.size;
                (y - ascent, y + style.size - ascent)
            }
            DrawCommand::Rect { rect, .. } | DrawCommand::Image { rect, .. } => {
                (rect.y, rect.bottom())
            }
            DrawCommand::Line { from, to, .. } => (from.1.min(to.1), from.1.max(to.1)),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            DrawCommand::Image { fallback, .. } => Some(fallback),
            _ => None,
        }
    }
}

/// Baseline of a single text line whose line box starts at `top`.
pub(crate) fn baseline(top: f32, line_height: f32, style: &TextStyle) -> f32 {
    top + (line_height - style.size) / 2.0 + style.font.ascent() * style.size
}
