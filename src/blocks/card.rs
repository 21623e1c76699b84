use crate::draw::{DrawCommand, RectStyle, Stroke, baseline};
use crate::fonts::Font;
use crate::geometry::Rect;
use crate::text;
use crate::theme::{Color, TextStyle, Theme};

use super::{fill, line_height};

pub const BADGE_HEIGHT: f32 = 18.0;
const BADGE_PAD: f32 = 5.0;
const BADGE_TEXT: f32 = 7.5;

const CARD_PAD: f32 = 8.0;
const CARD_TITLE_SIZE: f32 = 10.5;
const CARD_LINE_SIZE: f32 = 9.0;
const ACCENT_WIDTH: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct CardLine {
    pub label: String,
    pub value: String,
    pub emphasis: bool,
}

impl CardLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        CardLine {
            label: label.into(),
            value: value.into(),
            emphasis: false,
        }
    }

    pub fn emphasized(mut self) -> Self {
        self.emphasis = true;
        self
    }
}

/// Bordered box with a title and label/value lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub title: String,
    pub lines: Vec<CardLine>,
    pub accent: Color,
}

impl Card {
    fn title_style(theme_text: Color) -> TextStyle {
        TextStyle::new(Font::Bold, CARD_TITLE_SIZE, theme_text)
    }

    fn line_style(color: Color, emphasis: bool) -> TextStyle {
        let font = if emphasis { Font::Bold } else { Font::Regular };
        TextStyle::new(font, CARD_LINE_SIZE, color)
    }

    pub(super) fn height(&self) -> f32 {
        let title_h = CARD_TITLE_SIZE * super::LINE_SPACING;
        let line_h = CARD_LINE_SIZE * super::LINE_SPACING;
        2.0 * CARD_PAD + title_h + self.lines.len() as f32 * line_h
    }

    pub(super) fn draw(&self, x: f32, y: f32, width: f32, theme: &Theme) -> Vec<DrawCommand> {
        let h = self.height();
        let mut out = vec![
            DrawCommand::Rect {
                rect: Rect::new(x, y, width, h),
                style: RectStyle {
                    fill: Some(theme.card_fill),
                    stroke: Some(Stroke {
                        color: theme.border,
                        width: 0.6,
                    }),
                },
            },
            fill(x, y, ACCENT_WIDTH, h, self.accent),
        ];

        let inner_x = x + ACCENT_WIDTH + CARD_PAD;
        let inner_w = (width - ACCENT_WIDTH - 2.0 * CARD_PAD).max(0.0);
        let title = Self::title_style(theme.primary);
        let title_h = line_height(&title);
        let mut top = y + CARD_PAD;
        out.push(DrawCommand::Text {
            x: inner_x,
            y: baseline(top, title_h, &title),
            text: text::truncate(&self.title, inner_w, title.size, title.font),
            style: title,
        });
        top += title_h;

        let label_w = inner_w * 0.45;
        let value_w = inner_w - label_w;
        for line in &self.lines {
            let label = Self::line_style(theme.muted, false);
            let value = Self::line_style(theme.text, line.emphasis);
            let lh = line_height(&label);
            out.push(DrawCommand::Text {
                x: inner_x,
                y: baseline(top, lh, &label),
                text: text::truncate(&line.label, label_w, label.size, label.font),
                style: label,
            });
            let shown = text::truncate(&line.value, value_w, value.size, value.font);
            let vw = text::estimate_width(&shown, value.size, value.font);
            out.push(DrawCommand::Text {
                x: inner_x + inner_w - vw,
                y: baseline(top, lh, &value),
                text: shown,
                style: value,
            });
            top += lh;
        }
        out
    }
}

/// Small colored label, optionally followed by a caption in body text.
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub label: String,
    pub color: Color,
    pub caption: Option<String>,
}

impl Badge {
    pub(super) fn draw(&self, x: f32, y: f32, width: f32, theme: &Theme) -> Vec<DrawCommand> {
        let label_style = TextStyle::new(Font::Bold, BADGE_TEXT, Color::WHITE);
        let label_w = text::estimate_width(&self.label, BADGE_TEXT, Font::Bold);
        let pill_w = (label_w + 2.0 * BADGE_PAD).min(width);
        let pill_h = BADGE_HEIGHT - 4.0;
        let pill_y = y + 2.0;

        let mut out = vec![
            fill(x, pill_y, pill_w, pill_h, self.color),
            DrawCommand::Text {
                x: x + BADGE_PAD,
                y: baseline(pill_y, pill_h, &label_style),
                text: self.label.clone(),
                style: label_style,
            },
        ];

        if let Some(caption) = &self.caption {
            let style = TextStyle::new(Font::Regular, 9.0, theme.text);
            let cx = x + pill_w + 6.0;
            let avail = (x + width - cx).max(0.0);
            out.push(DrawCommand::Text {
                x: cx,
                y: baseline(y, BADGE_HEIGHT, &style),
                text: text::truncate(caption, avail, style.size, style.font),
                style,
            });
        }
        out
    }
}
