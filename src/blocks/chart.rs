use crate::draw::{DrawCommand, baseline};
use crate::fonts::Font;
use crate::text;
use crate::theme::{Color, TextStyle, Theme};

use super::fill;

pub const BAR_HEIGHT: f32 = 18.0;
const LABEL_SHARE: f32 = 0.3;
const VALUE_WIDTH: f32 = 80.0;
const GAP: f32 = 6.0;

/// One horizontal bar of a chart.
///
/// `fill_ratio` is the bar's value divided by the largest sibling value, so
/// every bar in a chart is measured against the same scale. A ratio of zero
/// draws no bar at all.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value_label: String,
    pub fill_ratio: f32,
    pub color: Color,
}

impl Bar {
    /// Track width available to the bar itself when the chart is `width` wide.
    pub fn track_width(width: f32) -> f32 {
        (width - width * LABEL_SHARE - VALUE_WIDTH - 2.0 * GAP).max(0.0)
    }

    pub fn bar_width(&self, width: f32) -> f32 {
        self.fill_ratio.clamp(0.0, 1.0) * Self::track_width(width)
    }

    pub(super) fn draw(&self, x: f32, y: f32, width: f32, theme: &Theme) -> Vec<DrawCommand> {
        let label_style = TextStyle::new(Font::Regular, 8.5, theme.text);
        let value_style = TextStyle::new(Font::Bold, 8.5, theme.text);
        let label_w = width * LABEL_SHARE;
        let track_x = x + label_w + GAP;

        let mut out = vec![DrawCommand::Text {
            x,
            y: baseline(y, BAR_HEIGHT, &label_style),
            text: text::truncate(&self.label, label_w, label_style.size, label_style.font),
            style: label_style,
        }];

        let bar_w = self.bar_width(width);
        if bar_w > 0.0 {
            out.push(fill(track_x, y + 3.0, bar_w, BAR_HEIGHT - 6.0, self.color));
        }

        out.push(DrawCommand::Text {
            x: track_x + bar_w + GAP,
            y: baseline(y, BAR_HEIGHT, &value_style),
            text: text::truncate(&self.value_label, VALUE_WIDTH, value_style.size, value_style.font),
            style: value_style,
        });
        out
    }
}
