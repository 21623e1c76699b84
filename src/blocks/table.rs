use std::sync::Arc;

use crate::draw::{DrawCommand, Stroke, baseline};
use crate::text;
use crate::theme::{Color, Theme};

use super::{Align, aligned_x, fill};

pub const HEADER_HEIGHT: f32 = 16.0;
pub const ROW_HEIGHT: f32 = 13.0;
const CELL_PAD: f32 = 3.0;

/// Identifies one logical table across page breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TableId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub title: String,
    /// Share of the table width relative to the other columns.
    pub weight: f32,
    pub align: Align,
}

impl Column {
    pub fn new(title: impl Into<String>, weight: f32) -> Self {
        Column {
            title: title.into(),
            weight,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

/// Column layout shared by a table's header and all of its rows.
#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    pub id: TableId,
    pub columns: Vec<Column>,
    pub zebra: bool,
}

impl TableSpec {
    /// Absolute column widths for a table `width` points wide.
    pub fn column_widths(&self, width: f32) -> Vec<f32> {
        let total: f32 = self.columns.iter().map(|c| c.weight.max(0.0)).sum();
        if total <= 0.0 {
            let n = self.columns.len().max(1) as f32;
            return vec![width / n; self.columns.len()];
        }
        self.columns
            .iter()
            .map(|c| width * c.weight.max(0.0) / total)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Cell {
            text: text.into(),
            color: Some(color),
            bold: true,
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell {
            text,
            color: None,
            bold: false,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::from(text.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub table: Arc<TableSpec>,
    /// Zero-based position of the row within its table.
    pub index: usize,
    pub cells: Vec<Cell>,
}

pub(super) fn draw_header(
    spec: &TableSpec,
    x: f32,
    y: f32,
    width: f32,
    theme: &Theme,
) -> Vec<DrawCommand> {
    let style = theme.table_header();
    let mut out = vec![fill(x, y, width, HEADER_HEIGHT, theme.header_fill)];
    let mut cx = x;
    for (col, w) in spec.columns.iter().zip(spec.column_widths(width)) {
        let inner = (w - 2.0 * CELL_PAD).max(0.0);
        let shown = text::truncate(&col.title, inner, style.size, style.font);
        let tw = text::estimate_width(&shown, style.size, style.font);
        out.push(DrawCommand::Text {
            x: aligned_x(col.align, cx + CELL_PAD, inner, tw),
            y: baseline(y, HEADER_HEIGHT, &style),
            text: shown,
            style,
        });
        cx += w;
    }
    out
}

impl TableRow {
    pub(super) fn draw(&self, x: f32, y: f32, width: f32, theme: &Theme) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        if self.table.zebra && self.index % 2 == 1 {
            out.push(fill(x, y, width, ROW_HEIGHT, theme.zebra));
        }
        let base = theme.table_cell();
        let mut cx = x;
        for ((cell, col), w) in self
            .cells
            .iter()
            .zip(&self.table.columns)
            .zip(self.table.column_widths(width))
        {
            let mut style = base;
            if cell.bold {
                style.font = crate::fonts::Font::Bold;
            }
            if let Some(c) = cell.color {
                style.color = c;
            }
            let inner = (w - 2.0 * CELL_PAD).max(0.0);
            let shown = text::truncate(&cell.text, inner, style.size, style.font);
            let tw = text::estimate_width(&shown, style.size, style.font);
            out.push(DrawCommand::Text {
                x: aligned_x(col.align, cx + CELL_PAD, inner, tw),
                y: baseline(y, ROW_HEIGHT, &style),
                text: shown,
                style,
            });
            cx += w;
        }
        let rule_y = y + ROW_HEIGHT;
        out.push(DrawCommand::Line {
            from: (x, rule_y),
            to: (x + width, rule_y),
            stroke: Stroke {
                color: theme.border,
                width: 0.4,
            },
        });
        out
    }
}
