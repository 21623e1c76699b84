//! The flow writer owns the layout cursor. It is the only code that moves the
//! vertical position or starts pages, so nothing placed through it can overlap
//! or cross the bottom of the content region.

use std::sync::Arc;

use crate::blocks::{Block, BlockKind, Paragraph, TableId, TableSpec};
use crate::draw::DrawCommand;
use crate::geometry::PageGeometry;
use crate::theme::Theme;

/// A block after placement: where it landed and what it draws.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBlock {
    pub kind: BlockKind,
    pub top: f32,
    pub height: f32,
    pub table: Option<TableId>,
    /// True for a table header repeated at the top of a continuation page.
    pub continued: bool,
    pub commands: Vec<DrawCommand>,
}

impl PlacedBlock {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Body content of one page, before any header/footer exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageContent {
    pub index: usize,
    pub placed: Vec<PlacedBlock>,
}

#[derive(Clone, Copy, Debug)]
struct Cursor {
    page_index: usize,
    y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reservation {
    Fits,
    PageBreak,
}

pub(crate) struct FlowWriter<'a> {
    geometry: &'a PageGeometry,
    theme: &'a Theme,
    cursor: Cursor,
    pages: Vec<PageContent>,
}

impl<'a> FlowWriter<'a> {
    pub(crate) fn new(geometry: &'a PageGeometry, theme: &'a Theme) -> Self {
        FlowWriter {
            geometry,
            theme,
            cursor: Cursor {
                page_index: 0,
                y: geometry.content_top(),
            },
            pages: Vec::new(),
        }
    }

    fn width(&self) -> f32 {
        self.geometry.content_width()
    }

    fn at_page_top(&self) -> bool {
        self.geometry.is_at_top(self.cursor.y)
    }

    /// Place a whole block stream, honouring keep-with-next on headings.
    pub(crate) fn place_all(&mut self, blocks: &[Block]) {
        for (i, block) in blocks.iter().enumerate() {
            let extra = match block {
                Block::TextLine(line) if line.keep_with_next => self.kept_height(&blocks[i + 1..]),
                _ => 0.0,
            };
            self.place(block, extra);
        }
    }

    /// Height of what must follow a keep-with-next block on the same page.
    fn kept_height(&self, rest: &[Block]) -> f32 {
        let width = self.width();
        let mut extra = 0.0;
        for block in rest {
            match block {
                Block::Spacer(h) => extra += h,
                Block::PageBreak => break,
                Block::TextLine(line) if line.keep_with_next => {
                    extra += block.required_height(width)
                }
                other => {
                    extra += other.min_start_height(width);
                    break;
                }
            }
        }
        extra
    }

    /// Place one block at the cursor. `extra` is additional height that must
    /// fit below it on the same page.
    pub(crate) fn place(&mut self, block: &Block, extra: f32) {
        let width = self.width();
        match block {
            Block::PageBreak => {
                if !self.at_page_top() {
                    self.new_page();
                }
            }
            Block::Spacer(h) => {
                if self.at_page_top() {
                    return;
                }
                if self.geometry.exceeds_bottom(self.cursor.y, *h) {
                    self.new_page();
                } else {
                    self.advance(*h);
                }
            }
            Block::Paragraph(p) => self.place_paragraph(p),
            Block::TableRow(row) => {
                let h = block.required_height(width);
                if self.reserve(h) == Reservation::PageBreak && row.index > 0 {
                    log::debug!(
                        "TABLE id={} row={} continues on page {}",
                        row.table.id.0,
                        row.index,
                        self.cursor.page_index
                    );
                    self.emit_table_header(&row.table, true);
                }
                self.emit(block, h, false);
            }
            other => {
                let h = other.required_height(width);
                let mut need = h.max(other.min_start_height(width));
                if need + extra <= self.geometry.content_height() {
                    need += extra;
                }
                self.reserve(need);
                self.emit(other, h, false);
            }
        }
    }

    fn emit_table_header(&mut self, spec: &Arc<TableSpec>, continued: bool) {
        let header = Block::TableHeader(Arc::clone(spec));
        let h = header.required_height(self.width());
        self.emit(&header, h, continued);
    }

    fn place_paragraph(&mut self, p: &Paragraph) {
        let width = self.width();
        let lines = p.lines(width).len();
        if lines == 0 {
            return;
        }
        let lh = p.line_height();
        let text_h = lines as f32 * lh;

        if !self.geometry.exceeds_bottom(self.cursor.y, text_h) {
            self.emit(&Block::Paragraph(p.clone()), text_h, false);
            self.gap(p.space_after);
            return;
        }

        let available = self.geometry.remaining_space(self.cursor.y);
        let mut fit = (available / lh).floor() as usize;
        if self.at_page_top() {
            // Taller than a whole page: split wherever the page ends.
            fit = fit.max(1);
            if fit >= lines {
                self.warn_oversize(text_h);
                self.emit(&Block::Paragraph(p.clone()), text_h, false);
                self.gap(p.space_after);
                return;
            }
        } else {
            if lines.saturating_sub(fit) < 2 {
                fit = lines.saturating_sub(2);
            }
            if fit < 2 {
                self.new_page();
                self.place_paragraph(p);
                return;
            }
        }

        let (head, tail) = p.split_after(fit, width);
        log::debug!(
            "paragraph split on page {}: {} of {} lines",
            self.cursor.page_index,
            fit,
            lines
        );
        self.emit(&Block::Paragraph(head), fit as f32 * lh, false);
        self.new_page();
        self.place_paragraph(&tail);
    }

    /// Make room for `height` at the cursor, breaking the page if needed.
    fn reserve(&mut self, height: f32) -> Reservation {
        if !self.geometry.exceeds_bottom(self.cursor.y, height) {
            return Reservation::Fits;
        }
        if self.at_page_top() {
            self.warn_oversize(height);
            return Reservation::Fits;
        }
        self.new_page();
        Reservation::PageBreak
    }

    fn warn_oversize(&self, height: f32) {
        log::warn!(
            "block of {height:.1}pt exceeds the {:.1}pt content region on page {}",
            self.geometry.content_height(),
            self.cursor.page_index
        );
    }

    fn advance(&mut self, height: f32) {
        self.cursor.y += height;
    }

    /// Trailing whitespace never pushes the cursor past the content bottom.
    fn gap(&mut self, height: f32) {
        self.cursor.y = (self.cursor.y + height).min(self.geometry.content_bottom());
    }

    fn new_page(&mut self) {
        log::debug!(
            "page break after page {} at y={:.1}",
            self.cursor.page_index,
            self.cursor.y
        );
        self.cursor.page_index += 1;
        self.cursor.y = self.geometry.content_top();
    }

    fn emit(&mut self, block: &Block, height: f32, continued: bool) {
        let x = self.geometry.content_left();
        let y = self.cursor.y;
        let commands = block.draw(x, y, self.width(), self.theme);
        let table = match block {
            Block::TableHeader(spec) => Some(spec.id),
            Block::TableRow(row) => Some(row.table.id),
            _ => None,
        };

        while self.pages.len() <= self.cursor.page_index {
            let index = self.pages.len();
            self.pages.push(PageContent {
                index,
                placed: Vec::new(),
            });
        }
        self.pages[self.cursor.page_index].placed.push(PlacedBlock {
            kind: block.kind(),
            top: y,
            height,
            table,
            continued,
            commands,
        });
        self.advance(height);
    }

    pub(crate) fn finish(self) -> Vec<PageContent> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Cell, Column, TableRow, TextLine};
    use crate::fonts::Font;
    use crate::theme::{Color, TextStyle};

    fn style() -> TextStyle {
        TextStyle::new(Font::Regular, 10.0, Color::BLACK)
    }

    fn table(rows: usize) -> Vec<Block> {
        let spec = Arc::new(TableSpec {
            id: TableId(7),
            columns: vec![Column::new("A", 1.0), Column::new("B", 1.0)],
            zebra: true,
        });
        let mut blocks = vec![Block::TableHeader(Arc::clone(&spec))];
        for index in 0..rows {
            blocks.push(Block::TableRow(TableRow {
                table: Arc::clone(&spec),
                index,
                cells: vec![Cell::from(format!("r{index}")), Cell::from("x")],
            }));
        }
        blocks
    }

    #[test]
    fn long_table_repeats_header_on_every_page() {
        let geometry = PageGeometry::a4();
        let theme = Theme::default();
        let mut flow = FlowWriter::new(&geometry, &theme);
        flow.place_all(&table(200));
        let pages = flow.finish();
        assert!(pages.len() > 1);
        for page in &pages {
            assert_eq!(page.placed[0].kind, BlockKind::TableHeader);
            assert_eq!(page.placed[0].continued, page.index > 0);
        }
        let rows: usize = pages
            .iter()
            .flat_map(|p| &p.placed)
            .filter(|b| b.kind == BlockKind::TableRow)
            .count();
        assert_eq!(rows, 200);
    }

    #[test]
    fn page_break_at_top_is_a_no_op() {
        let geometry = PageGeometry::a4();
        let theme = Theme::default();
        let mut flow = FlowWriter::new(&geometry, &theme);
        flow.place_all(&[
            Block::PageBreak,
            Block::Spacer(20.0),
            Block::TextLine(TextLine::new("first", style())),
            Block::PageBreak,
            Block::PageBreak,
            Block::TextLine(TextLine::new("second", style())),
        ]);
        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].placed[0].top, geometry.content_top());
    }

    #[test]
    fn heading_moves_with_the_following_table() {
        let geometry = PageGeometry::a4();
        let theme = Theme::default();
        let mut flow = FlowWriter::new(&geometry, &theme);
        // Fill the page until only a little room is left.
        let filler = (geometry.content_height() / 14.0).floor() as usize - 2;
        for i in 0..filler {
            flow.place(&Block::TextLine(TextLine::new(format!("line {i}"), style())), 0.0);
        }
        let mut blocks = vec![Block::TextLine(TextLine::heading("Heading", style()))];
        blocks.extend(table(3));
        flow.place_all(&blocks);
        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].placed[0].kind, BlockKind::TextLine);
        assert_eq!(pages[1].placed[1].kind, BlockKind::TableHeader);
    }

    #[test]
    fn paragraph_splits_across_pages_without_overflow() {
        let geometry = PageGeometry::a4();
        let theme = Theme::default();
        let mut flow = FlowWriter::new(&geometry, &theme);
        let text = "lorem ipsum dolor sit amet ".repeat(600);
        flow.place_all(&[Block::Paragraph(Paragraph::new(text, style()))]);
        let pages = flow.finish();
        assert!(pages.len() >= 2);
        for page in &pages {
            for b in &page.placed {
                assert!(b.top >= geometry.content_top());
                assert!(!geometry.exceeds_bottom(b.top, b.height));
            }
        }
    }

    fn short_page() -> PageGeometry {
        PageGeometry {
            margin_top: 400.0,
            margin_bottom: 400.0,
            ..PageGeometry::a4()
        }
    }

    fn huge() -> TextStyle {
        TextStyle::new(Font::Regular, 40.0, Color::BLACK)
    }

    #[test]
    fn line_taller_than_the_region_is_placed_once_at_the_top() {
        let geometry = short_page();
        let theme = Theme::default();
        let p = Paragraph::new("x", huge());
        assert!(p.line_height() > geometry.content_height());

        let mut flow = FlowWriter::new(&geometry, &theme);
        flow.place_all(&[
            Block::TextLine(TextLine::new("small", style())),
            Block::Paragraph(p),
        ]);
        let pages = flow.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].placed.len(), 1);
        assert_eq!(pages[1].placed[0].kind, BlockKind::Paragraph);
        assert_eq!(pages[1].placed[0].top, geometry.content_top());
    }

    #[test]
    fn oversize_lines_go_one_per_page() {
        let geometry = short_page();
        let theme = Theme::default();
        let width = geometry.content_width();
        let p = Paragraph::new("word ".repeat(30), huge());
        let lines = p.lines(width).len();
        assert!(lines > 1);

        let mut flow = FlowWriter::new(&geometry, &theme);
        flow.place_all(&[Block::Paragraph(p)]);
        let pages = flow.finish();
        assert_eq!(pages.len(), lines);
        assert!(pages.iter().all(|page| page.placed.len() == 1));
    }

    #[test]
    fn oversize_block_is_placed_at_a_page_top() {
        let geometry = short_page();
        let theme = Theme::default();
        let mut flow = FlowWriter::new(&geometry, &theme);
        flow.place_all(&[
            Block::TextLine(TextLine::new("small", style())),
            Block::TextLine(TextLine::new("big", huge())),
            Block::TextLine(TextLine::new("after", style())),
        ]);
        let pages = flow.finish();
        assert_eq!(pages.len(), 3);
        let big = &pages[1].placed[0];
        assert_eq!(big.top, geometry.content_top());
        assert!(big.height > geometry.content_height());
        assert_eq!(pages[2].placed[0].top, geometry.content_top());
    }
}
