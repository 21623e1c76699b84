//! Document composer.
//!
//! Rendering happens in two separate passes. [`layout_content`] streams the
//! section blocks through the flow writer and yields body-only pages; its
//! output length is the page count. [`stamp_chrome`] then walks that fixed
//! list and adds header, footer and cover bands inside the margins, never
//! moving anything the first pass placed.

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};

use crate::assets;
use crate::blocks::{Block, BlockKind, fill};
use crate::draw::{DrawCommand, Stroke, baseline};
use crate::error::Error;
use crate::flow::{FlowWriter, PageContent, PlacedBlock};
use crate::fonts::Font;
use crate::format;
use crate::geometry::PageGeometry;
use crate::model::{EntityInfo, ReportData};
use crate::options::RenderOptions;
use crate::sections::{self, ComposeContext};
use crate::text;
use crate::theme::{Color, TextStyle, Theme};
use crate::validate::validate;

pub const FOOTER_DISCLAIMER: &str =
    "Recoverable amounts are estimates subject to review and do not constitute a tax opinion.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    Body,
}

/// A finished page: body content from the layout pass plus chrome.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub index: usize,
    pub kind: PageKind,
    pub content: Vec<PlacedBlock>,
    pub chrome: Vec<DrawCommand>,
}

impl Page {
    /// Every draw command of the page, content first.
    pub fn draw_commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.content
            .iter()
            .flat_map(|b| b.commands.iter())
            .chain(self.chrome.iter())
    }

    /// Text of every content block of the given kind, in placement order.
    pub fn texts_of(&self, kind: BlockKind) -> Vec<&str> {
        self.content
            .iter()
            .filter(|b| b.kind == kind)
            .flat_map(|b| b.commands.iter().filter_map(DrawCommand::text))
            .collect()
    }
}

/// The laid-out report. Immutable once returned from [`render`].
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub subject: EntityInfo,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// `<report id>_<YYYYMMDD>.pdf`, safe for any file system.
    pub fn suggested_filename(&self) -> String {
        format!(
            "{}_{}.pdf",
            format::file_stem(&self.id),
            self.generated_at.format("%Y%m%d")
        )
    }
}

/// Phase 1: place every block, producing pages that hold body content only.
pub fn layout_content(blocks: &[Block], geometry: &PageGeometry, theme: &Theme) -> Vec<PageContent> {
    let mut flow = FlowWriter::new(geometry, theme);
    flow.place_all(blocks);
    let mut pages = flow.finish();
    if pages.is_empty() {
        pages.push(PageContent::default());
    }
    pages
}

/// What the chrome pass needs to know about the report.
pub struct ChromeContext<'a> {
    pub geometry: &'a PageGeometry,
    pub theme: &'a Theme,
    pub subject_name: &'a str,
    pub report_id: &'a str,
    pub generated_at: DateTime<Utc>,
}

/// Phase 2: stamp chrome on a fully laid-out page list. Page 0 is the cover.
pub fn stamp_chrome(contents: Vec<PageContent>, ctx: &ChromeContext) -> Vec<Page> {
    let total = contents.len();
    contents
        .into_iter()
        .map(|page| {
            let (kind, chrome) = if page.index == 0 {
                (PageKind::Cover, cover_bands(ctx))
            } else {
                let mut chrome = header(ctx);
                chrome.extend(footer(ctx, page.index + 1, total));
                (PageKind::Body, chrome)
            };
            Page {
                index: page.index,
                kind,
                content: page.placed,
                chrome,
            }
        })
        .collect()
}

fn rule(x0: f32, x1: f32, y: f32, color: Color) -> DrawCommand {
    DrawCommand::Line {
        from: (x0, y),
        to: (x1, y),
        stroke: Stroke { color, width: 0.5 },
    }
}

fn right_aligned(text: String, right: f32, y: f32, style: TextStyle) -> DrawCommand {
    let w = text::estimate_width(&text, style.size, style.font);
    DrawCommand::Text {
        x: right - w,
        y,
        text,
        style,
    }
}

fn header(ctx: &ChromeContext) -> Vec<DrawCommand> {
    let g = ctx.geometry;
    let style = ctx.theme.chrome();
    let bold = TextStyle::new(Font::Bold, style.size, ctx.theme.primary);
    let rule_y = g.content_top() - 12.0;
    let line_top = rule_y - 6.0 - style.size * 1.4;
    let half = g.content_width() / 2.0;
    vec![
        DrawCommand::Text {
            x: g.content_left(),
            y: baseline(line_top, style.size * 1.4, &bold),
            text: text::truncate(ctx.subject_name, half, bold.size, bold.font),
            style: bold,
        },
        right_aligned(
            text::truncate(ctx.report_id, half, style.size, style.font),
            g.content_right(),
            baseline(line_top, style.size * 1.4, &style),
            style,
        ),
        rule(g.content_left(), g.content_right(), rule_y, ctx.theme.border),
    ]
}

/// Footer of the 1-based page `number` out of `total`.
fn footer(ctx: &ChromeContext, number: usize, total: usize) -> Vec<DrawCommand> {
    let g = ctx.geometry;
    let style = ctx.theme.chrome();
    let note = TextStyle::new(Font::Italic, 6.5, ctx.theme.muted);
    let lh = style.size * 1.4;
    let note_top = g.content_bottom() + 8.0;
    let rule_y = note_top + note.size * 1.4 + 4.0;
    let line_top = rule_y + 4.0;
    vec![
        DrawCommand::Text {
            x: g.content_left(),
            y: baseline(note_top, note.size * 1.4, &note),
            text: text::truncate(FOOTER_DISCLAIMER, g.content_width(), note.size, note.font),
            style: note,
        },
        rule(g.content_left(), g.content_right(), rule_y, ctx.theme.border),
        DrawCommand::Text {
            x: g.content_left(),
            y: baseline(line_top, lh, &style),
            text: format::timestamp(ctx.generated_at),
            style,
        },
        right_aligned(
            format!("Page {number} of {total}"),
            g.content_right(),
            baseline(line_top, lh, &style),
            style,
        ),
    ]
}

/// Full-width bands in the top and bottom margins of the cover.
fn cover_bands(ctx: &ChromeContext) -> Vec<DrawCommand> {
    let g = ctx.geometry;
    let theme = ctx.theme;
    let top_h = (g.margin_top - 24.0).max(0.0);
    let bottom_h = (g.margin_bottom - 24.0).max(0.0);
    let bottom_y = g.page_height - bottom_h;
    let mut out = vec![
        fill(0.0, 0.0, g.page_width, top_h, theme.primary),
        fill(0.0, top_h, g.page_width, 3.0, theme.accent),
        fill(0.0, bottom_y, g.page_width, bottom_h, theme.primary),
    ];
    if bottom_h > 0.0 {
        let style = TextStyle::new(Font::Regular, 7.5, Color::WHITE);
        out.push(DrawCommand::Text {
            x: g.content_left(),
            y: baseline(bottom_y, bottom_h, &style),
            text: "Confidential. Prepared for the exclusive use of the subject.".to_string(),
            style,
        });
        out.push(right_aligned(
            ctx.report_id.to_string(),
            g.content_right(),
            baseline(bottom_y, bottom_h, &style),
            style,
        ));
    }
    out
}

/// Validate, compose and lay out a report. Fails before any page exists when
/// the data breaks an invariant.
pub fn render(data: &ReportData, options: &RenderOptions) -> Result<Document, Error> {
    let t0 = Instant::now();

    validate(data)?;
    let t_validate = t0.elapsed();

    let logo = assets::resolve_logo(options.logo.as_deref());
    let report_id = options.resolve_report_id(data);
    let generated_at = options.generated_at.unwrap_or_else(Utc::now);
    let theme = &options.theme;
    let geometry = &options.geometry;

    let blocks = sections::compose_all(&ComposeContext {
        data,
        options,
        theme,
        report_id: &report_id,
        generated_at,
        logo,
    });
    let t_compose = t0.elapsed();

    let contents = layout_content(&blocks, geometry, theme);
    let t_layout = t0.elapsed();

    let pages = stamp_chrome(
        contents,
        &ChromeContext {
            geometry,
            theme,
            subject_name: &data.subject.name,
            report_id: &report_id,
            generated_at,
        },
    );
    let t_chrome = t0.elapsed();

    log::info!(
        "Render phases: validate={:.1}ms, compose={:.1}ms ({} blocks), layout={:.1}ms, chrome={:.1}ms ({} pages)",
        t_validate.as_secs_f64() * 1000.0,
        (t_compose - t_validate).as_secs_f64() * 1000.0,
        blocks.len(),
        (t_layout - t_compose).as_secs_f64() * 1000.0,
        (t_chrome - t_layout).as_secs_f64() * 1000.0,
        pages.len(),
    );

    Ok(Document {
        id: report_id,
        generated_at,
        period_start: data.period.start,
        period_end: data.period.end,
        subject: data.subject.clone(),
        geometry: *geometry,
        pages,
    })
}
