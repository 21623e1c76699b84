mod assets;
mod backend;
mod blocks;
mod compose;
mod draw;
mod error;
mod flow;
mod fonts;
mod format;
mod geometry;
mod model;
mod options;
mod sections;
mod text;
mod theme;
mod validate;

pub use assets::{ImageAsset, resolve_logo};
pub use backend::{DrawingBackend, PdfBackend, write_document};
pub use blocks::{
    Align, Badge, Bar, Block, BlockKind, Card, CardLine, Cell, Column, ImageBlock, Paragraph,
    Separator, TableId, TableRow, TableSpec, TextLine,
};
pub use compose::{
    ChromeContext, Document, FOOTER_DISCLAIMER, Page, PageKind, layout_content, render,
    stamp_chrome,
};
pub use draw::{DrawCommand, RectStyle, Stroke};
pub use error::{AssetError, Error, IntegrityViolation};
pub use flow::{PageContent, PlacedBlock};
pub use fonts::Font;
pub use geometry::{PageGeometry, Rect};
pub use model::{
    Category, ConfidenceLevel, ConfidenceTiers, DOCUMENT_KEY_LEN, DocumentKey, EntityInfo,
    Record, ReportData, ReportingPeriod, RiskLevel, Totals,
};
pub use options::{RecordOrder, RenderOptions};
pub use theme::{Color, Palette, TextStyle, Theme, Tone};
pub use validate::{MONEY_TOLERANCE, validate};

pub mod text_fit {
    //! Character-count text measurement used for every layout decision.
    pub use crate::text::{estimate_width, fits, truncate, wrap};
}

pub mod formatting {
    //! Display formatting of money, dates, percentages and access keys.
    pub use crate::format::{currency, date, document_key, file_stem, percent, share, timestamp};
}

use std::path::{Path, PathBuf};
use std::time::Instant;

/// A rendered report: the laid-out document, its PDF bytes and the file name
/// it should be saved under.
#[derive(Debug)]
pub struct RenderedReport {
    pub document: Document,
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Validate, lay out and serialize a report to PDF in one call.
pub fn render_pdf(data: &ReportData, options: &RenderOptions) -> Result<RenderedReport, Error> {
    let document = render(data, options)?;
    let bytes = write_document(&document, PdfBackend::for_document(&document))?;
    let filename = document.suggested_filename();
    Ok(RenderedReport {
        document,
        bytes,
        filename,
    })
}

/// Read report JSON from `input` and write the PDF. When `output` is a
/// directory the file is named after the report. Returns the written path.
pub fn convert_json_to_pdf(
    input: &Path,
    output: &Path,
    options: &RenderOptions,
) -> Result<PathBuf, Error> {
    let raw = std::fs::read(input)?;
    convert_json_bytes_to_pdf(&raw, output, options)
}

pub fn convert_json_bytes_to_pdf(
    input: &[u8],
    output: &Path,
    options: &RenderOptions,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let data: ReportData = serde_json::from_slice(input)?;
    let t_parse = t0.elapsed();

    let report = render_pdf(&data, options)?;
    let t_render = t0.elapsed();

    let path = if output.is_dir() {
        output.join(&report.filename)
    } else {
        output.to_path_buf()
    };
    std::fs::write(&path, &report.bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages, output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        report.document.page_count(),
        report.bytes.len(),
    );

    Ok(path)
}
