//! Section composers: pure functions from report data to block sequences.
//! They never see pages or coordinates.

mod annex;
mod categories;
mod cover;
mod disclaimers;
mod methodology;
mod recommendations;
mod summary;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::assets::ImageAsset;
use crate::blocks::{Block, Cell, Column, Separator, TableId, TableRow, TableSpec, TextLine};
use crate::format;
use crate::model::{Record, ReportData};
use crate::options::{RecordOrder, RenderOptions};
use crate::theme::Theme;

pub(crate) const ANNEX_TABLE: TableId = TableId(0);

pub(crate) fn category_table(index: usize) -> TableId {
    TableId(index + 1)
}

/// Everything a composer may read. Built once per render.
pub(crate) struct ComposeContext<'a> {
    pub data: &'a ReportData,
    pub options: &'a RenderOptions,
    pub theme: &'a Theme,
    pub report_id: &'a str,
    pub generated_at: DateTime<Utc>,
    pub logo: Option<Arc<ImageAsset>>,
}

/// All sections in document order, as one block stream.
pub(crate) fn compose_all(ctx: &ComposeContext) -> Vec<Block> {
    let mut blocks = cover::compose(ctx);
    blocks.push(Block::PageBreak);
    blocks.extend(summary::compose(ctx));
    blocks.push(Block::PageBreak);
    blocks.extend(methodology::compose(ctx));
    blocks.push(Block::PageBreak);
    blocks.extend(categories::compose(ctx));
    blocks.push(Block::PageBreak);
    blocks.extend(recommendations::compose(ctx));
    blocks.push(Block::Spacer(18.0));
    blocks.extend(disclaimers::compose(ctx));
    blocks.push(Block::PageBreak);
    blocks.extend(annex::compose(ctx));
    blocks
}

pub(crate) fn section_heading(title: &str, theme: &Theme) -> Vec<Block> {
    vec![
        Block::TextLine(TextLine::heading(title, theme.heading())),
        Block::Separator(Separator {
            color: theme.accent,
            thickness: 1.2,
        }),
    ]
}

pub(crate) fn subheading(title: &str, theme: &Theme) -> Block {
    Block::TextLine(TextLine::heading(title, theme.subheading()))
}

pub(crate) fn sort_records(records: &mut [&Record], order: RecordOrder) {
    match order {
        RecordOrder::CreditValueDesc => {
            records.sort_by(|a, b| b.credit_value.total_cmp(&a.credit_value))
        }
        RecordOrder::IssueDateAsc => records.sort_by_key(|r| r.issue_date),
        RecordOrder::AsProvided => {}
    }
}

/// Column set of a record table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RecordColumns {
    Category,
    Annex,
}

fn columns(kind: RecordColumns) -> Vec<Column> {
    match kind {
        RecordColumns::Category => vec![
            Column::new("Document", 1.1),
            Column::new("Issuer", 2.2),
            Column::new("Issue date", 1.0),
            Column::new("Item", 0.8),
            Column::new("Op.", 0.6),
            Column::new("CST", 0.5),
            Column::new("Rate", 0.7).right(),
            Column::new("Confidence", 0.9),
            Column::new("Credit", 1.3).right(),
        ],
        RecordColumns::Annex => vec![
            Column::new("#", 0.6).right(),
            Column::new("Access key", 4.8),
            Column::new("Document", 0.9),
            Column::new("Issuer", 1.5),
            Column::new("Date", 1.05),
            Column::new("Conf.", 0.75),
            Column::new("Credit", 1.3).right(),
            Column::new("Action", 1.4),
        ],
    }
}

fn rate_cell(rate: Option<f64>) -> String {
    rate.map(format::percent).unwrap_or_else(|| "-".to_string())
}

fn record_cells(kind: RecordColumns, position: usize, r: &Record, theme: &Theme) -> Vec<Cell> {
    let tone = theme.confidence(r.confidence_level);
    match kind {
        RecordColumns::Category => vec![
            Cell::from(r.document_number.as_str()),
            Cell::from(r.issuer_name.as_str()),
            Cell::from(format::date(r.issue_date)),
            Cell::from(r.item_code.as_str()),
            Cell::from(r.operation_code.as_str()),
            Cell::from(r.tax_situation_code.as_str()),
            Cell::from(rate_cell(r.rate)),
            Cell::colored(tone.label, tone.color),
            Cell::from(format::currency(r.credit_value)),
        ],
        RecordColumns::Annex => vec![
            Cell::from((position + 1).to_string()),
            Cell::from(format::document_key(&r.document_key)),
            Cell::from(r.document_number.as_str()),
            Cell::from(r.issuer_name.as_str()),
            Cell::from(format::date(r.issue_date)),
            Cell::colored(tone.label, tone.color),
            Cell::from(format::currency(r.credit_value)),
            Cell::from(r.recommended_action.as_str()),
        ],
    }
}

pub(crate) fn overflow_notice(omitted: usize) -> String {
    let noun = if omitted == 1 { "record" } else { "records" };
    format!("+ {omitted} additional {noun} not shown")
}

/// Header, at most `cap` rows, then a single overflow notice when rows were
/// omitted. `records` must already be in display order.
pub(crate) fn record_table(
    id: TableId,
    kind: RecordColumns,
    records: &[&Record],
    cap: usize,
    theme: &Theme,
) -> Vec<Block> {
    let spec = Arc::new(TableSpec {
        id,
        columns: columns(kind),
        zebra: true,
    });
    let shown = records.len().min(cap);
    let mut blocks = Vec::with_capacity(shown + 2);
    blocks.push(Block::TableHeader(Arc::clone(&spec)));
    for (index, record) in records.iter().take(shown).enumerate() {
        blocks.push(Block::TableRow(TableRow {
            table: Arc::clone(&spec),
            index,
            cells: record_cells(kind, index, record, theme),
        }));
    }
    let omitted = records.len() - shown;
    if omitted > 0 {
        log::debug!("TABLE id={} capped at {shown} rows, {omitted} omitted", id.0);
        blocks.push(Block::TextLine(TextLine::new(
            overflow_notice(omitted),
            theme.caption(),
        )));
    }
    blocks
}
