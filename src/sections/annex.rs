use crate::blocks::{Block, Paragraph, TextLine};
use crate::model::Record;
use crate::options::RecordOrder;

use super::{
    ANNEX_TABLE, ComposeContext, RecordColumns, record_table, section_heading, sort_records,
};

/// Every record of the report in one continuous table, highest credit first.
pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let mut blocks = section_heading("Traceability Annex", theme);
    blocks.push(Block::Paragraph(Paragraph::new(
        "Each line below identifies one credit item by its fiscal document access key, \
         document number, issuer and issue date, so it can be located in the subject's \
         records and in the electronic document registry.",
        theme.body(),
    )));

    let mut records: Vec<&Record> = ctx.data.all_records();
    if records.is_empty() {
        blocks.push(Block::TextLine(TextLine::new(
            "No records to trace.",
            theme.caption(),
        )));
        return blocks;
    }
    sort_records(&mut records, RecordOrder::CreditValueDesc);
    blocks.extend(record_table(
        ANNEX_TABLE,
        RecordColumns::Annex,
        &records,
        ctx.options.annex_row_cap,
        theme,
    ));
    blocks
}
