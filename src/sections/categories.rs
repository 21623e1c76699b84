use crate::blocks::{Badge, Block, Paragraph, TextLine};
use crate::format;
use crate::model::{Category, Record};

use super::{
    ComposeContext, RecordColumns, category_table, record_table, section_heading, sort_records,
    subheading,
};

pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let mut blocks = section_heading("Detailed Category Analysis", theme);
    if ctx.data.categories.is_empty() {
        blocks.push(Block::TextLine(TextLine::new(
            "No credit categories were identified for this period.",
            theme.caption(),
        )));
        return blocks;
    }
    for (index, category) in ctx.data.categories.iter().enumerate() {
        if index > 0 {
            blocks.push(Block::Spacer(16.0));
        }
        blocks.extend(category_section(ctx, index, category));
    }
    blocks
}

fn category_section(ctx: &ComposeContext, index: usize, category: &Category) -> Vec<Block> {
    let theme = ctx.theme;
    let risk = theme.risk(category.risk_level);
    let grand_total = ctx.data.totals.grand_total;
    let count = category.records.len();

    let mut blocks = vec![
        subheading(&format!("{}. {}", index + 1, category.name), theme),
        Block::Badge(Badge {
            label: risk.label.to_string(),
            color: risk.color,
            caption: Some(format!(
                "{} in {} {}, {} of the total",
                format::currency(category.total_value),
                count,
                if count == 1 { "record" } else { "records" },
                format::share(category.total_value, grand_total),
            )),
        }),
        Block::Paragraph(Paragraph::new(
            format!("Legal basis: {}", category.legal_basis),
            theme.body(),
        )),
    ];

    if category.records.is_empty() {
        blocks.push(Block::TextLine(TextLine::new(
            "No records in this category.",
            theme.caption(),
        )));
        return blocks;
    }

    let mut records: Vec<&Record> = category.records.iter().collect();
    sort_records(&mut records, ctx.options.category_record_order);
    blocks.extend(record_table(
        category_table(index),
        RecordColumns::Category,
        &records,
        ctx.options.max_category_rows,
        theme,
    ));
    blocks
}
