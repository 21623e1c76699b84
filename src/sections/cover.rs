use crate::blocks::{Align, Block, Card, CardLine, ImageBlock, TextLine};
use crate::fonts::Font;
use crate::format;
use crate::theme::TextStyle;

use super::ComposeContext;

const LOGO_HEIGHT: f32 = 48.0;
const LOGO_MAX_WIDTH: f32 = 180.0;

pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let data = ctx.data;
    let subject = &data.subject;

    let mut subject_lines = vec![CardLine::new("Company", &subject.name).emphasized()];
    if let Some(trade) = &subject.trade_name {
        subject_lines.push(CardLine::new("Trade name", trade));
    }
    subject_lines.push(CardLine::new("Tax ID", &subject.tax_id));
    if let Some(address) = &subject.address {
        subject_lines.push(CardLine::new("Address", address));
    }

    let period = format!(
        "{} \u{2013} {}",
        format::date(data.period.start),
        format::date(data.period.end)
    );

    vec![
        Block::Image(ImageBlock {
            asset: ctx.logo.clone(),
            fallback: ctx.options.brand_label.clone(),
            fallback_style: TextStyle::new(Font::Bold, 16.0, theme.primary),
            max_width: LOGO_MAX_WIDTH,
            height: LOGO_HEIGHT,
            align: Align::Left,
        }),
        Block::Spacer(90.0),
        Block::TextLine(TextLine::new("Tax Credit Recovery Report", theme.title())),
        Block::TextLine(TextLine::new(
            "Traceability of recoverable credits by category and fiscal document",
            theme.body().with_color(theme.muted),
        )),
        Block::Spacer(28.0),
        Block::Card(Card {
            title: "Subject".to_string(),
            lines: subject_lines,
            accent: theme.primary,
        }),
        Block::Spacer(12.0),
        Block::Card(Card {
            title: "Report".to_string(),
            lines: vec![
                CardLine::new("Report ID", ctx.report_id),
                CardLine::new("Period", period),
                CardLine::new("Generated", format::timestamp(ctx.generated_at)),
            ],
            accent: theme.accent,
        }),
        Block::Spacer(12.0),
        Block::Card(Card {
            title: "Recoverable credit".to_string(),
            lines: vec![
                CardLine::new("Grand total", format::currency(data.totals.grand_total))
                    .emphasized(),
                CardLine::new("Categories", data.categories.len().to_string()),
                CardLine::new("Records", data.all_records().len().to_string()),
            ],
            accent: theme.confidence_high,
        }),
    ]
}
