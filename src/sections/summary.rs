use crate::blocks::{Badge, Bar, Block, Card, CardLine, Paragraph, TextLine};
use crate::format;
use crate::model::{Category, ConfidenceLevel};
use crate::theme::Theme;

use super::{ComposeContext, section_heading, subheading};

const PREVIEW_RECOMMENDATIONS: usize = 3;

pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let data = ctx.data;
    let totals = &data.totals;

    let mut blocks = section_heading("Executive Summary", theme);
    blocks.push(Block::Card(Card {
        title: "Totals".to_string(),
        lines: vec![
            CardLine::new("Recoverable credit", format::currency(totals.grand_total)).emphasized(),
            CardLine::new("Categories analysed", data.categories.len().to_string()),
            CardLine::new("Records traced", data.all_records().len().to_string()),
        ],
        accent: theme.primary,
    }));
    blocks.push(Block::Spacer(14.0));

    blocks.push(subheading("Breakdown by confidence", theme));
    for level in ConfidenceLevel::ALL {
        let tone = theme.confidence(level);
        let value = totals.by_confidence_tier.get(level);
        blocks.push(Block::Badge(Badge {
            label: tone.label.to_string(),
            color: tone.color,
            caption: Some(format!(
                "{} ({} of total)",
                format::currency(value),
                format::share(value, totals.grand_total)
            )),
        }));
    }
    blocks.push(Block::Spacer(14.0));

    blocks.push(subheading("Credit by category", theme));
    if data.categories.is_empty() {
        blocks.push(Block::TextLine(TextLine::new(
            "No categories were analysed.",
            theme.caption(),
        )));
    } else {
        blocks.extend(category_bars(&data.categories, theme).into_iter().map(Block::Bar));
    }
    blocks.push(Block::Spacer(14.0));

    blocks.push(subheading("Top recommendations", theme));
    if data.recommendations.is_empty() {
        blocks.push(Block::TextLine(TextLine::new(
            "No recommendations were issued for this period.",
            theme.caption(),
        )));
    }
    for text in data.recommendations.iter().take(PREVIEW_RECOMMENDATIONS) {
        blocks.push(Block::Paragraph(
            Paragraph::new(text.as_str(), theme.body()).with_marker("\u{2022}", 12.0),
        ));
    }
    blocks
}

/// One bar per category. The largest total is found first so every bar is
/// scaled against it; a zero total yields a zero ratio and no visible bar.
pub(crate) fn category_bars(categories: &[Category], theme: &Theme) -> Vec<Bar> {
    let max = categories
        .iter()
        .map(|c| c.total_value)
        .fold(0.0_f64, f64::max);
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let ratio = if max > 0.0 {
                (c.total_value.max(0.0) / max) as f32
            } else {
                0.0
            };
            Bar {
                label: c.name.clone(),
                value_label: format::currency(c.total_value),
                fill_ratio: ratio,
                color: theme.category(i),
            }
        })
        .collect()
}
