use crate::blocks::{Block, Paragraph, TextLine};

use super::{ComposeContext, section_heading};

const NUMBER_INDENT: f32 = 18.0;

pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let mut blocks = section_heading("Recommendations", theme);
    if ctx.data.recommendations.is_empty() {
        blocks.push(Block::TextLine(TextLine::new(
            "No recommendations were issued for this period.",
            theme.caption(),
        )));
        return blocks;
    }
    for (i, text) in ctx.data.recommendations.iter().enumerate() {
        let mut item = Paragraph::new(text.as_str(), theme.body())
            .with_marker(format!("{}.", i + 1), NUMBER_INDENT);
        item.space_after = 6.0;
        blocks.push(Block::Paragraph(item));
    }
    blocks
}
