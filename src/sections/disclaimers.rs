use crate::blocks::{Block, Paragraph};

use super::{ComposeContext, section_heading};

const BOILERPLATE: &[&str] = &[
    "This report identifies credits that may be recoverable based on the fiscal documents \
     made available for analysis. It does not constitute a tax opinion and does not replace \
     review by the subject's accountants or legal counsel.",
    "Recovery of any amount listed here depends on the filing of the applicable requests and \
     rectifications and on acceptance by the tax authority. Amounts may change after audit.",
    "Records whose access key is marked as not informed could not be matched against the \
     electronic document registry and should be verified before any claim is filed.",
];

pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let mut blocks = section_heading("Disclaimers", theme);
    let style = theme.body().with_color(theme.muted);
    for text in BOILERPLATE
        .iter()
        .copied()
        .chain(ctx.data.disclaimers.iter().map(String::as_str))
    {
        blocks.push(Block::Paragraph(Paragraph::new(text, style)));
    }
    blocks
}
