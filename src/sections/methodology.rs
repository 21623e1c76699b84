use std::collections::BTreeSet;

use crate::blocks::{Block, Card, CardLine, Paragraph};
use crate::format;
use crate::model::{DocumentKey, ReportData};

use super::{ComposeContext, section_heading, subheading};

const APPROACH: &[&str] = &[
    "Every fiscal document issued to or by the subject during the reporting period was \
     collected and matched item by item against its tax classification, operation code and \
     tax situation code.",
    "Each item was checked against the credit rules applicable on its issue date. Items for \
     which a credit was taken below what the rules allow, or not taken at all, are reported \
     as recoverable and grouped into the categories that follow.",
    "Amounts are stated in the document currency and rounded to the cent. Category totals \
     are the exact sum of the records listed under them.",
];

const TIERS: &[(&str, &str)] = &[
    (
        "High",
        "The credit follows directly from the document data and settled rules.",
    ),
    (
        "Medium",
        "The credit depends on an interpretation that is usually accepted but not settled.",
    ),
    (
        "Low",
        "The credit depends on a contested interpretation or on data that could not be fully verified.",
    ),
];

/// Counts describing where the analysed data came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Provenance {
    pub records: usize,
    pub documents: usize,
    pub issuers: usize,
    pub keys_not_informed: usize,
    pub categories: usize,
}

impl Provenance {
    pub(crate) fn of(data: &ReportData) -> Self {
        let records = data.all_records();
        let documents: BTreeSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.issuer_id.as_str(), r.document_number.as_str()))
            .collect();
        let issuers: BTreeSet<&str> = records.iter().map(|r| r.issuer_id.as_str()).collect();
        Provenance {
            records: records.len(),
            documents: documents.len(),
            issuers: issuers.len(),
            keys_not_informed: records
                .iter()
                .filter(|r| r.document_key == DocumentKey::NotInformed)
                .count(),
            categories: data.categories.len(),
        }
    }
}

pub(super) fn compose(ctx: &ComposeContext) -> Vec<Block> {
    let theme = ctx.theme;
    let data = ctx.data;
    let counts = Provenance::of(data);

    let mut blocks = section_heading("Methodology", theme);
    for text in APPROACH {
        blocks.push(Block::Paragraph(Paragraph::new(*text, theme.body())));
    }
    blocks.push(Block::Spacer(10.0));

    blocks.push(Block::Card(Card {
        title: "Data provenance".to_string(),
        lines: vec![
            CardLine::new(
                "Period analysed",
                format!(
                    "{} to {}",
                    format::date(data.period.start),
                    format::date(data.period.end)
                ),
            ),
            CardLine::new("Fiscal documents", counts.documents.to_string()),
            CardLine::new("Records", counts.records.to_string()),
            CardLine::new("Distinct issuers", counts.issuers.to_string()),
            CardLine::new("Access keys not informed", counts.keys_not_informed.to_string()),
            CardLine::new("Categories", counts.categories.to_string()),
        ],
        accent: theme.accent,
    }));
    blocks.push(Block::Spacer(14.0));

    blocks.push(subheading("Confidence tiers", theme));
    for (label, meaning) in TIERS {
        blocks.push(Block::Paragraph(
            Paragraph::new(*meaning, theme.body()).with_marker(*label, 54.0),
        ));
    }
    blocks
}
