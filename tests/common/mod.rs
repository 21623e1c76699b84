#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use credit_report_pdf::{
    BlockKind, Category, ConfidenceLevel, Document, DocumentKey, DrawCommand, EntityInfo,
    PageGeometry, Record, RenderOptions, ReportData, ReportingPeriod, RiskLevel, TableId,
};

pub const EPS: f32 = 0.5;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 9, 30, 0).unwrap()
}

pub fn options() -> RenderOptions {
    RenderOptions::default().with_generated_at(fixed_time())
}

pub fn subject() -> EntityInfo {
    EntityInfo {
        name: "Metalurgica Exemplo S.A.".to_string(),
        tax_id: "12.345.678/0001-90".to_string(),
        trade_name: Some("Exemplo Metais".to_string()),
        address: Some("Rua das Industrias, 100, Sao Paulo - SP".to_string()),
    }
}

pub fn period() -> ReportingPeriod {
    ReportingPeriod {
        start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
    }
}

/// A 44-digit access key derived from `n`.
pub fn key(n: usize) -> DocumentKey {
    DocumentKey::Key(format!("3523{:040}", n))
}

pub fn record(category: &str, n: usize, value: f64, level: ConfidenceLevel) -> Record {
    Record {
        category: category.to_string(),
        document_key: key(n),
        document_number: format!("{:06}", n),
        issuer_id: format!("{:014}", 1000 + n % 7),
        issuer_name: format!("Fornecedor {}", n % 7),
        issue_date: NaiveDate::from_ymd_opt(2023, 1 + (n % 12) as u32, 1 + (n % 28) as u32)
            .unwrap(),
        item_code: format!("IT{:04}", n % 100),
        operation_code: "1102".to_string(),
        tax_situation_code: "50".to_string(),
        rate: Some(1.65),
        confidence_level: level,
        credit_value: value,
        recommended_action: "File rectification".to_string(),
    }
}

pub fn category(name: &str, risk: RiskLevel, records: Vec<Record>) -> Category {
    Category {
        name: name.to_string(),
        total_value: records.iter().map(|r| r.credit_value).sum(),
        legal_basis: format!("Law 10.637/2002, art. 3 ({name})"),
        risk_level: risk,
        records,
    }
}

pub fn report(categories: Vec<Category>) -> ReportData {
    ReportData::from_categories(
        subject(),
        period(),
        categories,
        vec![
            "Rectify the monthly contribution returns for the last five years.".to_string(),
            "Review the classification of freight expenses on purchases.".to_string(),
            "Adopt an automated check of credit codes before closing each month.".to_string(),
            "Request refund of the accumulated balance.".to_string(),
        ],
        vec!["Figures are based on documents received up to June 2024.".to_string()],
    )
}

/// Categories A (1000 in three records), B (500 in two) and C (empty).
pub fn three_category_scenario() -> ReportData {
    report(vec![
        category(
            "A",
            RiskLevel::Low,
            vec![
                record("A", 1, 200.0, ConfidenceLevel::High),
                record("A", 2, 500.0, ConfidenceLevel::High),
                record("A", 3, 300.0, ConfidenceLevel::Medium),
            ],
        ),
        category(
            "B",
            RiskLevel::Medium,
            vec![
                record("B", 4, 150.0, ConfidenceLevel::Low),
                record("B", 5, 350.0, ConfidenceLevel::Medium),
            ],
        ),
        category("C", RiskLevel::High, Vec::new()),
    ])
}

/// One category with `n` records of distinct values.
pub fn large_category_report(n: usize) -> ReportData {
    let records = (0..n)
        .map(|i| {
            let level = ConfidenceLevel::ALL[i % 3];
            record("Inputs", i + 1, 10.0 + i as f64, level)
        })
        .collect();
    report(vec![category("Inputs", RiskLevel::Medium, records)])
}

pub fn all_text(doc: &Document) -> Vec<String> {
    doc.pages
        .iter()
        .flat_map(|p| p.draw_commands())
        .filter_map(|c| c.text().map(str::to_string))
        .collect()
}

/// Index of the first page whose content contains `needle`.
pub fn page_with_text(doc: &Document, needle: &str) -> Option<usize> {
    doc.pages.iter().position(|p| {
        p.content
            .iter()
            .flat_map(|b| &b.commands)
            .any(|c| c.text() == Some(needle))
    })
}

/// Cell texts of every row of `table`, in document order.
pub fn table_rows(doc: &Document, table: TableId) -> Vec<Vec<String>> {
    doc.pages
        .iter()
        .flat_map(|p| &p.content)
        .filter(|b| b.kind == BlockKind::TableRow && b.table == Some(table))
        .map(|b| {
            b.commands
                .iter()
                .filter_map(DrawCommand::text)
                .map(str::to_string)
                .collect()
        })
        .collect()
}

/// Assert that no two content blocks overlap and none leaves the content region.
pub fn assert_no_overlap_or_overflow(doc: &Document, geometry: &PageGeometry) {
    for page in &doc.pages {
        let mut placed: Vec<_> = page.content.iter().collect();
        placed.sort_by(|a, b| a.top.total_cmp(&b.top));
        for b in &placed {
            assert!(
                b.top >= geometry.content_top() - EPS && b.bottom() <= geometry.content_bottom() + EPS,
                "{:?} at {:.1}..{:.1} leaves the content region on page {}",
                b.kind,
                b.top,
                b.bottom(),
                page.index
            );
            for cmd in &b.commands {
                let (top, bottom) = cmd.vertical_extent();
                assert!(
                    top >= b.top - EPS && bottom <= b.bottom() + EPS,
                    "{cmd:?} draws outside its {:?} block on page {}",
                    b.kind,
                    page.index
                );
            }
        }
        for pair in placed.windows(2) {
            assert!(
                pair[0].bottom() <= pair[1].top + EPS,
                "{:?} and {:?} overlap on page {}",
                pair[0].kind,
                pair[1].kind,
                page.index
            );
        }
    }
}
