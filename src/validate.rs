use std::collections::HashMap;

use crate::error::IntegrityViolation;
use crate::model::{DocumentKey, Record, ReportData};

/// Money comparisons tolerate accumulated rounding up to one cent.
pub const MONEY_TOLERANCE: f64 = 0.01;

fn money_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}

/// Check the numeric and referential invariants a document depends on.
/// The first violation found aborts the render.
pub fn validate(data: &ReportData) -> Result<(), IntegrityViolation> {
    if data.period.end < data.period.start {
        return Err(IntegrityViolation::InvertedPeriod {
            start: data.period.start.to_string(),
            end: data.period.end.to_string(),
        });
    }

    for category in &data.categories {
        for record in &category.records {
            check_document_key(record)?;
            if record.credit_value < 0.0 {
                return Err(IntegrityViolation::NegativeCreditValue {
                    document_number: record.document_number.clone(),
                    category: category.name.clone(),
                    value: record.credit_value,
                });
            }
        }
        let computed = category.records_sum();
        if !money_eq(category.total_value, computed) {
            return Err(IntegrityViolation::CategoryTotalMismatch {
                category: category.name.clone(),
                declared: category.total_value,
                computed,
            });
        }
    }

    let computed: f64 = data.categories.iter().map(|c| c.total_value).sum();
    if !money_eq(data.totals.grand_total, computed) {
        return Err(IntegrityViolation::GrandTotalMismatch {
            declared: data.totals.grand_total,
            computed,
        });
    }

    let tiers_sum = data.totals.by_confidence_tier.sum();
    if !money_eq(tiers_sum, data.totals.grand_total) {
        return Err(IntegrityViolation::ConfidenceTierMismatch {
            grand_total: data.totals.grand_total,
            tiers_sum,
        });
    }

    if !data.records.is_empty() {
        validate_flat_records(data)?;
    }

    Ok(())
}

fn check_document_key(record: &Record) -> Result<(), IntegrityViolation> {
    match &record.document_key {
        DocumentKey::Key(key) if !record.document_key.is_well_formed() => {
            Err(IntegrityViolation::MalformedDocumentKey {
                document_number: record.document_number.clone(),
                key: key.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// The flat list feeds the annex, so it must agree with the categories in
/// membership, count and value.
fn validate_flat_records(data: &ReportData) -> Result<(), IntegrityViolation> {
    let mut per_category: HashMap<&str, (usize, f64)> = data
        .categories
        .iter()
        .map(|c| (c.name.as_str(), (0usize, 0.0)))
        .collect();

    for record in &data.records {
        let Some((count, sum)) = per_category.get_mut(record.category.as_str()) else {
            return Err(IntegrityViolation::UnknownCategory {
                document_number: record.document_number.clone(),
                category: record.category.clone(),
            });
        };
        check_document_key(record)?;
        if record.credit_value < 0.0 {
            return Err(IntegrityViolation::NegativeCreditValue {
                document_number: record.document_number.clone(),
                category: record.category.clone(),
                value: record.credit_value,
            });
        }
        *count += 1;
        *sum += record.credit_value;
    }

    for category in &data.categories {
        let (in_report, computed) = per_category
            .get(category.name.as_str())
            .copied()
            .unwrap_or((0, 0.0));
        if in_report != category.records.len() {
            return Err(IntegrityViolation::RecordCountMismatch {
                category: category.name.clone(),
                in_category: category.records.len(),
                in_report,
            });
        }
        if !money_eq(category.total_value, computed) {
            return Err(IntegrityViolation::ReportRecordsTotalMismatch {
                category: category.name.clone(),
                declared: category.total_value,
                computed,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use chrono::NaiveDate;

    fn record(category: &str, value: f64, confidence: ConfidenceLevel) -> Record {
        Record {
            category: category.to_string(),
            document_key: DocumentKey::NotInformed,
            document_number: format!("{category}-{value}"),
            issuer_id: "11222333000181".into(),
            issuer_name: "Issuer".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            item_code: "001".into(),
            operation_code: "1102".into(),
            tax_situation_code: "50".into(),
            rate: Some(1.65),
            confidence_level: confidence,
            credit_value: value,
            recommended_action: "Claim".into(),
        }
    }

    fn report(categories: Vec<Category>) -> ReportData {
        ReportData::from_categories(
            EntityInfo {
                name: "Acme".into(),
                tax_id: "12.345.678/0001-90".into(),
                trade_name: None,
                address: None,
            },
            ReportingPeriod {
                start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            },
            categories,
            vec![],
            vec![],
        )
    }

    fn category(name: &str, records: Vec<Record>) -> Category {
        Category {
            name: name.into(),
            total_value: records.iter().map(|r| r.credit_value).sum(),
            legal_basis: "Law 10.833/2003".into(),
            risk_level: RiskLevel::Low,
            records,
        }
    }

    #[test]
    fn consistent_report_passes() {
        let data = report(vec![
            category("A", vec![record("A", 600.0, ConfidenceLevel::High), record("A", 400.0, ConfidenceLevel::Low)]),
            category("C", vec![]),
        ]);
        assert_eq!(validate(&data), Ok(()));
    }

    #[test]
    fn category_total_mismatch_names_the_category() {
        let mut data = report(vec![category("A", vec![record("A", 10.0, ConfidenceLevel::High)])]);
        data.categories[0].total_value = 11.0;
        data.totals.grand_total = 11.0;
        match validate(&data) {
            Err(IntegrityViolation::CategoryTotalMismatch { category, .. }) => assert_eq!(category, "A"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rounding_within_a_cent_is_tolerated() {
        let mut data = report(vec![category("A", vec![record("A", 0.1, ConfidenceLevel::High), record("A", 0.2, ConfidenceLevel::High)])]);
        data.categories[0].total_value = 0.3;
        data.totals.grand_total = 0.3;
        assert!(validate(&data).is_ok());
    }

    #[test]
    fn tier_sum_must_match_grand_total() {
        let mut data = report(vec![category("A", vec![record("A", 10.0, ConfidenceLevel::High)])]);
        data.totals.by_confidence_tier.low = 5.0;
        assert!(matches!(
            validate(&data),
            Err(IntegrityViolation::ConfidenceTierMismatch { .. })
        ));
    }

    #[test]
    fn flat_record_with_unknown_category_is_rejected() {
        let mut data = report(vec![category("A", vec![record("A", 10.0, ConfidenceLevel::High)])]);
        data.records[0].category = "Z".into();
        assert!(matches!(
            validate(&data),
            Err(IntegrityViolation::UnknownCategory { .. })
        ));
    }

    #[test]
    fn flat_record_value_must_agree_with_its_category() {
        let mut data = report(vec![category("A", vec![record("A", 10.0, ConfidenceLevel::High)])]);
        data.records[0].credit_value = 12.5;
        match validate(&data) {
            Err(IntegrityViolation::ReportRecordsTotalMismatch { category, computed, .. }) => {
                assert_eq!(category, "A");
                assert_eq!(computed, 12.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negative_flat_record_is_rejected() {
        let mut data = report(vec![category("A", vec![record("A", 10.0, ConfidenceLevel::High)])]);
        data.records[0].credit_value = -1.0;
        assert!(matches!(
            validate(&data),
            Err(IntegrityViolation::NegativeCreditValue { .. })
        ));
    }

    #[test]
    fn short_document_key_is_rejected() {
        let mut r = record("A", 10.0, ConfidenceLevel::High);
        r.document_key = DocumentKey::Key("123".into());
        let data = report(vec![category("A", vec![r])]);
        assert!(matches!(
            validate(&data),
            Err(IntegrityViolation::MalformedDocumentKey { .. })
        ));
    }
}
