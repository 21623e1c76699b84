use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 3] = [Self::High, Self::Medium, Self::Low];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Fiscal document access key: 44 ASCII digits, or the explicit "not informed" marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum DocumentKey {
    Key(String),
    NotInformed,
}

pub const DOCUMENT_KEY_LEN: usize = 44;

impl DocumentKey {
    pub fn is_well_formed(&self) -> bool {
        match self {
            DocumentKey::Key(k) => {
                k.len() == DOCUMENT_KEY_LEN && k.bytes().all(|b| b.is_ascii_digit())
            }
            DocumentKey::NotInformed => true,
        }
    }
}

impl From<Option<String>> for DocumentKey {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(k) if !k.trim().is_empty() => DocumentKey::Key(k.trim().to_string()),
            _ => DocumentKey::NotInformed,
        }
    }
}

impl From<DocumentKey> for Option<String> {
    fn from(value: DocumentKey) -> Self {
        match value {
            DocumentKey::Key(k) => Some(k),
            DocumentKey::NotInformed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub name: String,
    pub tax_id: String,
    #[serde(default)]
    pub trade_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceTiers {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl ConfidenceTiers {
    pub fn get(&self, level: ConfidenceLevel) -> f64 {
        match level {
            ConfidenceLevel::High => self.high,
            ConfidenceLevel::Medium => self.medium,
            ConfidenceLevel::Low => self.low,
        }
    }

    pub fn sum(&self) -> f64 {
        self.high + self.medium + self.low
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub grand_total: f64,
    pub by_confidence_tier: ConfidenceTiers,
}

/// One traceable credit line item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub category: String,
    #[serde(default = "not_informed")]
    pub document_key: DocumentKey,
    pub document_number: String,
    pub issuer_id: String,
    pub issuer_name: String,
    pub issue_date: NaiveDate,
    pub item_code: String,
    pub operation_code: String,
    pub tax_situation_code: String,
    #[serde(default)]
    pub rate: Option<f64>,
    pub confidence_level: ConfidenceLevel,
    pub credit_value: f64,
    pub recommended_action: String,
}

fn not_informed() -> DocumentKey {
    DocumentKey::NotInformed
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub total_value: f64,
    pub legal_basis: String,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Category {
    pub fn records_sum(&self) -> f64 {
        self.records.iter().map(|r| r.credit_value).sum()
    }
}

/// Read-only input of a render call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub subject: EntityInfo,
    pub period: ReportingPeriod,
    pub totals: Totals,
    pub categories: Vec<Category>,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub disclaimers: Vec<String>,
}

impl ReportData {
    /// Build report data whose totals and flat record list are derived from `categories`.
    pub fn from_categories(
        subject: EntityInfo,
        period: ReportingPeriod,
        categories: Vec<Category>,
        recommendations: Vec<String>,
        disclaimers: Vec<String>,
    ) -> Self {
        let records: Vec<Record> = categories
            .iter()
            .flat_map(|c| c.records.iter().cloned())
            .collect();
        let mut tiers = ConfidenceTiers::default();
        for r in &records {
            match r.confidence_level {
                ConfidenceLevel::High => tiers.high += r.credit_value,
                ConfidenceLevel::Medium => tiers.medium += r.credit_value,
                ConfidenceLevel::Low => tiers.low += r.credit_value,
            }
        }
        let grand_total = categories.iter().map(|c| c.total_value).sum();
        ReportData {
            subject,
            period,
            totals: Totals {
                grand_total,
                by_confidence_tier: tiers,
            },
            categories,
            records,
            recommendations,
            disclaimers,
        }
    }

    /// Every record of the report. Falls back to the category lists when the
    /// flat list was not supplied.
    pub fn all_records(&self) -> Vec<&Record> {
        if self.records.is_empty() {
            self.categories.iter().flat_map(|c| c.records.iter()).collect()
        } else {
            self.records.iter().collect()
        }
    }
}
