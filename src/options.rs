use chrono::{DateTime, Utc};

use crate::format;
use crate::geometry::PageGeometry;
use crate::model::ReportData;
use crate::theme::Theme;

/// Order of rows in the per-category record tables. The annex always lists
/// by credit value, highest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordOrder {
    #[default]
    CreditValueDesc,
    IssueDateAsc,
    AsProvided,
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub geometry: PageGeometry,
    pub theme: Theme,
    /// Rows shown per category table before the overflow notice.
    pub max_category_rows: usize,
    /// Rows shown in the traceability annex before the overflow notice.
    pub annex_row_cap: usize,
    pub category_record_order: RecordOrder,
    pub report_id: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    /// Encoded PNG or JPEG bytes for the cover logo.
    pub logo: Option<Vec<u8>>,
    /// Text shown in place of the logo when it is absent or unusable.
    pub brand_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            geometry: PageGeometry::a4(),
            theme: Theme::default(),
            max_category_rows: 40,
            annex_row_cap: 10_000,
            category_record_order: RecordOrder::default(),
            report_id: None,
            generated_at: None,
            logo: None,
            brand_label: "Credit Recovery Analysis".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn with_max_category_rows(mut self, rows: usize) -> Self {
        self.max_category_rows = rows;
        self
    }

    pub fn with_annex_row_cap(mut self, rows: usize) -> Self {
        self.annex_row_cap = rows;
        self
    }

    pub fn with_record_order(mut self, order: RecordOrder) -> Self {
        self.category_record_order = order;
        self
    }

    pub fn with_report_id(mut self, id: impl Into<String>) -> Self {
        self.report_id = Some(id.into());
        self
    }

    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn with_logo(mut self, bytes: Vec<u8>) -> Self {
        self.logo = Some(bytes);
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Report id from the options, or `RPT-<tax id digits>-<YYYYMM of period start>`.
    pub fn resolve_report_id(&self, data: &ReportData) -> String {
        if let Some(id) = &self.report_id {
            return id.clone();
        }
        let digits: String = data
            .subject
            .tax_id
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let stem = format::file_stem(&digits);
        format!("RPT-{}-{}", stem, data.period.start.format("%Y%m"))
    }
}
