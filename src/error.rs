use thiserror::Error;

/// Fatal failures. When one of these is returned no document bytes exist.
#[derive(Error, Debug)]
pub enum Error {
    #[error("report could not be generated: {0}")]
    DataIntegrity(#[from] IntegrityViolation),
    #[error("report could not be generated: backend write failed: {0}")]
    Backend(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid report data: {0}")]
    Json(#[from] serde_json::Error),
}

/// A broken numeric or referential invariant in the input report data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrityViolation {
    #[error(
        "category \"{category}\" declares total {declared:.2} but its records sum to {computed:.2}"
    )]
    CategoryTotalMismatch {
        category: String,
        declared: f64,
        computed: f64,
    },
    #[error(
        "category \"{category}\" declares total {declared:.2} but the report's record list sums to {computed:.2} for it"
    )]
    ReportRecordsTotalMismatch {
        category: String,
        declared: f64,
        computed: f64,
    },
    #[error("grand total {declared:.2} differs from the sum of category totals {computed:.2}")]
    GrandTotalMismatch { declared: f64, computed: f64 },
    #[error("confidence tiers sum to {tiers_sum:.2} but the grand total is {grand_total:.2}")]
    ConfidenceTierMismatch { grand_total: f64, tiers_sum: f64 },
    #[error("record {document_number} references unknown category \"{category}\"")]
    UnknownCategory {
        document_number: String,
        category: String,
    },
    #[error(
        "category \"{category}\" lists {in_category} records but the report lists {in_report} for it"
    )]
    RecordCountMismatch {
        category: String,
        in_category: usize,
        in_report: usize,
    },
    #[error("record {document_number} has a malformed document key \"{key}\"")]
    MalformedDocumentKey { document_number: String, key: String },
    #[error("record {document_number} in \"{category}\" has negative credit value {value:.2}")]
    NegativeCreditValue {
        document_number: String,
        category: String,
        value: f64,
    },
    #[error("reporting period ends ({end}) before it starts ({start})")]
    InvertedPeriod { start: String, end: String },
}

/// Non-fatal failure of an optional visual asset. Always recovered locally.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    #[error("asset rejected by backend: {0}")]
    Rejected(String),
}
