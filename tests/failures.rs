mod common;

use std::io::Cursor;

use credit_report_pdf::{
    AssetError, ConfidenceLevel, DocumentKey, DrawingBackend, Error, ImageAsset,
    IntegrityViolation, Rect, RectStyle, Stroke, TextStyle, render, render_pdf, write_document,
};

use common::*;

#[test]
fn category_total_mismatch_aborts_the_render() {
    let mut data = three_category_scenario();
    data.categories[1].total_value = 499.0;
    data.totals.grand_total = 1499.0;

    let err = render_pdf(&data, &options()).unwrap_err();
    match &err {
        Error::DataIntegrity(IntegrityViolation::CategoryTotalMismatch { category, .. }) => {
            assert_eq!(category, "B")
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().starts_with("report could not be generated"));
}

#[test]
fn grand_total_mismatch_aborts_the_render() {
    let mut data = three_category_scenario();
    data.totals.grand_total = 1600.0;
    assert!(matches!(
        render(&data, &options()),
        Err(Error::DataIntegrity(IntegrityViolation::GrandTotalMismatch { .. }))
    ));
}

#[test]
fn malformed_access_key_names_the_record() {
    let mut data = three_category_scenario();
    data.categories[0].records[1].document_key = DocumentKey::Key("1234".into());
    let err = render(&data, &options()).unwrap_err();
    match err {
        Error::DataIntegrity(IntegrityViolation::MalformedDocumentKey { document_number, .. }) => {
            assert_eq!(document_number, "000002")
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn not_informed_keys_are_accepted_and_shown() {
    let mut data = three_category_scenario();
    data.categories[0].records[0].document_key = DocumentKey::NotInformed;
    data.records = Vec::new();
    let doc = render(&data, &options()).unwrap();
    assert!(all_text(&doc).iter().any(|t| t == "not informed"));
}

#[test]
fn annex_records_disagreeing_with_their_category_abort_the_render() {
    let mut data = three_category_scenario();
    data.records[0].credit_value = 99_999.0;
    match render(&data, &options()) {
        Err(Error::DataIntegrity(IntegrityViolation::ReportRecordsTotalMismatch {
            category,
            declared,
            computed,
        })) => {
            assert_eq!(category, "A");
            assert_eq!(declared, 1000.0);
            assert_eq!(computed, 100_799.0);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn negative_annex_record_aborts_the_render() {
    let mut data = three_category_scenario();
    data.records[1].credit_value = -42.0;
    let err = render_pdf(&data, &options()).unwrap_err();
    match err {
        Error::DataIntegrity(IntegrityViolation::NegativeCreditValue { document_number, value, .. }) => {
            assert_eq!(document_number, data.records[1].document_number);
            assert_eq!(value, -42.0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn cent_rounding_is_tolerated() {
    let mut data = report(vec![category(
        "Freight",
        credit_report_pdf::RiskLevel::Low,
        vec![
            record("Freight", 1, 0.1, ConfidenceLevel::High),
            record("Freight", 2, 0.2, ConfidenceLevel::High),
        ],
    )]);
    data.categories[0].total_value = 0.3;
    data.totals.grand_total = 0.3;
    data.totals.by_confidence_tier.high = 0.3;
    assert!(render(&data, &options()).is_ok());
}

/// Backend that records text and can be told to fail.
#[derive(Default)]
struct ScriptedBackend {
    reject_images: bool,
    fail_on_save: bool,
    open: bool,
    pages: usize,
    texts: Vec<String>,
    images: usize,
}

impl DrawingBackend for ScriptedBackend {
    fn new_page(&mut self, _width: f32, _height: f32) -> Result<(), Error> {
        self.open = true;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _style: &TextStyle) -> Result<(), Error> {
        assert!(self.open);
        self.texts.push(text.to_string());
        Ok(())
    }

    fn draw_rect(&mut self, _rect: Rect, _style: &RectStyle) -> Result<(), Error> {
        Ok(())
    }

    fn draw_line(&mut self, _from: (f32, f32), _to: (f32, f32), _stroke: &Stroke) -> Result<(), Error> {
        Ok(())
    }

    fn add_image(&mut self, _asset: &ImageAsset, _rect: Rect) -> Result<(), AssetError> {
        if self.reject_images {
            return Err(AssetError::Rejected("unsupported".into()));
        }
        self.images += 1;
        Ok(())
    }

    fn save_page(&mut self) -> Result<(), Error> {
        if self.fail_on_save {
            return Err(Error::Backend("disk full".into()));
        }
        self.open = false;
        self.pages += 1;
        Ok(())
    }

    fn serialize(self) -> Result<Vec<u8>, Error> {
        let mut out = format!("pages={} images={}\n", self.pages, self.images);
        out.push_str(&self.texts.join("\n"));
        Ok(out.into_bytes())
    }
}

fn logo_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(6, 3, image::Rgb([200, 10, 10]));
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    png
}

#[test]
fn rejected_image_is_replaced_by_its_label() {
    let opts = options().with_logo(logo_png());
    let doc = render(&three_category_scenario(), &opts).unwrap();

    let accepted = write_document(&doc, ScriptedBackend::default()).unwrap();
    let accepted = String::from_utf8(accepted).unwrap();
    assert!(accepted.starts_with(&format!("pages={} images=1", doc.page_count())));
    assert!(!accepted.lines().any(|l| l == opts.brand_label));

    let backend = ScriptedBackend {
        reject_images: true,
        ..Default::default()
    };
    let degraded = String::from_utf8(write_document(&doc, backend).unwrap()).unwrap();
    assert!(degraded.starts_with(&format!("pages={} images=0", doc.page_count())));
    assert!(degraded.lines().any(|l| l == opts.brand_label));
}

#[test]
fn backend_failure_propagates_without_output() {
    let doc = render(&three_category_scenario(), &options()).unwrap();
    let backend = ScriptedBackend {
        fail_on_save: true,
        ..Default::default()
    };
    match write_document(&doc, backend) {
        Err(Error::Backend(msg)) => assert_eq!(msg, "disk full"),
        other => panic!("expected a backend error, got {other:?}"),
    }
}
