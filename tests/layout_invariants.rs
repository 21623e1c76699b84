mod common;

use credit_report_pdf::{BlockKind, PageKind, TableId, render};

use common::*;

#[test]
fn scenario_has_no_overlap_or_overflow() {
    init_logging();
    let opts = options();
    let doc = render(&three_category_scenario(), &opts).unwrap();
    assert_no_overlap_or_overflow(&doc, &opts.geometry);
}

#[test]
fn long_report_has_no_overlap_or_overflow() {
    let opts = options().with_max_category_rows(500);
    let doc = render(&large_category_report(400), &opts).unwrap();
    assert!(doc.page_count() > 10);
    assert_no_overlap_or_overflow(&doc, &opts.geometry);
}

#[test]
fn every_body_page_reads_page_i_of_n() {
    let doc = render(&large_category_report(250), &options()).unwrap();
    let n = doc.page_count();
    assert_eq!(n, doc.pages.len());

    assert_eq!(doc.pages[0].kind, PageKind::Cover);
    assert!(
        !doc.pages[0]
            .chrome
            .iter()
            .any(|c| c.text().is_some_and(|t| t.starts_with("Page ")))
    );

    for page in &doc.pages[1..] {
        assert_eq!(page.kind, PageKind::Body);
        let footers: Vec<&str> = page
            .chrome
            .iter()
            .filter_map(|c| c.text())
            .filter(|t| t.starts_with("Page "))
            .collect();
        assert_eq!(footers, vec![format!("Page {} of {}", page.index + 1, n)]);
    }
}

#[test]
fn chrome_never_enters_the_content_region() {
    let opts = options();
    let doc = render(&large_category_report(120), &opts).unwrap();
    let g = &opts.geometry;
    for page in &doc.pages {
        for cmd in &page.chrome {
            let (top, bottom) = cmd.vertical_extent();
            assert!(
                bottom <= g.content_top() + EPS || top >= g.content_bottom() - EPS,
                "{cmd:?} on page {}",
                page.index
            );
        }
    }
}

#[test]
fn split_table_repeats_its_header_first_on_each_continuation_page() {
    let opts = options().with_max_category_rows(200);
    let doc = render(&large_category_report(150), &opts).unwrap();
    let table = Some(TableId(1));

    let pages_with_rows: Vec<_> = doc
        .pages
        .iter()
        .filter(|p| {
            p.content
                .iter()
                .any(|b| b.kind == BlockKind::TableRow && b.table == table)
        })
        .collect();
    assert!(pages_with_rows.len() >= 2, "table should span pages");

    for (i, page) in pages_with_rows.iter().enumerate() {
        let first = page
            .content
            .iter()
            .find(|b| b.table == table)
            .unwrap();
        assert_eq!(first.kind, BlockKind::TableHeader, "page {}", page.index);
        if i > 0 {
            assert!(first.continued);
            assert_eq!(page.content[0].kind, BlockKind::TableHeader);
        } else {
            assert!(!first.continued);
        }
    }

    assert_eq!(table_rows(&doc, TableId(1)).len(), 150);
}

#[test]
fn annex_spans_pages_with_headers() {
    let doc = render(&large_category_report(300), &options()).unwrap();
    let annex = Some(TableId(0));
    let mut seen_header = false;
    for page in &doc.pages {
        let mut header_on_page = false;
        for b in page.content.iter().filter(|b| b.table == annex) {
            match b.kind {
                BlockKind::TableHeader => {
                    header_on_page = true;
                    seen_header = true;
                }
                BlockKind::TableRow => assert!(header_on_page, "orphan row on page {}", page.index),
                _ => {}
            }
        }
    }
    assert!(seen_header);
    assert_eq!(table_rows(&doc, TableId(0)).len(), 300);
}

#[test]
fn headings_are_never_last_on_a_page() {
    let doc = render(&large_category_report(90), &options()).unwrap();
    for page in &doc.pages[1..] {
        let last = page.content.last().unwrap();
        let is_heading = last.kind == BlockKind::TextLine
            && last
                .commands
                .iter()
                .filter_map(|c| c.text())
                .any(|t| t.starts_with("1. Inputs") || t == "Traceability Annex");
        assert!(!is_heading, "page {} ends with a heading", page.index);
    }
}
