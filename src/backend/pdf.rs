use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Ref, Str, TextStr};

use crate::assets::ImageAsset;
use crate::compose::Document;
use crate::draw::{RectStyle, Stroke};
use crate::error::{AssetError, Error};
use crate::fonts::{Font, to_winansi_bytes};
use crate::geometry::Rect;
use crate::theme::TextStyle;

use super::DrawingBackend;

struct OpenPage {
    width: f32,
    height: f32,
    content: Content,
    images: Vec<(String, Ref)>,
}

/// Writes PDF 1.7 with `pdf-writer`. Text uses the unembedded standard-14
/// Helvetica faces with WinAnsi encoding; content streams are deflated.
pub struct PdfBackend {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    fonts: Vec<(Font, Ref)>,
    page_ids: Vec<Ref>,
    image_count: usize,
    current: Option<OpenPage>,
}

impl PdfBackend {
    pub fn new(title: &str, created: DateTime<Utc>) -> Self {
        let mut backend = PdfBackend {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            fonts: Vec::new(),
            page_ids: Vec::new(),
            image_count: 0,
            current: None,
        };
        backend.catalog_id = backend.alloc();
        backend.pages_id = backend.alloc();

        for font in Font::ALL {
            let font_ref = backend.alloc();
            backend
                .pdf
                .type1_font(font_ref)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            backend.fonts.push((font, font_ref));
        }

        let info_id = backend.alloc();
        backend
            .pdf
            .document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(concat!("credit-report-pdf ", env!("CARGO_PKG_VERSION"))))
            .creation_date(pdf_date(created));
        backend
    }

    /// Backend titled after the document and stamped with its generation time.
    pub fn for_document(doc: &Document) -> Self {
        let title = format!("Tax Credit Recovery Report {} ({})", doc.id, doc.subject.name);
        Self::new(&title, doc.generated_at)
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    fn page(&mut self) -> Result<&mut OpenPage, Error> {
        self.current
            .as_mut()
            .ok_or_else(|| Error::Backend("drawing outside an open page".into()))
    }
}

fn pdf_date(t: DateTime<Utc>) -> Date {
    Date::new(t.year().clamp(0, 9999) as u16)
        .month(t.month() as u8)
        .day(t.day() as u8)
        .hour(t.hour() as u8)
        .minute(t.minute() as u8)
        .second(t.second() as u8)
        .utc_offset_hour(0)
}

fn fill_rgb(content: &mut Content, color: crate::theme::Color) {
    let (r, g, b) = color.as_f32();
    content.set_fill_rgb(r, g, b);
}

fn stroke_rgb(content: &mut Content, color: crate::theme::Color) {
    let (r, g, b) = color.as_f32();
    content.set_stroke_rgb(r, g, b);
}

impl DrawingBackend for PdfBackend {
    fn new_page(&mut self, width: f32, height: f32) -> Result<(), Error> {
        if self.current.is_some() {
            return Err(Error::Backend("previous page was not saved".into()));
        }
        self.current = Some(OpenPage {
            width,
            height,
            content: Content::new(),
            images: Vec::new(),
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<(), Error> {
        let page = self.page()?;
        let bytes = to_winansi_bytes(text);
        let c = &mut page.content;
        c.save_state();
        fill_rgb(c, style.color);
        c.begin_text()
            .set_font(Name(style.font.resource_name()), style.size)
            .next_line(x, page.height - y)
            .show(Str(&bytes))
            .end_text();
        c.restore_state();
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, style: &RectStyle) -> Result<(), Error> {
        let page = self.page()?;
        let c = &mut page.content;
        let y = page.height - rect.y - rect.height;
        c.save_state();
        if let Some(color) = style.fill {
            fill_rgb(c, color);
        }
        if let Some(stroke) = style.stroke {
            stroke_rgb(c, stroke.color);
            c.set_line_width(stroke.width);
        }
        c.rect(rect.x, y, rect.width, rect.height);
        match (style.fill.is_some(), style.stroke.is_some()) {
            (true, true) => c.fill_nonzero_and_stroke(),
            (true, false) => c.fill_nonzero(),
            (false, true) => c.stroke(),
            (false, false) => c.end_path(),
        };
        c.restore_state();
        Ok(())
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) -> Result<(), Error> {
        let page = self.page()?;
        let c = &mut page.content;
        c.save_state();
        stroke_rgb(c, stroke.color);
        c.set_line_width(stroke.width);
        c.move_to(from.0, page.height - from.1);
        c.line_to(to.0, page.height - to.1);
        c.stroke();
        c.restore_state();
        Ok(())
    }

    fn add_image(&mut self, asset: &ImageAsset, rect: Rect) -> Result<(), AssetError> {
        if self.current.is_none() {
            return Err(AssetError::Rejected("no open page".into()));
        }
        if !asset.is_consistent() {
            return Err(AssetError::Rejected(format!(
                "{}x{} image with mismatched pixel data",
                asset.pixel_width, asset.pixel_height
            )));
        }

        let smask_ref = match &asset.alpha {
            Some(alpha) => {
                let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                let mask_ref = self.alloc();
                let mut mask = self.pdf.image_xobject(mask_ref, &compressed);
                mask.filter(Filter::FlateDecode);
                mask.width(asset.pixel_width as i32);
                mask.height(asset.pixel_height as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            }
            None => None,
        };

        let xobj_ref = self.alloc();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&asset.rgb, 6);
        let mut xobj = self.pdf.image_xobject(xobj_ref, &compressed);
        xobj.filter(Filter::FlateDecode);
        xobj.width(asset.pixel_width as i32);
        xobj.height(asset.pixel_height as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        if let Some(mask_ref) = smask_ref {
            xobj.s_mask(mask_ref);
        }
        drop(xobj);

        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        let Some(page) = self.current.as_mut() else {
            return Err(AssetError::Rejected("no open page".into()));
        };
        let c = &mut page.content;
        c.save_state();
        c.transform([
            rect.width,
            0.0,
            0.0,
            rect.height,
            rect.x,
            page.height - rect.y - rect.height,
        ]);
        c.x_object(Name(name.as_bytes()));
        c.restore_state();
        page.images.push((name, xobj_ref));
        Ok(())
    }

    fn save_page(&mut self) -> Result<(), Error> {
        let page = self
            .current
            .take()
            .ok_or_else(|| Error::Backend("no open page to save".into()))?;
        let page_id = self.alloc();
        let content_id = self.alloc();

        let raw = page.content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        self.pdf
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);

        let mut pdf_page = self.pdf.page(page_id);
        pdf_page
            .media_box(pdf_writer::Rect::new(0.0, 0.0, page.width, page.height))
            .parent(self.pages_id)
            .contents(content_id);
        {
            let mut resources = pdf_page.resources();
            {
                let mut fonts = resources.fonts();
                for (font, font_ref) in &self.fonts {
                    fonts.pair(Name(font.resource_name()), *font_ref);
                }
            }
            if !page.images.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &page.images {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }
        drop(pdf_page);

        self.page_ids.push(page_id);
        Ok(())
    }

    fn serialize(mut self) -> Result<Vec<u8>, Error> {
        if self.current.is_some() {
            return Err(Error::Backend("last page was not saved".into()));
        }
        if self.page_ids.is_empty() {
            return Err(Error::Backend("document has no pages".into()));
        }
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_ids.iter().copied())
            .count(self.page_ids.len() as i32);
        Ok(self.pdf.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Color;
    use chrono::TimeZone;

    fn backend() -> PdfBackend {
        PdfBackend::new("test", Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn writes_a_pdf_with_one_page() {
        let mut b = backend();
        b.new_page(595.0, 842.0).unwrap();
        b.draw_text("Página 1", 40.0, 60.0, &TextStyle::new(Font::Bold, 10.0, Color::BLACK))
            .unwrap();
        b.draw_rect(Rect::new(40.0, 80.0, 100.0, 20.0), &RectStyle::filled(Color::BLACK))
            .unwrap();
        b.save_page().unwrap();
        let bytes = b.serialize().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn drawing_without_a_page_is_an_error() {
        let mut b = backend();
        let style = TextStyle::new(Font::Regular, 10.0, Color::BLACK);
        assert!(matches!(b.draw_text("x", 0.0, 0.0, &style), Err(Error::Backend(_))));
        assert!(matches!(b.serialize(), Err(Error::Backend(_))));
    }

    #[test]
    fn inconsistent_image_is_rejected() {
        let mut b = backend();
        b.new_page(100.0, 100.0).unwrap();
        let asset = ImageAsset {
            pixel_width: 2,
            pixel_height: 2,
            rgb: vec![0; 5],
            alpha: None,
        };
        let result = b.add_image(&asset, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(matches!(result, Err(AssetError::Rejected(_))));
    }
}
