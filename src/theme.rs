use crate::fonts::Font;
use crate::model::{ConfidenceLevel, RiskLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub(crate) fn as_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: Font, size: f32, color: Color) -> Self {
        TextStyle { font, size, color }
    }

    pub fn with_color(self, color: Color) -> Self {
        TextStyle { color, ..self }
    }
}

/// A semantic state resolved to its display color and label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub color: Color,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub zebra: Color,
    pub card_fill: Color,
    pub header_fill: Color,
    pub confidence_high: Color,
    pub confidence_medium: Color,
    pub confidence_low: Color,
    pub risk_low: Color,
    pub risk_medium: Color,
    pub risk_high: Color,
    pub category_palette: Palette,
}

/// Category identity colors, cycled by position. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    first: Color,
    rest: Vec<Color>,
}

impl Palette {
    /// `None` when `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        let mut colors = colors.into_iter();
        let first = colors.next()?;
        Some(Palette {
            first,
            rest: colors.collect(),
        })
    }

    fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn color(&self, index: usize) -> Color {
        match index % self.len() {
            0 => self.first,
            i => self.rest[i - 1],
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: Color::rgb(0x1f, 0x3a, 0x5f),
            accent: Color::rgb(0x2e, 0x86, 0xab),
            text: Color::rgb(0x22, 0x22, 0x22),
            muted: Color::rgb(0x6b, 0x72, 0x80),
            border: Color::rgb(0xd1, 0xd5, 0xdb),
            zebra: Color::rgb(0xf3, 0xf4, 0xf6),
            card_fill: Color::rgb(0xf8, 0xfa, 0xfc),
            header_fill: Color::rgb(0x1f, 0x3a, 0x5f),
            confidence_high: Color::rgb(0x16, 0xa3, 0x4a),
            confidence_medium: Color::rgb(0xd9, 0x77, 0x06),
            confidence_low: Color::rgb(0xdc, 0x26, 0x26),
            risk_low: Color::rgb(0x16, 0xa3, 0x4a),
            risk_medium: Color::rgb(0xd9, 0x77, 0x06),
            risk_high: Color::rgb(0xb9, 0x1c, 0x1c),
            category_palette: Palette {
                first: Color::rgb(0x2e, 0x86, 0xab),
                rest: vec![
                    Color::rgb(0xa2, 0x3b, 0x72),
                    Color::rgb(0xf1, 0x8f, 0x01),
                    Color::rgb(0x3b, 0x1f, 0x2b),
                    Color::rgb(0x44, 0xaf, 0x69),
                    Color::rgb(0x6c, 0x5b, 0x7b),
                ],
            },
        }
    }
}

impl Theme {
    pub fn confidence(&self, level: ConfidenceLevel) -> Tone {
        match level {
            ConfidenceLevel::High => Tone {
                color: self.confidence_high,
                label: "High",
            },
            ConfidenceLevel::Medium => Tone {
                color: self.confidence_medium,
                label: "Medium",
            },
            ConfidenceLevel::Low => Tone {
                color: self.confidence_low,
                label: "Low",
            },
        }
    }

    pub fn risk(&self, level: RiskLevel) -> Tone {
        match level {
            RiskLevel::Low => Tone {
                color: self.risk_low,
                label: "Low risk",
            },
            RiskLevel::Medium => Tone {
                color: self.risk_medium,
                label: "Medium risk",
            },
            RiskLevel::High => Tone {
                color: self.risk_high,
                label: "High risk",
            },
        }
    }

    /// Category identity color, assigned by position in the report.
    pub fn category(&self, index: usize) -> Color {
        self.category_palette.color(index)
    }

    pub fn title(&self) -> TextStyle {
        TextStyle::new(Font::Bold, 22.0, self.primary)
    }

    pub fn heading(&self) -> TextStyle {
        TextStyle::new(Font::Bold, 15.0, self.primary)
    }

    pub fn subheading(&self) -> TextStyle {
        TextStyle::new(Font::Bold, 11.5, self.text)
    }

    pub fn body(&self) -> TextStyle {
        TextStyle::new(Font::Regular, 9.5, self.text)
    }

    pub fn emphasis(&self) -> TextStyle {
        TextStyle::new(Font::Bold, 9.5, self.text)
    }

    pub fn caption(&self) -> TextStyle {
        TextStyle::new(Font::Italic, 8.0, self.muted)
    }

    pub fn table_header(&self) -> TextStyle {
        TextStyle::new(Font::Bold, 7.0, Color::WHITE)
    }

    pub fn table_cell(&self) -> TextStyle {
        TextStyle::new(Font::Regular, 7.0, self.text)
    }

    pub fn chrome(&self) -> TextStyle {
        TextStyle::new(Font::Regular, 7.5, self.muted)
    }
}
