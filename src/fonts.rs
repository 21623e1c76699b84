/// The standard-14 faces the engine draws with. None of them are embedded;
/// every PDF viewer ships their metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
    Italic,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Italic];

    pub(crate) fn base_font(self) -> &'static [u8] {
        match self {
            Font::Regular => b"Helvetica",
            Font::Bold => b"Helvetica-Bold",
            Font::Italic => b"Helvetica-Oblique",
        }
    }

    /// Resource name inside each page's font dictionary.
    pub(crate) fn resource_name(self) -> &'static [u8] {
        match self {
            Font::Regular => b"F1",
            Font::Bold => b"F2",
            Font::Italic => b"F3",
        }
    }

    /// Average advance of one character as a fraction of the font size.
    /// Tuned against Helvetica running text (lowercase-heavy, some digits).
    pub fn width_factor(self) -> f32 {
        match self {
            Font::Regular | Font::Italic => 0.5,
            Font::Bold => 0.55,
        }
    }

    /// Baseline offset below the top of a line box, as a fraction of the font size.
    pub(crate) fn ascent(self) -> f32 {
        0.78
    }
}

/// Map a single Unicode char to its WinAnsi byte, or `None` if unmappable.
fn char_to_winansi(c: char) -> Option<u8> {
    match c as u32 {
        0x0020..=0x007E => Some(c as u8),
        0x00A0..=0x00FF => Some(c as u8),
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters become `?` so the glyph count stays stable.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| char_to_winansi(c).unwrap_or(b'?'))
        .collect()
}
