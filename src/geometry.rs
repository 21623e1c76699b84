//! Page size, margins and the content region derived from them.
//!
//! Layout works in top-down page coordinates: `y = 0` is the top edge of the
//! page and grows downwards. Backends flip to their own convention.

/// Blocks may end this far past the content bottom before counting as overflow.
const EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::a4()
    }
}

impl PageGeometry {
    pub fn a4() -> Self {
        PageGeometry {
            page_width: 595.28,
            page_height: 841.89,
            margin_top: 72.0,
            margin_bottom: 64.0,
            margin_left: 42.0,
            margin_right: 42.0,
        }
    }

    pub fn content_top(&self) -> f32 {
        self.margin_top
    }

    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    pub fn content_left(&self) -> f32 {
        self.margin_left
    }

    pub fn content_right(&self) -> f32 {
        self.page_width - self.margin_right
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn content_height(&self) -> f32 {
        self.content_bottom() - self.content_top()
    }

    /// Vertical space left below `y` inside the content region.
    pub fn remaining_space(&self, y: f32) -> f32 {
        (self.content_bottom() - y).max(0.0)
    }

    /// Whether a block of `height` starting at `y` would cross the content bottom.
    pub fn exceeds_bottom(&self, y: f32, height: f32) -> bool {
        y + height > self.content_bottom() + EPSILON
    }

    pub fn is_at_top(&self, y: f32) -> bool {
        (y - self.content_top()).abs() < EPSILON
    }
}
