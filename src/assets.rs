use std::sync::Arc;

use crate::error::AssetError;

/// A decoded raster image ready for embedding: 8-bit RGB plus an optional
/// 8-bit alpha plane (only kept when some pixel is not fully opaque).
#[derive(Debug, PartialEq)]
pub struct ImageAsset {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl ImageAsset {
    pub fn decode(bytes: &[u8]) -> Result<ImageAsset, AssetError> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba: image::RgbaImage = decoded.to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        Ok(ImageAsset {
            pixel_width: w,
            pixel_height: h,
            rgb,
            alpha,
        })
    }

    /// Pixel aspect ratio (width / height), 1.0 for degenerate images.
    pub fn aspect(&self) -> f32 {
        if self.pixel_height == 0 {
            1.0
        } else {
            self.pixel_width as f32 / self.pixel_height as f32
        }
    }

    pub(crate) fn is_consistent(&self) -> bool {
        let px = self.pixel_width as usize * self.pixel_height as usize;
        px > 0
            && self.rgb.len() == px * 3
            && self.alpha.as_ref().is_none_or(|a| a.len() == px)
    }
}

/// Resolve the optional logo once, before layout. Any failure degrades to
/// `None` so the cover renders its text label instead.
pub fn resolve_logo(bytes: Option<&[u8]>) -> Option<Arc<ImageAsset>> {
    let bytes = bytes?;
    match ImageAsset::decode(bytes) {
        Ok(asset) => {
            log::debug!(
                "logo decoded: {}x{} alpha={}",
                asset.pixel_width,
                asset.pixel_height,
                asset.alpha.is_some()
            );
            Some(Arc::new(asset))
        }
        Err(e) => {
            log::warn!("logo unavailable, using text label: {e}");
            None
        }
    }
}
