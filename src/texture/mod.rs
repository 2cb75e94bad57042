// SPDX-License-Identifier: MPL-2.0

mod head;
mod svg;

pub use head::{HEAD_SIZE, compose_head};
pub use svg::render_head_svg;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("skin sheet too small: {0}x{1}")]
    TooSmall(u32, u32),
}

/// Head regions of the skin sheet: face at (8,8), hat overlay at (40,8),
/// both 8x8. Shared by the thumbnail and the vector renderer.
pub(crate) const FACE_REGION: (u32, u32) = (8, 8);
pub(crate) const HAT_REGION: (u32, u32) = (40, 8);
pub(crate) const REGION_SIZE: u32 = 8;

/// Decode a skin sheet and reject anything too small to contain the head
/// regions (legacy 64x32 sheets still qualify).
pub(crate) fn decode_sheet(skin_png: &[u8]) -> Result<image::RgbaImage, TextureError> {
    let sheet = image::load_from_memory(skin_png)?.to_rgba8();
    if sheet.width() < HAT_REGION.0 + REGION_SIZE || sheet.height() < HAT_REGION.1 + REGION_SIZE {
        return Err(TextureError::TooSmall(sheet.width(), sheet.height()));
    }
    Ok(sheet)
}
