// SPDX-License-Identifier: MPL-2.0

//! Head thumbnail synthesis: face layer upscaled into a 36x36 canvas with
//! the hat overlay alpha-composited on top. Nearest-neighbor only — the
//! sheets are pixel art and bilinear sampling would smear the edges.

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

use crate::texture::{FACE_REGION, HAT_REGION, REGION_SIZE, TextureError, decode_sheet};

/// Output thumbnail edge length.
pub const HEAD_SIZE: u32 = 36;

const FACE_SCALE: u32 = 32;
const FACE_INSET: i64 = 2;

/// Derive the head thumbnail from an encoded skin sheet. Pure: identical
/// input bytes always produce byte-identical output bytes.
pub fn compose_head(skin_png: &[u8]) -> Result<Vec<u8>, TextureError> {
    let sheet = decode_sheet(skin_png)?;

    let face = imageops::crop_imm(&sheet, FACE_REGION.0, FACE_REGION.1, REGION_SIZE, REGION_SIZE)
        .to_image();
    let face = imageops::resize(&face, FACE_SCALE, FACE_SCALE, FilterType::Nearest);

    let hat = imageops::crop_imm(&sheet, HAT_REGION.0, HAT_REGION.1, REGION_SIZE, REGION_SIZE)
        .to_image();
    let hat = imageops::resize(&hat, HEAD_SIZE, HEAD_SIZE, FilterType::Nearest);

    // Face first, inset so the hat layer hangs over the edges; then the
    // hat over-blended so its transparent pixels reveal the face.
    let mut canvas = RgbaImage::new(HEAD_SIZE, HEAD_SIZE);
    imageops::overlay(&mut canvas, &face, FACE_INSET, FACE_INSET);
    imageops::overlay(&mut canvas, &hat, 0, 0);

    let mut out = Cursor::new(Vec::new());
    canvas.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 64x64 sheet: opaque red face, hat transparent except its (0,0) pixel.
    fn sheet_with_hat_corner() -> Vec<u8> {
        let mut sheet = RgbaImage::new(64, 64);
        for y in 0..8 {
            for x in 0..8 {
                sheet.put_pixel(8 + x, 8 + y, RED);
            }
        }
        sheet.put_pixel(40, 8, BLUE);
        encode(&sheet)
    }

    fn encode(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn decode(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    #[test]
    fn test_output_dimensions() {
        let head = decode(&compose_head(&sheet_with_hat_corner()).unwrap());
        assert_eq!((head.width(), head.height()), (HEAD_SIZE, HEAD_SIZE));
    }

    #[test]
    fn test_transparent_hat_reveals_face() {
        let head = decode(&compose_head(&sheet_with_hat_corner()).unwrap());
        // Center of the thumbnail: hat is transparent there, face shows.
        assert_eq!(*head.get_pixel(18, 18), RED);
    }

    #[test]
    fn test_opaque_hat_draws_over_everything() {
        let head = decode(&compose_head(&sheet_with_hat_corner()).unwrap());
        // Hat pixel (0,0) lands at the thumbnail origin, outside the face inset.
        assert_eq!(*head.get_pixel(0, 0), BLUE);
    }

    #[test]
    fn test_corners_outside_face_stay_transparent() {
        let head = decode(&compose_head(&sheet_with_hat_corner()).unwrap());
        assert_eq!(head.get_pixel(35, 35)[3], 0);
    }

    #[test]
    fn test_synthesis_is_pure() {
        let sheet = sheet_with_hat_corner();
        assert_eq!(compose_head(&sheet).unwrap(), compose_head(&sheet).unwrap());
    }

    #[test]
    fn test_undersized_sheet_is_rejected() {
        let tiny = encode(&RgbaImage::new(16, 16));
        assert!(matches!(
            compose_head(&tiny),
            Err(TextureError::TooSmall(16, 16))
        ));
    }

    #[test]
    fn test_garbage_bytes_are_an_image_error() {
        assert!(matches!(
            compose_head(b"not a png"),
            Err(TextureError::Image(_))
        ));
    }
}
