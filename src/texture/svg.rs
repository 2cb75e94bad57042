// SPDX-License-Identifier: MPL-2.0

//! Scalable reconstruction of the head as SVG: one rectangle per visible
//! sheet pixel, face pass first at 7/8 scale, hat pass over it at full
//! scale. Fully transparent pixels emit no element at all, so see-through
//! hat regions stay see-through.

use image::Rgba;
use std::fmt::Write as _;

use crate::texture::{FACE_REGION, HAT_REGION, REGION_SIZE, TextureError, decode_sheet};

/// Inset ratio of the face layer relative to the hat layer, matching the
/// 32-in-36 geometry of the raster thumbnail.
const FACE_RATIO: f64 = 7.0 / 8.0;

/// Render the head from an encoded skin sheet into SVG markup with a
/// viewport of `8 * pixel_width` on each axis.
pub fn render_head_svg(skin_png: &[u8], pixel_width: u32) -> Result<String, TextureError> {
    let sheet = decode_sheet(skin_png)?;
    let w = pixel_width as f64;
    let view = w * REGION_SIZE as f64;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {view} {view}" shape-rendering="crispEdges">"#
    );

    // Pass A: face, (W+1)-sized cells against hairline seams, 7/8 scale,
    // centered by a W/2 inset.
    for y in 0..REGION_SIZE {
        for x in 0..REGION_SIZE {
            let px = sheet.get_pixel(FACE_REGION.0 + x, FACE_REGION.1 + y);
            if px[3] == 0 {
                continue;
            }
            push_rect(
                &mut svg,
                x as f64 * w * FACE_RATIO + w / 2.0,
                y as f64 * w * FACE_RATIO + w / 2.0,
                (w + 1.0) * FACE_RATIO,
                px,
            );
        }
    }

    // Pass B: hat overlay at full scale, no inset.
    for y in 0..REGION_SIZE {
        for x in 0..REGION_SIZE {
            let px = sheet.get_pixel(HAT_REGION.0 + x, HAT_REGION.1 + y);
            if px[3] == 0 {
                continue;
            }
            push_rect(&mut svg, x as f64 * w, y as f64 * w, w, px);
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

fn push_rect(svg: &mut String, x: f64, y: f64, size: f64, px: &Rgba<u8>) {
    let _ = write!(
        svg,
        r#"<rect x="{x}" y="{y}" width="{size}" height="{size}" fill="{}"/>"#,
        fill(px)
    );
}

fn fill(px: &Rgba<u8>) -> String {
    let [r, g, b, a] = px.0;
    if a == 255 {
        format!("rgba({r},{g},{b},1)")
    } else {
        format!("rgba({r},{g},{b},{:.3})", f64::from(a) / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn encode(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    /// Opaque green face, hat transparent except one half-transparent pixel.
    fn sheet() -> Vec<u8> {
        let mut img = RgbaImage::new(64, 64);
        for y in 0..8 {
            for x in 0..8 {
                img.put_pixel(8 + x, 8 + y, Rgba([0, 128, 0, 255]));
            }
        }
        img.put_pixel(41, 9, Rgba([10, 20, 30, 128]));
        encode(&img)
    }

    #[test]
    fn test_rect_count_skips_transparent_pixels() {
        let svg = render_head_svg(&sheet(), 8).unwrap();
        // 64 face rects + exactly one hat rect; nothing for alpha-0 pixels.
        assert_eq!(svg.matches("<rect").count(), 65);
    }

    #[test]
    fn test_fully_transparent_sheet_emits_no_rects() {
        let svg = render_head_svg(&encode(&RgbaImage::new(64, 64)), 8).unwrap();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_viewport_is_eight_times_pixel_width() {
        let svg = render_head_svg(&sheet(), 10).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 80 80""#));
    }

    #[test]
    fn test_translucent_fill_is_fractional_rgba() {
        let svg = render_head_svg(&sheet(), 8).unwrap();
        assert!(svg.contains("rgba(10,20,30,0.502)"));
        assert!(svg.contains("rgba(0,128,0,1)"));
    }

    #[test]
    fn test_hat_pixel_lands_at_full_scale_position() {
        // Hat pixel (1,1) of the 8x8 grid -> rect at (W, W) with size W.
        let svg = render_head_svg(&sheet(), 8).unwrap();
        assert!(svg.contains(r#"<rect x="8" y="8" width="8" height="8" fill="rgba(10,20,30,0.502)"/>"#));
    }

    #[test]
    fn test_face_pass_is_inset_and_scaled() {
        // Face pixel (0,0) -> rect at W/2 with size (W+1)*7/8.
        let svg = render_head_svg(&sheet(), 8).unwrap();
        assert!(svg.contains(r#"<rect x="4" y="4" width="7.875" height="7.875""#));
    }
}
