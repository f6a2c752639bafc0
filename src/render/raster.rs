//! Rasterization of a committed crop
//!
//! Takes the validated natural-space rectangle, cuts it out of the source
//! bitmap, optionally resamples to the requested output size, optionally
//! clips to a centered circle, and encodes the result.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use tiny_skia::{BlendMode, Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::config::{CropConfig, OutputFormat};
use crate::domain::PixelRect;
use crate::error::{GeometryError, RasterError};

/// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
const BEZIER_K: f32 = 0.552_284_8;

/// Settings for one rasterization
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Output size in pixels; `None` keeps the crop rectangle's size
    pub output_size: Option<(u32, u32)>,
    pub format: OutputFormat,
    /// Encoding quality for lossy formats, 0.0–1.0
    pub quality: f32,
    /// Clip to a centered inscribed circle (avatar output)
    pub circular_mask: bool,
}

impl RasterOptions {
    pub fn from_config(config: &CropConfig) -> Self {
        Self {
            output_size: config.output_size(),
            format: config.format,
            quality: config.quality,
            circular_mask: config.circular_mask,
        }
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self::from_config(&CropConfig::default())
    }
}

/// Encoded crop, ready for upload.
///
/// The bytes stay here even after a failed upload so the caller can retry
/// without redoing the crop.
#[derive(Debug, Clone)]
pub struct CropOutput {
    pub bytes: Vec<u8>,
    /// The natural-space rectangle that was rasterized
    pub crop: PixelRect,
    pub output_size: (u32, u32),
    pub format: OutputFormat,
}

/// Rasterize `crop` out of `source` and encode it.
///
/// The crop must lie inside the source and have non-zero area; resampling
/// uses Lanczos3 and only runs when the output size differs from the crop
/// size.
pub fn rasterize(
    source: &DynamicImage,
    crop: PixelRect,
    options: &RasterOptions,
) -> Result<CropOutput, RasterError> {
    let crop = crop.validated(source.width(), source.height())?;

    let (out_width, out_height) = options.output_size.unwrap_or((crop.width, crop.height));
    if out_width == 0 || out_height == 0 {
        return Err(GeometryError::EmptyCrop.into());
    }

    let mut region = source.crop_imm(crop.x, crop.y, crop.width, crop.height);
    if (out_width, out_height) != (crop.width, crop.height) {
        region = region.resize_exact(out_width, out_height, FilterType::Lanczos3);
    }

    let mut rgba = region.to_rgba8();
    if options.circular_mask {
        apply_circular_mask(&mut rgba);
    }

    let mut bytes = Vec::new();
    match options.format {
        OutputFormat::Jpeg => {
            // JPEG carries no alpha; flatten the mask edge onto white
            let rgb = flattened_onto_white(&rgba);
            let quality = (options.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
            rgb.write_with_encoder(encoder)?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut bytes);
            rgba.write_with_encoder(encoder)?;
        }
    }

    log::debug!(
        "rasterized {}x{} crop to {}x{} {:?} ({} bytes)",
        crop.width,
        crop.height,
        out_width,
        out_height,
        options.format,
        bytes.len()
    );

    Ok(CropOutput {
        bytes,
        crop,
        output_size: (out_width, out_height),
        format: options.format,
    })
}

/// Build an ellipse path using cubic bezier curves
fn build_ellipse_path(cx: f32, cy: f32, rx: f32, ry: f32) -> Option<tiny_skia::Path> {
    let kx = rx * BEZIER_K;
    let ky = ry * BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy - ry);
    pb.cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
    pb.cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
    pb.cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
    pb.cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
    pb.close();
    pb.finish()
}

/// Zero out everything outside the centered inscribed ellipse.
///
/// Fills the ellipse with destination-in blending so only covered pixels
/// keep their alpha; the antialiased rim comes from tiny-skia.
fn apply_circular_mask(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
        return;
    };
    let Some(mut pixmap) = Pixmap::from_vec(img.as_raw().clone(), size) else {
        return;
    };
    let Some(path) =
        build_ellipse_path(w as f32 / 2.0, h as f32 / 2.0, w as f32 / 2.0, h as f32 / 2.0)
    else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    paint.anti_alias = true;
    paint.blend_mode = BlendMode::DestinationIn;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

    img.copy_from_slice(pixmap.data());
}

/// Composite onto a white background, dropping the alpha channel
fn flattened_onto_white(img: &RgbaImage) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels() {
        let a = px[3] as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// 64x64 test card: red NW, green NE, blue SW, white SE quadrant
    fn quadrant_image() -> DynamicImage {
        let img = RgbaImage::from_fn(64, 64, |x, y| match (x < 32, y < 32) {
            (true, true) => Rgba([255, 0, 0, 255]),
            (false, true) => Rgba([0, 255, 0, 255]),
            (true, false) => Rgba([0, 0, 255, 255]),
            (false, false) => Rgba([255, 255, 255, 255]),
        });
        DynamicImage::ImageRgba8(img)
    }

    fn png_options() -> RasterOptions {
        RasterOptions {
            output_size: None,
            format: OutputFormat::Png,
            quality: 0.85,
            circular_mask: false,
        }
    }

    #[test]
    fn zero_area_crop_is_rejected() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        let err = rasterize(&src, crop, &png_options()).unwrap_err();
        assert!(matches!(err, RasterError::Geometry(GeometryError::EmptyCrop)));
    }

    #[test]
    fn out_of_bounds_crop_is_rejected() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 48,
            y: 0,
            width: 32,
            height: 16,
        };
        let err = rasterize(&src, crop, &png_options()).unwrap_err();
        assert!(matches!(
            err,
            RasterError::Geometry(GeometryError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn crop_extracts_the_selected_region() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 32,
            y: 0,
            width: 32,
            height: 32,
        };
        let out = rasterize(&src, crop, &png_options()).unwrap();
        assert_eq!(out.output_size, (32, 32));

        let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (32, 32));
        // entirely inside the green quadrant
        assert!(decoded.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn full_frame_png_roundtrip_is_pixel_identical() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };
        let out = rasterize(&src, crop, &png_options()).unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
        assert_eq!(decoded, src.to_rgba8());
    }

    #[test]
    fn output_size_triggers_resampling() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };
        let out = rasterize(
            &src,
            crop,
            &RasterOptions {
                output_size: Some((16, 16)),
                ..png_options()
            },
        )
        .unwrap();
        assert_eq!(out.output_size, (16, 16));
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn zero_output_size_is_rejected() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };
        let err = rasterize(
            &src,
            crop,
            &RasterOptions {
                output_size: Some((0, 16)),
                ..png_options()
            },
        )
        .unwrap_err();
        assert!(matches!(err, RasterError::Geometry(GeometryError::EmptyCrop)));
    }

    #[test]
    fn jpeg_output_decodes_at_the_requested_size() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 64,
            height: 32,
        };
        let out = rasterize(
            &src,
            crop,
            &RasterOptions {
                output_size: None,
                format: OutputFormat::Jpeg,
                quality: 0.9,
                circular_mask: false,
            },
        )
        .unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn circular_mask_clears_corners_keeps_center() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };
        let out = rasterize(
            &src,
            crop,
            &RasterOptions {
                circular_mask: true,
                ..png_options()
            },
        )
        .unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        assert_eq!(decoded.get_pixel(63, 0)[3], 0);
        assert_eq!(decoded.get_pixel(0, 63)[3], 0);
        assert_eq!(decoded.get_pixel(63, 63)[3], 0);
        assert_eq!(decoded.get_pixel(32, 32)[3], 255);
    }

    #[test]
    fn circular_mask_on_jpeg_flattens_to_white_corners() {
        let src = quadrant_image();
        let crop = PixelRect {
            x: 0,
            y: 0,
            width: 64,
            height: 64,
        };
        let out = rasterize(
            &src,
            crop,
            &RasterOptions {
                output_size: None,
                format: OutputFormat::Jpeg,
                quality: 0.95,
                circular_mask: true,
            },
        )
        .unwrap();
        let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
        // corner is outside the circle: white after flattening (JPEG is
        // lossy, allow some wiggle)
        let corner = decoded.get_pixel(1, 1);
        assert!(corner[0] > 220 && corner[1] > 220 && corner[2] > 220);
    }
}
