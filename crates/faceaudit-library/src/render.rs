//! Face marker rendering onto decoded photos.

use crate::decode::{decode_photo, DecodeError};
use faceaudit_core::{compute_overlay, FaceRecord, OverlayError, OverlayGeometry, PhotoRef};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

const MARKER_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);
const MARKER_STROKE_PX: u32 = 20;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("overlay error: {0}")]
    Overlay(#[from] OverlayError),
}

/// Appearance of the face marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: Rgba<u8>,
    /// Ring thickness in source image pixels.
    pub stroke_width: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: MARKER_COLOR,
            stroke_width: MARKER_STROKE_PX,
        }
    }
}

/// Draw `geom` as a ring centred on the marker radius.
///
/// Parts of the ring that fall outside the image are dropped.
pub fn draw_marker(img: &mut RgbaImage, geom: &OverlayGeometry, style: &MarkerStyle) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let half = style.stroke_width.max(1) as f64 / 2.0;
    let reach = half.ceil() as i64;
    let bounds = geom.bounds();

    let x0 = bounds.left.saturating_sub(reach).max(0);
    let y0 = bounds.top.saturating_sub(reach).max(0);
    let x1 = bounds.right.saturating_add(reach).min(width as i64 - 1);
    let y1 = bounds.bottom.saturating_add(reach).min(height as i64 - 1);

    let radius = geom.radius as f64;
    for y in y0..=y1 {
        let dy = (y - geom.center.y) as f64;
        for x in x0..=x1 {
            let dx = (x - geom.center.x) as f64;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - radius).abs() <= half {
                img.put_pixel(x as u32, y as u32, style.color);
            }
        }
    }
}

/// Mark `face` on an already decoded copy of its photo.
///
/// Geometry is computed against the decoded raster, not the dimensions the
/// library recorded.
pub fn mark_face(
    img: DynamicImage,
    face: &FaceRecord,
    style: &MarkerStyle,
) -> Result<RgbaImage, RenderError> {
    let mut canvas = img.into_rgba8();
    let (width, height) = canvas.dimensions();
    let geom = compute_overlay(face, i64::from(width), i64::from(height))?;
    draw_marker(&mut canvas, &geom, style);
    Ok(canvas)
}

/// Decode `photo`, mark `face` on it and fit the result into a
/// `max_side`×`max_side` box (aspect ratio kept). A `max_side` of zero
/// keeps the full resolution.
pub fn render_face_preview(
    photo: &PhotoRef,
    face: &FaceRecord,
    style: &MarkerStyle,
    max_side: u32,
) -> Result<RgbaImage, RenderError> {
    let marked = mark_face(decode_photo(photo)?, face, style)?;
    if max_side == 0 {
        return Ok(marked);
    }
    Ok(DynamicImage::ImageRgba8(marked)
        .resize(max_side, max_side, FilterType::Triangle)
        .into_rgba8())
}
