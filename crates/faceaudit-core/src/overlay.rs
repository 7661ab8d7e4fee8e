//! Face overlay geometry.
//!
//! Converts a face's normalized center and size into the pixel space of its
//! source photo, producing the circle used to mark the face when the photo
//! is rendered.

use crate::types::FaceRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MIN_RADIUS_PX: i64 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidImageDimensions { width: i64, height: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Inclusive pixel rectangle. May extend past the image edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

/// Face marker in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverlayGeometry {
    pub center: PixelPoint,
    pub radius: i64,
}

impl OverlayGeometry {
    /// Bounding box of the marker circle, not clipped to the image.
    /// Edges saturate at the `i64` range.
    pub fn bounds(&self) -> PixelRect {
        PixelRect {
            left: self.center.x.saturating_sub(self.radius),
            top: self.center.y.saturating_sub(self.radius),
            right: self.center.x.saturating_add(self.radius),
            bottom: self.center.y.saturating_add(self.radius),
        }
    }
}

/// Pixels per normalized unit of face size, for both marker axes.
///
/// Face size is relative to image width, and the same horizontal factor is
/// used for the vertical axis too, so markers on non-square photos are
/// circles rather than ellipses matched to the aspect ratio.
pub fn marker_scale(image_width: i64, _image_height: i64) -> f64 {
    image_width as f64
}

/// Compute the marker for `face` on an image of the given pixel size.
///
/// The face's quality score is not consulted.
pub fn compute_overlay(
    face: &FaceRecord,
    image_width: i64,
    image_height: i64,
) -> Result<OverlayGeometry, OverlayError> {
    if image_width <= 0 || image_height <= 0 {
        return Err(OverlayError::InvalidImageDimensions {
            width: image_width,
            height: image_height,
        });
    }

    let center = PixelPoint {
        x: scale_to_pixel(face.center.x, image_width),
        y: scale_to_pixel(face.center.y, image_height),
    };

    let radius = ((face.size * marker_scale(image_width, image_height)).round() as i64)
        .max(MIN_RADIUS_PX);

    Ok(OverlayGeometry { center, radius })
}

/// Map a normalized coordinate onto `[0, extent - 1]`.
///
/// `as` saturates and maps NaN to 0, so non-finite input clamps like any
/// other out-of-range value.
fn scale_to_pixel(normalized: f64, extent: i64) -> i64 {
    ((normalized * extent as f64).round() as i64).clamp(0, extent - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NormalizedPoint, PhotoRef};
    use std::path::PathBuf;

    fn face(x: f64, y: f64, size: f64, quality: f64) -> FaceRecord {
        FaceRecord {
            id: "F1".into(),
            photo: PhotoRef {
                id: "P1".into(),
                path: PathBuf::from("/photos/P1.jpg"),
                width: Some(1000),
                height: Some(500),
            },
            center: NormalizedPoint { x, y },
            size,
            quality,
        }
    }

    #[test]
    fn test_origin_with_zero_size_clamps_radius() {
        let geom = compute_overlay(&face(0.0, 0.0, 0.0, 0.5), 1000, 500).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 0, y: 0 });
        assert_eq!(geom.radius, 1);
    }

    #[test]
    fn test_far_corner_clamps_to_last_pixel() {
        let geom = compute_overlay(&face(1.0, 1.0, 0.5, 0.5), 1000, 500).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 999, y: 499 });
        assert_eq!(geom.radius, 500);
    }

    #[test]
    fn test_center_uses_per_axis_extent() {
        let geom = compute_overlay(&face(0.25, 0.5, 0.1, 0.5), 1000, 500).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 250, y: 250 });
        assert_eq!(geom.radius, 100);
    }

    #[test]
    fn test_radius_uses_width_scale_on_tall_image() {
        let geom = compute_overlay(&face(0.5, 0.5, 0.1, 0.5), 300, 3000).unwrap();
        assert_eq!(geom.radius, 30);
        assert_eq!(marker_scale(300, 3000), 300.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 0.5 * 5 = 2.5 exactly
        let geom = compute_overlay(&face(0.5, 0.5, 0.5, 0.0), 5, 5).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 3, y: 3 });
        assert_eq!(geom.radius, 3);
    }

    #[test]
    fn test_out_of_range_center_clamps() {
        let geom = compute_overlay(&face(-0.5, 1.7, 0.01, 0.0), 640, 480).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 0, y: 479 });
    }

    #[test]
    fn test_nan_center_clamps_to_origin() {
        let geom = compute_overlay(&face(f64::NAN, f64::NAN, f64::NAN, 0.0), 640, 480).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 0, y: 0 });
        assert_eq!(geom.radius, 1);
    }

    #[test]
    fn test_unscored_face_still_computes() {
        let geom = compute_overlay(&face(0.5, 0.5, 0.2, -1.0), 100, 100).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 50, y: 50 });
        assert_eq!(geom.radius, 20);
    }

    #[test]
    fn test_single_pixel_image() {
        let geom = compute_overlay(&face(0.9, 0.9, 0.9, 0.0), 1, 1).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 0, y: 0 });
        assert_eq!(geom.radius, 1);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = compute_overlay(&face(0.5, 0.5, 0.1, 0.0), 0, 500).unwrap_err();
        assert_eq!(
            err,
            OverlayError::InvalidImageDimensions { width: 0, height: 500 }
        );
    }

    #[test]
    fn test_negative_height_rejected() {
        let err = compute_overlay(&face(0.5, 0.5, 0.1, 0.0), 1000, -1).unwrap_err();
        assert_eq!(
            err,
            OverlayError::InvalidImageDimensions { width: 1000, height: -1 }
        );
    }

    #[test]
    fn test_same_input_same_geometry() {
        let f = face(0.3, 0.6, 0.07, 0.2);
        assert_eq!(
            compute_overlay(&f, 4032, 3024).unwrap(),
            compute_overlay(&f, 4032, 3024).unwrap()
        );
    }

    #[test]
    fn test_huge_size_saturates_radius_and_bounds() {
        let geom = compute_overlay(&face(0.5, 0.5, 1e300, 0.0), 10, 10).unwrap();
        assert_eq!(geom.radius, i64::MAX);
        assert_eq!(
            geom.bounds(),
            PixelRect {
                left: 5 - i64::MAX,
                top: 5 - i64::MAX,
                right: i64::MAX,
                bottom: i64::MAX,
            }
        );
    }

    #[test]
    fn test_bounds_extend_past_edges() {
        let geom = OverlayGeometry {
            center: PixelPoint { x: 5, y: 10 },
            radius: 20,
        };
        assert_eq!(
            geom.bounds(),
            PixelRect { left: -15, top: -10, right: 25, bottom: 30 }
        );
    }
}
