//! Photo decoding via the `image` crate.

use faceaudit_core::PhotoRef;
use image::DynamicImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("photo not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Pixel dimensions of a photo.
///
/// Uses the dimensions recorded by the library when both are present,
/// otherwise reads them from the image header.
pub fn photo_dimensions(photo: &PhotoRef) -> Result<(u32, u32), DecodeError> {
    if let Some(dims) = photo.dimensions() {
        return Ok(dims);
    }
    ensure_exists(photo)?;
    let dims = image::image_dimensions(&photo.path).map_err(|source| DecodeError::Image {
        path: photo.path.clone(),
        source,
    })?;
    tracing::debug!(photo = %photo.id, width = dims.0, height = dims.1, "read photo dimensions");
    Ok(dims)
}

/// Decode the full raster of a photo.
pub fn decode_photo(photo: &PhotoRef) -> Result<DynamicImage, DecodeError> {
    ensure_exists(photo)?;
    let img = image::open(&photo.path).map_err(|source| DecodeError::Image {
        path: photo.path.clone(),
        source,
    })?;
    tracing::debug!(
        photo = %photo.id,
        width = img.width(),
        height = img.height(),
        "decoded photo"
    );
    Ok(img)
}

fn ensure_exists(photo: &PhotoRef) -> Result<(), DecodeError> {
    if photo.path.exists() {
        Ok(())
    } else {
        Err(DecodeError::NotFound(photo.path.clone()))
    }
}
