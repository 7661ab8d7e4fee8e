//! faceaudit-core — Ranking and annotation engine for auditing unidentified
//! people in a photo library.
//!
//! Selects which unidentified people are worth reviewing, resolves the face
//! that represents each of them, and computes where to mark that face on its
//! photo. Everything here is pure computation over library snapshots.

pub mod overlay;
pub mod review;
pub mod selector;
pub mod types;

pub use overlay::{
    compute_overlay, marker_scale, OverlayError, OverlayGeometry, PixelPoint, PixelRect,
};
pub use review::{review_tiles, ReviewTile};
pub use selector::{resolve_key_face, select_review_candidates, KeyFaceError};
pub use types::{
    FaceId, FaceQuality, FaceRecord, NormalizedPoint, PersonId, PersonName, PersonRecord, PhotoId,
    PhotoRef, UNSCORED_QUALITY,
};
