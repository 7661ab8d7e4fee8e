//! Review tiles: ranked candidates paired with their representative face.

use crate::selector::{resolve_key_face, select_review_candidates, KeyFaceError};
use crate::types::{FaceQuality, FaceRecord, PersonRecord};

/// One entry of the review grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewTile<'a> {
    pub person: &'a PersonRecord,
    /// The person's key face, or why it could not be found. A broken tile
    /// does not affect its neighbours.
    pub key_face: Result<&'a FaceRecord, KeyFaceError>,
    pub quality: FaceQuality,
}

impl ReviewTile<'_> {
    /// True when the tile has a key face with a real quality score.
    pub fn is_renderable(&self) -> bool {
        self.key_face.is_ok() && self.quality == FaceQuality::Scored
    }
}

/// Rank the review candidates and resolve each one's key face.
pub fn review_tiles(persons: &[PersonRecord], limit: usize) -> Vec<ReviewTile<'_>> {
    select_review_candidates(persons, limit)
        .into_iter()
        .map(|person| ReviewTile {
            person,
            key_face: resolve_key_face(person),
            quality: person.face_quality(),
        })
        .collect()
}
