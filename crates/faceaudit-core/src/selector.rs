//! Review candidate ranking and key face resolution.

use crate::types::{FaceId, FaceRecord, PersonId, PersonRecord};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyFaceError {
    #[error("person {person} declares key face {key_face} but has no face with that id")]
    KeyFaceNotFound { person: PersonId, key_face: FaceId },
    #[error("person {0} has no key face")]
    NoKeyFace(PersonId),
}

/// Pick the unidentified people most worth reviewing.
///
/// Keeps only review-eligible persons, orders them by face count (highest
/// first, ties in input order) and returns at most `limit` of them.
pub fn select_review_candidates(persons: &[PersonRecord], limit: usize) -> Vec<&PersonRecord> {
    let mut candidates: Vec<&PersonRecord> = persons
        .iter()
        .filter(|p| p.is_review_eligible())
        .collect();

    // sort_by is stable
    candidates.sort_by(|a, b| b.face_count.cmp(&a.face_count));
    candidates.truncate(limit);
    candidates
}

/// Find the face the library chose to represent `person`.
///
/// The lookup is scoped to the person's own faces; face ids are not
/// assumed to be unique across people.
pub fn resolve_key_face(person: &PersonRecord) -> Result<&FaceRecord, KeyFaceError> {
    let key_face = person
        .key_face
        .as_ref()
        .ok_or_else(|| KeyFaceError::NoKeyFace(person.id.clone()))?;

    person
        .faces
        .iter()
        .find(|f| &f.id == key_face)
        .ok_or_else(|| KeyFaceError::KeyFaceNotFound {
            person: person.id.clone(),
            key_face: key_face.clone(),
        })
}
