//! Photo library snapshots.
//!
//! A snapshot is a JSON export of the library's people, faces and photos.
//! Loading one resolves every photo reference and turns the library's
//! "unknown person" name into [`PersonName::Unidentified`].

use faceaudit_core::{
    FaceId, FaceRecord, NormalizedPoint, PersonId, PersonName, PersonRecord, PhotoId, PhotoRef,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name the library gives to people nobody has identified yet.
pub const UNKNOWN_PERSON_NAME: &str = "_UNKNOWN_";

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("failed to read library snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed library snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("person {person} references unknown photo {photo}")]
    UnknownPhoto { person: PersonId, photo: PhotoId },
}

/// Source of person snapshots.
///
/// Implementations return a fresh snapshot on every call; nothing may be
/// cached across calls because the library re-tags faces in the background.
pub trait LibraryProvider {
    fn persons(&self) -> Result<Vec<PersonRecord>, LibraryError>;
}

/// Library provider backed by a JSON snapshot file on disk.
pub struct SnapshotLibrary {
    path: PathBuf,
}

impl SnapshotLibrary {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryProvider for SnapshotLibrary {
    fn persons(&self) -> Result<Vec<PersonRecord>, LibraryError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| LibraryError::Read {
            path: self.path.clone(),
            source,
        })?;
        let persons = parse_snapshot(&raw)?;
        tracing::info!(
            path = %self.path.display(),
            persons = persons.len(),
            "loaded library snapshot"
        );
        Ok(persons)
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    photos: Vec<RawPhoto>,
    #[serde(default)]
    persons: Vec<RawPerson>,
}

#[derive(Debug, Deserialize)]
struct RawPhoto {
    id: PhotoId,
    path: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawPerson {
    id: PersonId,
    name: String,
    facecount: Option<u32>,
    keyface: Option<FaceId>,
    keyphoto: Option<PhotoId>,
    #[serde(default)]
    faces: Vec<RawFace>,
}

#[derive(Debug, Deserialize)]
struct RawFace {
    id: FaceId,
    photo: PhotoId,
    center: [f64; 2],
    size: f64,
    quality: f64,
}

/// Parse a snapshot document into person records.
pub fn parse_snapshot(raw: &str) -> Result<Vec<PersonRecord>, LibraryError> {
    let snapshot: RawSnapshot = serde_json::from_str(raw)?;

    let photos: HashMap<PhotoId, PhotoRef> = snapshot
        .photos
        .into_iter()
        .map(|p| {
            let photo = PhotoRef {
                id: p.id.clone(),
                path: p.path,
                width: p.width,
                height: p.height,
            };
            (p.id, photo)
        })
        .collect();

    snapshot
        .persons
        .into_iter()
        .map(|raw| convert_person(raw, &photos))
        .collect()
}

fn convert_person(
    raw: RawPerson,
    photos: &HashMap<PhotoId, PhotoRef>,
) -> Result<PersonRecord, LibraryError> {
    let lookup = |photo: &PhotoId| {
        photos.get(photo).cloned().ok_or_else(|| LibraryError::UnknownPhoto {
            person: raw.id.clone(),
            photo: photo.clone(),
        })
    };

    let faces = raw
        .faces
        .iter()
        .map(|f| {
            Ok(FaceRecord {
                id: f.id.clone(),
                photo: lookup(&f.photo)?,
                center: NormalizedPoint {
                    x: f.center[0],
                    y: f.center[1],
                },
                size: f.size,
                quality: f.quality,
            })
        })
        .collect::<Result<Vec<_>, LibraryError>>()?;

    let key_photo = raw.keyphoto.as_ref().map(lookup).transpose()?;

    let name = if raw.name == UNKNOWN_PERSON_NAME {
        PersonName::Unidentified
    } else {
        PersonName::Identified { name: raw.name }
    };

    let face_count = raw.facecount.unwrap_or_else(|| count_faces(faces.len()));

    Ok(PersonRecord {
        id: raw.id,
        name,
        face_count,
        key_face: raw.keyface,
        key_photo,
        faces,
    })
}

/// Face list length as a face count, saturating at `u32::MAX`.
fn count_faces(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
