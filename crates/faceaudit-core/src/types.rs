use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Quality score the library assigns to faces it never scored.
pub const UNSCORED_QUALITY: f64 = -1.0;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

record_id!(
    /// Stable library identifier of a person.
    PersonId
);
record_id!(
    /// Face identifier. Only unique within the owning person's face list.
    FaceId
);
record_id!(
    /// Library identifier of a photo.
    PhotoId
);

/// Whether a human has put a name on a person yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonName {
    Identified { name: String },
    Unidentified,
}

impl PersonName {
    pub fn is_unidentified(&self) -> bool {
        matches!(self, PersonName::Unidentified)
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonName::Identified { name } => f.write_str(name),
            PersonName::Unidentified => f.write_str("(unidentified)"),
        }
    }
}

/// Reference to a photo in the library.
///
/// Pixel dimensions are optional; when absent they have to be read from
/// the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: PhotoId,
    pub path: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl PhotoRef {
    /// Pixel dimensions, if the library recorded both.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Normalized face position; both coordinates are fractions of the image
/// width and height respectively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

/// A single face detection belonging to a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub id: FaceId,
    pub photo: PhotoRef,
    pub center: NormalizedPoint,
    /// Face extent as a fraction of the image width.
    pub size: f64,
    /// Quality score in [-1, 1]. See [`UNSCORED_QUALITY`].
    pub quality: f64,
}

impl FaceRecord {
    pub fn is_unscored(&self) -> bool {
        self.quality == UNSCORED_QUALITY
    }
}

/// Aggregate quality state of a person's faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceQuality {
    /// At least one face carries a real quality score.
    Scored,
    /// Every face is at [`UNSCORED_QUALITY`] (or there are no faces). Such
    /// faces may have no usable geometry, so callers should not assume an
    /// overlay will land on anything.
    Unscored,
}

/// Snapshot of a person as recorded by the photo library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: PersonName,
    pub face_count: u32,
    pub key_face: Option<FaceId>,
    pub key_photo: Option<PhotoRef>,
    pub faces: Vec<FaceRecord>,
}

impl PersonRecord {
    /// True if the person can be offered for review: unidentified, has
    /// faces, and carries both key references.
    pub fn is_review_eligible(&self) -> bool {
        self.face_count > 0
            && self.name.is_unidentified()
            && self.key_face.is_some()
            && self.key_photo.is_some()
    }

    pub fn face_quality(&self) -> FaceQuality {
        if self.faces.iter().all(FaceRecord::is_unscored) {
            FaceQuality::Unscored
        } else {
            FaceQuality::Scored
        }
    }

    /// The first `limit` faces in library order.
    pub fn preview_faces(&self, limit: usize) -> impl Iterator<Item = &FaceRecord> {
        self.faces.iter().take(limit)
    }
}
