//! faceaudit-library — Access to the photo library and its photos.
//!
//! Loads person snapshots, decodes photos, paints face markers, and hands
//! photos off to an external viewer.

pub mod decode;
pub mod render;
pub mod snapshot;
pub mod viewer;

pub use decode::{decode_photo, photo_dimensions, DecodeError};
pub use render::{draw_marker, mark_face, render_face_preview, MarkerStyle, RenderError};
pub use snapshot::{parse_snapshot, LibraryError, LibraryProvider, SnapshotLibrary};
pub use viewer::{ViewerError, ViewerLauncher};
