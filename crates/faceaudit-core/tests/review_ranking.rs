//! Ranking a mixed library down to the review grid and marking key faces.

use faceaudit_core::{
    compute_overlay, resolve_key_face, select_review_candidates, FaceRecord, NormalizedPoint,
    PersonName, PersonRecord, PhotoRef, PixelPoint,
};
use std::path::PathBuf;

fn photo(id: &str) -> PhotoRef {
    PhotoRef {
        id: id.into(),
        path: PathBuf::from(format!("/library/{id}.heic")),
        width: Some(4032),
        height: Some(3024),
    }
}

fn person(id: &str, face_count: u32) -> PersonRecord {
    let key_photo = photo(&format!("{id}-photo"));
    PersonRecord {
        id: id.into(),
        name: PersonName::Unidentified,
        face_count,
        key_face: Some("K".into()),
        key_photo: Some(key_photo.clone()),
        faces: vec![FaceRecord {
            id: "K".into(),
            photo: key_photo,
            center: NormalizedPoint { x: 0.5, y: 0.25 },
            size: 0.05,
            quality: 0.6,
        }],
    }
}

fn library() -> Vec<PersonRecord> {
    let mut persons = Vec::new();

    persons.push(person("e3", 3));

    let mut named = person("named-big", 40);
    named.name = PersonName::Identified { name: "Mia".into() };
    persons.push(named);

    persons.push(person("e7", 7));

    let mut no_key_face = person("no-key-face", 30);
    no_key_face.key_face = None;
    persons.push(no_key_face);

    let mut no_key_photo = person("no-key-photo", 25);
    no_key_photo.key_photo = None;
    persons.push(no_key_photo);

    persons.push(person("e2", 2));

    let mut neither = person("no-keys", 20);
    neither.key_face = None;
    neither.key_photo = None;
    persons.push(neither);

    persons.push(person("e9", 9));

    let mut named_small = person("named-small", 1);
    named_small.name = PersonName::Identified { name: "Theo".into() };
    persons.push(named_small);

    persons.push(person("e1", 1));

    persons.push(person("no-faces", 0));

    let mut named_no_keys = person("named-no-keys", 12);
    named_no_keys.name = PersonName::Identified { name: "Ada".into() };
    named_no_keys.key_face = None;
    persons.push(named_no_keys);

    persons
}

#[test]
fn test_top_three_of_mixed_library() {
    let persons = library();
    assert_eq!(persons.len(), 12);
    assert_eq!(persons.iter().filter(|p| p.is_review_eligible()).count(), 5);

    let selected = select_review_candidates(&persons, 3);
    let counts: Vec<u32> = selected.iter().map(|p| p.face_count).collect();
    assert_eq!(counts, vec![9, 7, 3]);

    let ids: Vec<&str> = selected.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["e9", "e7", "e3"]);
}

#[test]
fn test_selection_is_deterministic() {
    let persons = library();
    let first = select_review_candidates(&persons, 9);
    let second = select_review_candidates(&persons, 9);
    assert_eq!(first, second);
    assert_eq!(first.len(), 5);
}

#[test]
fn test_key_faces_marked_on_key_photos() {
    let persons = library();
    for candidate in select_review_candidates(&persons, 9) {
        let key = resolve_key_face(candidate).unwrap();
        let (w, h) = candidate.key_photo.as_ref().unwrap().dimensions().unwrap();
        let geom = compute_overlay(key, i64::from(w), i64::from(h)).unwrap();
        assert_eq!(geom.center, PixelPoint { x: 2016, y: 756 });
        assert_eq!(geom.radius, 202);
    }
}
