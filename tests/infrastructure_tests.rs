//! Infrastructure layer tests
//!
//! Tests for image sources and the directory-backed artifact store.

use rstest::*;
use sigcarve::domain::repositories::{ArtifactStore, ImageReadError, ImageSource, StoreError};
use sigcarve::infrastructure::image_source::{LoadedImage, MappedImage};
use sigcarve::infrastructure::persistence::LocalArtifactStore;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

// ============================================================================
// Image source Tests
// ============================================================================

#[fixture]
fn temp_image() -> (TempDir, std::path::PathBuf, Vec<u8>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("card.img");
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let mut file = fs::File::create(&path).unwrap();
    file.write_all(&data).unwrap();
    file.sync_all().unwrap();

    (dir, path, data)
}

#[rstest]
fn test_loaded_image_reads_everything(temp_image: (TempDir, std::path::PathBuf, Vec<u8>)) {
    let (_dir, path, data) = temp_image;
    let image = LoadedImage::open(&path, 1 << 20).unwrap();
    assert_eq!(image.bytes(), data.as_slice());
    assert_eq!(image.len(), 4096);
    assert_eq!(image.path(), path.as_path());
}

#[rstest]
fn test_mapped_image_matches_file(temp_image: (TempDir, std::path::PathBuf, Vec<u8>)) {
    let (_dir, path, data) = temp_image;
    let image = MappedImage::open(&path, 1 << 20).unwrap();
    assert_eq!(image.bytes(), data.as_slice());
}

#[rstest]
fn test_image_over_limit_is_rejected(temp_image: (TempDir, std::path::PathBuf, Vec<u8>)) {
    let (_dir, path, _) = temp_image;
    assert!(matches!(
        LoadedImage::open(&path, 4095),
        Err(ImageReadError::TooLarge { size: 4096, limit: 4095 })
    ));
    assert!(matches!(
        MappedImage::open(&path, 100),
        Err(ImageReadError::TooLarge { .. })
    ));
}

#[rstest]
fn test_missing_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.img");
    assert!(matches!(LoadedImage::open(&path, 1024), Err(ImageReadError::NotFound(_))));
    assert!(matches!(MappedImage::open(&path, 1024), Err(ImageReadError::NotFound(_))));
}

#[rstest]
fn test_empty_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.img");
    fs::File::create(&path).unwrap();

    assert!(LoadedImage::open(&path, 1024).unwrap().is_empty());
    assert!(MappedImage::open(&path, 1024).unwrap().is_empty());
}

// ============================================================================
// LocalArtifactStore Tests
// ============================================================================

#[fixture]
fn store() -> (TempDir, LocalArtifactStore) {
    let dir = TempDir::new().unwrap();
    let store = LocalArtifactStore::new(&dir.path().join("recovered")).unwrap();
    (dir, store)
}

#[rstest]
fn test_creates_output_dir(store: (TempDir, LocalArtifactStore)) {
    let (_dir, store) = store;
    assert!(store.output_dir().is_dir());
}

#[rstest]
fn test_write_read_roundtrip(store: (TempDir, LocalArtifactStore)) {
    let (_dir, store) = store;
    store.write("recovered_1.jpg", &[0xFF, 0xD8, 0xFF, 0xD9]).unwrap();

    assert_eq!(store.read("recovered_1.jpg").unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
}

#[rstest]
fn test_list_is_sorted_with_types(store: (TempDir, LocalArtifactStore)) {
    let (_dir, store) = store;
    store.write("recovered_2.pdf", b"%PDF%%EOF").unwrap();
    store.write("recovered_1.jpg", b"jpg").unwrap();
    fs::create_dir(store.output_dir().join("subdir")).unwrap();

    let entries = store.list().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "recovered_1.jpg");
    assert_eq!(entries[0].type_tag, "jpg");
    assert_eq!(entries[1].size, 9);
}

#[rstest]
#[case("../escape.jpg")]
#[case("a/b.jpg")]
#[case("")]
#[case("..")]
#[case(".hidden")]
fn test_rejects_unsafe_names(store: (TempDir, LocalArtifactStore), #[case] name: &str) {
    let (_dir, store) = store;
    assert!(matches!(store.write(name, b"x"), Err(StoreError::InvalidName(_))));
}

#[rstest]
fn test_delete_and_clear(store: (TempDir, LocalArtifactStore)) {
    let (_dir, store) = store;
    store.write("a.zip", b"1").unwrap();
    store.write("b.zip", b"2").unwrap();
    store.write("c.zip", b"3").unwrap();

    store.delete("a.zip").unwrap();
    assert!(matches!(store.read("a.zip"), Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete("a.zip"), Err(StoreError::NotFound(_))));

    assert_eq!(store.clear().unwrap(), 2);
    assert!(store.list().unwrap().is_empty());
}

#[rstest]
fn test_failed_write_leaves_nothing_behind(store: (TempDir, LocalArtifactStore)) {
    let (_dir, store) = store;
    // a directory squatting on the name makes the final rename fail
    fs::create_dir(store.output_dir().join("recovered_1.jpg")).unwrap();

    assert!(store.write("recovered_1.jpg", &[0xFF, 0xD8, 0xFF, 0xD9]).is_err());

    assert!(store.list().unwrap().is_empty());
    let leftovers: Vec<_> = fs::read_dir(store.output_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("recovered_1.jpg")]);
}

#[rstest]
fn test_overwrite_replaces_content(store: (TempDir, LocalArtifactStore)) {
    let (_dir, store) = store;
    store.write("recovered_1.zip", b"first version").unwrap();
    store.write("recovered_1.zip", b"second").unwrap();

    assert_eq!(store.read("recovered_1.zip").unwrap(), b"second");
    assert_eq!(store.list().unwrap().len(), 1);
}
