//! Application layer tests
//!
//! Full recover/list/clear flows over temporary images and directories.

mod common;

use common::*;
use rstest::*;
use sigcarve::application::dto::ScanOptions;
use sigcarve::application::{ArtifactsUseCase, RecoverImageUseCase};
use sigcarve::config::EngineConfig;
use sigcarve::domain::repositories::ArtifactStore;
use sigcarve::infrastructure::persistence::LocalArtifactStore;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_image(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

fn disk_with_files() -> Vec<u8> {
    let mut disk: Vec<u8> = (0..2048u32).map(|i| (i.wrapping_mul(97) % 200) as u8).collect();
    disk.extend_from_slice(&jpg_then_pdf());
    disk.extend(std::iter::repeat_n(0u8, 512));
    disk.extend_from_slice(&concat(&[PNG_HEADER, b"IHDR....", PNG_FOOTER]));
    disk
}

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().unwrap()
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_recover_image_end_to_end(workspace: TempDir, #[case] use_mmap: bool) {
    let disk = disk_with_files();
    let image = write_image(workspace.path(), "disk.img", &disk);
    let output = workspace.path().join("out");

    let use_case = RecoverImageUseCase::new(EngineConfig::default()).unwrap();
    let store = LocalArtifactStore::new(&output).unwrap();
    let report = use_case.execute(&image, store, use_mmap, None).unwrap();

    assert!(report.success);
    assert_eq!(report.total_files, 3);
    let types: Vec<&str> = report.recovered_files.iter().map(|f| f.type_tag.as_str()).collect();
    assert_eq!(types, vec!["jpg", "pdf", "png"]);

    for file in &report.recovered_files {
        let on_disk = fs::read(output.join(&file.assigned_name)).unwrap();
        let start = file.offset as usize;
        assert_eq!(on_disk, &disk[start..start + file.size as usize]);
    }
}

#[rstest]
fn test_report_json_shape(workspace: TempDir) {
    let image = write_image(workspace.path(), "disk.dd", &jpg_then_pdf());
    let use_case = RecoverImageUseCase::new(EngineConfig::default()).unwrap();
    let report = use_case
        .execute(&image, MemoryStore::new(), false, None)
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["total_files"], 2);
    assert_eq!(json["recovered_files"][0]["filename"], "recovered_1.jpg");
    assert_eq!(json["recovered_files"][0]["type"], "jpg");
    assert_eq!(json["recovered_files"][1]["offset"], 15);
    assert_eq!(json["recovered_files"][1]["hash"].as_str().unwrap().len(), 64);
}

#[rstest]
fn test_rejects_disallowed_extension(workspace: TempDir) {
    let image = write_image(workspace.path(), "photo.jpg", &jpg_then_pdf());
    let use_case = RecoverImageUseCase::new(EngineConfig::default()).unwrap();
    let err = use_case
        .execute(&image, MemoryStore::new(), false, None)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid file type 'jpg'"));
}

#[rstest]
fn test_rejects_oversized_image(workspace: TempDir) {
    let image = write_image(workspace.path(), "disk.img", &[0u8; 2048]);
    let config = EngineConfig::default().with_max_image_size(1024);
    let use_case = RecoverImageUseCase::new(config).unwrap();
    assert!(use_case.execute(&image, MemoryStore::new(), false, None).is_err());
}

#[rstest]
fn test_unreadable_image_is_fatal(workspace: TempDir) {
    let image = workspace.path().join("missing.img");
    let use_case = RecoverImageUseCase::new(EngineConfig::default()).unwrap();
    let store = MemoryStore::new();
    let err = use_case.execute(&image, store, false, None).unwrap_err();
    assert!(format!("{:#}", err).contains("Error reading disk image"));
}

#[rstest]
fn test_type_filter(workspace: TempDir) {
    let image = write_image(workspace.path(), "disk.img", &disk_with_files());
    let options = ScanOptions::new(&image).with_types(vec!["png".to_string(), "pdf".to_string()]);
    let use_case = RecoverImageUseCase::from_options(&options).unwrap();

    assert_eq!(use_case.registry().type_tags(), vec!["png", "pdf"]);
    let report = use_case.execute(&image, MemoryStore::new(), false, None).unwrap();
    let types: Vec<&str> = report.recovered_files.iter().map(|f| f.type_tag.as_str()).collect();
    assert_eq!(types, vec!["pdf", "png"]);
}

#[rstest]
fn test_unknown_type_filter_is_rejected() {
    let options = ScanOptions::new("disk.img").with_types(vec!["exe".to_string()]);
    assert!(RecoverImageUseCase::from_options(&options).is_err());
}

#[rstest]
fn test_custom_signature_table(workspace: TempDir) {
    let table = workspace.path().join("table.json");
    fs::write(
        &table,
        r#"[{"type": "gif", "header": "474946383961", "footer": "003B"}]"#,
    )
    .unwrap();
    let image = write_image(workspace.path(), "disk.bin", b"..GIF89a\x01\x02\x00\x3b..");

    let mut options = ScanOptions::new(&image);
    options.signature_table = Some(table);
    let use_case = RecoverImageUseCase::from_options(&options).unwrap();
    let report = use_case.execute(&image, MemoryStore::new(), false, None).unwrap();

    assert_eq!(report.total_files, 1);
    assert_eq!(report.recovered_files[0].assigned_name, "recovered_1.gif");
    assert_eq!(report.recovered_files[0].offset, 2);
    assert_eq!(report.recovered_files[0].size, 10);
}

#[rstest]
fn test_zero_window_is_rejected() {
    let options = ScanOptions::new("disk.img").with_window_size(0);
    assert!(RecoverImageUseCase::from_options(&options).is_err());
}

#[rstest]
fn test_artifacts_list_read_clear(workspace: TempDir) {
    let image = write_image(workspace.path(), "disk.iso", &disk_with_files());
    let output = workspace.path().join("out");

    let use_case = RecoverImageUseCase::new(EngineConfig::default()).unwrap();
    use_case
        .execute(&image, LocalArtifactStore::new(&output).unwrap(), false, None)
        .unwrap();

    let artifacts = ArtifactsUseCase::new(LocalArtifactStore::new(&output).unwrap());
    let entries = artifacts.list().unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["recovered_1.jpg", "recovered_2.pdf", "recovered_3.png"]);

    assert_eq!(artifacts.read("recovered_2.pdf").unwrap(), b"%PDFBBBBB%%EOF");
    assert!(artifacts.read("recovered_9.pdf").is_err());

    assert_eq!(artifacts.clear().unwrap(), 3);
    assert!(LocalArtifactStore::new(&output).unwrap().list().unwrap().is_empty());
}
