//! Integration test: file lists and directory discovery.

use std::fs;
use std::path::Path;

use crest_io::{DiscoverConfig, IoError, discover, read_file_list, render_file_list};

fn touch(path: &Path) {
    fs::write(path, "{}").expect("write file");
}

#[test]
fn discover_filters_and_sorts() {
    let dir = tempfile::tempdir().expect("create temp dir");
    touch(&dir.path().join("b_6h.prf"));
    touch(&dir.path().join("a_1h.res11"));
    touch(&dir.path().join("a_1hHDADD.res11"));
    touch(&dir.path().join("~$a_1h.prf"));
    touch(&dir.path().join("notes.txt"));

    let found = discover(dir.path(), &DiscoverConfig::default()).expect("scan");
    let names: Vec<String> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_1h.res11", "b_6h.prf"]);
}

#[test]
fn discover_recursion_is_opt_in() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let sub = dir.path().join("storm_24h");
    fs::create_dir(&sub).expect("mkdir");
    touch(&dir.path().join("top.prf"));
    touch(&sub.join("nested.prf"));

    let flat = discover(dir.path(), &DiscoverConfig::default()).expect("scan");
    assert_eq!(flat.len(), 1);

    let deep = discover(dir.path(), &DiscoverConfig::default().with_recursive(true))
        .expect("scan");
    assert_eq!(deep.len(), 2);
    assert!(deep.iter().any(|p| p.ends_with("storm_24h/nested.prf")));
}

#[test]
fn discover_single_file_passthrough() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("any_name.dat");
    touch(&path);

    let found = discover(&path, &DiscoverConfig::default()).expect("scan");
    assert_eq!(found, vec![path]);
}

#[test]
fn discover_missing_directory() {
    let err = discover(
        Path::new("/tmp/crest_test_no_such_dir"),
        &DiscoverConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, IoError::DirectoryNotFound { .. }));
}

#[test]
fn file_list_round_trip_through_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let a = dir.path().join("a.prf");
    let b = dir.path().join("b.res11");
    let list = dir.path().join("inputs.txt");
    fs::write(&list, render_file_list(&[a.clone(), b.clone()])).expect("write list");

    let files = read_file_list(&list).expect("read list");
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path(), a.as_path());
    assert_eq!(files[1].path(), b.as_path());
    assert!(files.iter().all(|f| f.critical_duration().is_none()));
}

#[test]
fn file_list_with_labels() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let list = dir.path().join("inputs.txt");
    fs::write(&list, "/r/m_1h.prf 1h\n/r/m_2h.prf 2h\n").expect("write list");

    let files = read_file_list(&list).expect("read list");
    assert_eq!(files[0].critical_duration(), Some("1h"));
    assert_eq!(files[1].file_name(), "m_2h.prf");
}

#[test]
fn missing_file_list() {
    let err = read_file_list(Path::new("/tmp/crest_test_missing_list.txt")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}
