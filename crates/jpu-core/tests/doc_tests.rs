use jpu_core::{
    DocError, backup_file, load_document, parse_document, render_document, update_at,
    write_document,
};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn load_update_write_roundtrip() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("data.json");
    let out = dir.path().join("out.json");
    std::fs::write(&src, r#"{"fruits":[{"name":"Apple"}],"z":0}"#).unwrap();

    let root = load_document(&src).expect("load json");
    let updated = update_at(&root, r#"$["fruits"][0]["name"]"#, json!("Pear"));
    write_document(&out, &updated).unwrap();

    let s = std::fs::read_to_string(&out).unwrap();
    assert!(s.ends_with('\n'));
    assert_eq!(load_document(&out).unwrap(), json!({"fruits": [{"name": "Pear"}], "z": 0}));
    // key order survives the trip through text
    assert!(s.find("\"fruits\"").unwrap() < s.find("\"z\"").unwrap());
}

#[test]
fn decode_failures_are_typed() {
    assert!(matches!(parse_document("  \n"), Err(DocError::Empty)));
    assert!(matches!(parse_document("{\"a\":"), Err(DocError::Json(_))));
    assert_eq!(parse_document("[1, 2]").unwrap(), json!([1, 2]));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("nope.json");
    let err = load_document(&p).unwrap_err();
    assert!(matches!(err, DocError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn render_is_pretty() {
    let s = render_document(&json!({"a": [1]})).unwrap();
    assert_eq!(s, "{\n  \"a\": [\n    1\n  ]\n}\n");
}

#[test]
fn backup_copies_original_bytes() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("data.json");
    std::fs::write(&src, "{\"a\":1}").unwrap();
    let bak = backup_file(&src).unwrap();
    assert!(bak.exists());
    assert_ne!(bak, src);
    let name = bak.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("data_"));
    assert!(name.ends_with(".json.bak"));
    assert_eq!(std::fs::read(&bak).unwrap(), b"{\"a\":1}");
}

#[test]
fn backup_rejects_directories() {
    let dir = tempdir().unwrap();
    assert!(matches!(backup_file(dir.path()), Err(DocError::Io { .. })));
}

#[test]
fn repeated_backups_never_overwrite_each_other() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("data.json");
    std::fs::write(&src, "ORIGINAL").unwrap();
    let first = backup_file(&src).unwrap();
    std::fs::write(&src, "EDITED").unwrap();
    let second = backup_file(&src).unwrap();

    assert_ne!(first, second);
    assert_eq!(std::fs::read_to_string(&first).unwrap(), "ORIGINAL");
    assert_eq!(std::fs::read_to_string(&second).unwrap(), "EDITED");
    let name = second.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("data_"));
    assert!(name.ends_with(".json.bak"));
}
