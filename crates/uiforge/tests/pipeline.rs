//! End-to-end generation runs against a temporary output directory.

use proptest::prelude::*;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use uiforge::{GenerateError, GenerateOptions, Generator, IrSource, OutputSpec};
use zip::ZipArchive;

fn login_ir() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "schema_version": "1.0",
        "screen": { "name": "login" },
        "elements": [
            { "kind": "text_field", "hint": "email", "secure": false },
            { "kind": "text_field", "hint": "password", "secure": true },
            { "kind": "button", "label": "Continue" }
        ]
    }))
    .unwrap()
}

fn generator() -> Generator {
    Generator::with_defaults(GenerateOptions::default())
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn unzip(bytes: &[u8]) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut files = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).unwrap();
        files.insert(file.name().to_string(), contents);
    }
    files
}

#[test]
fn login_for_flutter() {
    let source = IrSource::Bytes(login_ir());
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let report = generator()
        .generate(&source, "flutter", &OutputSpec::archive(first.path()))
        .unwrap();
    assert_eq!(report.root, "login-flutter");
    assert_eq!(report.path, first.path().join("login-flutter.zip"));

    let bytes = fs::read(&report.path).unwrap();
    let files = unzip(&bytes);
    let main_dart = String::from_utf8(files["login-flutter/lib/main.dart"].clone()).unwrap();
    assert!(main_dart.contains("title: 'login',"));

    let email = main_dart.find("TextField(").unwrap();
    let password = main_dart[email + 1..].find("TextField(").unwrap() + email + 1;
    let button = main_dart.find("ElevatedButton(").unwrap();
    assert!(email < password && password < button);
    assert!(!main_dart[email..password].contains("obscureText"));
    assert!(main_dart[password..button].contains("obscureText: true"));
    assert!(main_dart[button..].contains("child: Text('Continue'),"));

    generator()
        .generate(&source, "flutter", &OutputSpec::archive(second.path()))
        .unwrap();
    let again = fs::read(second.path().join("login-flutter.zip")).unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn unknown_target_lists_supported_ones() {
    let out = tempfile::tempdir().unwrap();
    let err = generator()
        .generate(
            &IrSource::Bytes(login_ir()),
            "reactnative",
            &OutputSpec::archive(out.path()),
        )
        .unwrap_err();
    match &err {
        GenerateError::UnsupportedTarget {
            requested,
            available,
        } => {
            assert_eq!(requested, "reactnative");
            assert_eq!(available, &vec!["flutter", "react", "web"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.exit_code(), 3);
    assert!(entries(out.path()).is_empty());
}

#[test]
fn unsupported_element_writes_nothing() {
    let ir = serde_json::to_vec(&json!({
        "schema_version": "1.0",
        "screen": { "name": "gallery" },
        "elements": [
            { "kind": "text", "text": "Photos" },
            { "kind": "carousel", "items": ["a", "b"] }
        ]
    }))
    .unwrap();
    let out = tempfile::tempdir().unwrap();
    for spec in [
        OutputSpec::archive(out.path()),
        OutputSpec::directory(out.path()),
    ] {
        let err = generator()
            .generate(&IrSource::Bytes(ir.clone()), "web", &spec)
            .unwrap_err();
        match &err {
            GenerateError::UnsupportedElement { kind, index, .. } => {
                assert_eq!(kind, "carousel");
                assert_eq!(*index, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.exit_code(), 4);
    }
    assert!(entries(out.path()).is_empty());
}

#[test]
fn validation_errors_are_enumerated() {
    let ir = serde_json::to_vec(&json!({
        "schema_version": "1.0",
        "screen": {},
        "elements": [
            { "kind": "text_field" },
            { "kind": "button", "bbox": { "x": -1, "y": 0, "width": 10, "height": 10 } }
        ]
    }))
    .unwrap();
    let out = tempfile::tempdir().unwrap();
    let err = generator()
        .generate(&IrSource::Bytes(ir), "react", &OutputSpec::archive(out.path()))
        .unwrap_err();
    match &err {
        GenerateError::Validation(validation) => {
            assert!(validation.has_path("screen.name"));
            assert!(validation.has_path("elements[0].hint"));
            assert!(validation.has_path("elements[1].label"));
            assert!(validation.has_path("elements[1].bbox.x"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.exit_code(), 2);
    assert!(entries(out.path()).is_empty());
}

#[test]
fn directory_output_matches_archive() {
    let source = IrSource::Bytes(login_ir());
    let archives = tempfile::tempdir().unwrap();
    let trees = tempfile::tempdir().unwrap();

    for target in ["web", "react", "flutter"] {
        let zipped = generator()
            .generate(&source, target, &OutputSpec::archive(archives.path()))
            .unwrap();
        let unpacked = generator()
            .generate(&source, target, &OutputSpec::directory(trees.path()))
            .unwrap();

        let from_archive = unzip(&fs::read(&zipped.path).unwrap());
        let mut from_tree = BTreeMap::new();
        for (path, _) in &from_archive {
            let rel = path.strip_prefix(&format!("{}/", unpacked.root)).unwrap();
            from_tree.insert(path.clone(), fs::read(unpacked.path.join(rel)).unwrap());
        }
        assert_eq!(from_archive, from_tree, "{}", target);
        assert_eq!(unpacked.files, from_archive.len());
    }
}

#[test]
fn existing_output_needs_overwrite() {
    let source = IrSource::Bytes(login_ir());
    let out = tempfile::tempdir().unwrap();
    let spec = OutputSpec::archive(out.path());
    generator().generate(&source, "web", &spec).unwrap();

    let err = generator().generate(&source, "web", &spec).unwrap_err();
    assert!(matches!(err, GenerateError::Packaging(_)));
    assert_eq!(err.exit_code(), 5);

    generator()
        .generate(&source, "web", &spec.clone().overwrite(true))
        .unwrap();
}

#[test]
fn many_targets_in_parallel() {
    let ir = tempfile::NamedTempFile::new().unwrap();
    fs::write(ir.path(), login_ir()).unwrap();
    let source = IrSource::Path(ir.path().to_path_buf());
    let out = tempfile::tempdir().unwrap();

    let reports = generator()
        .generate_many(
            &source,
            &["web", "react", "flutter", "web"],
            &OutputSpec::archive(out.path()),
        )
        .unwrap();
    let targets: Vec<&str> = reports.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["web", "react", "flutter"]);
    assert_eq!(
        entries(out.path()),
        vec!["login-flutter.zip", "login-react.zip", "login-web.zip"]
    );
}

#[test]
fn many_targets_fail_before_writing() {
    let out = tempfile::tempdir().unwrap();
    let err = generator()
        .generate_many(
            &IrSource::Bytes(login_ir()),
            &["web", "reactnative"],
            &OutputSpec::archive(out.path()),
        )
        .unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(entries(out.path()).is_empty());
}

#[test]
fn many_targets_leave_nothing_when_one_write_fails() {
    let out = tempfile::tempdir().unwrap();
    let stale = out.path().join("login-web.zip");
    fs::write(&stale, b"stale").unwrap();

    let err = generator()
        .generate_many(
            &IrSource::Bytes(login_ir()),
            &["flutter", "web"],
            &OutputSpec::archive(out.path()),
        )
        .unwrap_err();
    assert!(matches!(err, GenerateError::Packaging(_)));
    assert_eq!(err.exit_code(), 5);
    assert_eq!(entries(out.path()), vec!["login-web.zip"]);
    assert_eq!(fs::read(&stale).unwrap(), b"stale");
}

#[test]
fn many_directories_leave_nothing_when_one_write_fails() {
    let out = tempfile::tempdir().unwrap();
    fs::create_dir(out.path().join("login-react")).unwrap();

    let err = generator()
        .generate_many(
            &IrSource::Bytes(login_ir()),
            &["web", "flutter", "react"],
            &OutputSpec::directory(out.path()),
        )
        .unwrap_err();
    assert_eq!(err.exit_code(), 5);
    assert_eq!(entries(out.path()), vec!["login-react"]);
    assert!(entries(&out.path().join("login-react")).is_empty());
}

#[test]
fn output_directory_is_created_only_on_success() {
    let parent = tempfile::tempdir().unwrap();
    let out = parent.path().join("build/generated");
    let spec = OutputSpec::archive(&out);

    let err = generator()
        .generate(&IrSource::Bytes(login_ir()), "reactnative", &spec)
        .unwrap_err();
    assert_eq!(err.exit_code(), 3);
    let err = generator()
        .generate(&IrSource::Bytes(b"{}".to_vec()), "web", &spec)
        .unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(!parent.path().join("build").exists());

    let report = generator()
        .generate(&IrSource::Bytes(login_ir()), "web", &spec)
        .unwrap();
    assert_eq!(report.path, out.join("login-web.zip"));
    assert_eq!(entries(&out), vec!["login-web.zip"]);
}

#[test]
fn missing_input_file() {
    let out = tempfile::tempdir().unwrap();
    let source = IrSource::Path(out.path().join("missing.json"));
    let err = generator()
        .generate(&source, "web", &OutputSpec::archive(out.path()))
        .unwrap_err();
    assert!(matches!(err, GenerateError::Input { .. }));
    assert!(err.to_string().contains("missing.json"));
}

fn labelled_ir(screen: &str, labels: &[String]) -> Vec<u8> {
    let elements: Vec<_> = labels
        .iter()
        .map(|label| json!({ "kind": "button", "label": label }))
        .collect();
    serde_json::to_vec(&json!({
        "schema_version": "1.0",
        "screen": { "name": screen },
        "elements": [ { "kind": "container", "children": elements } ]
    }))
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn archives_and_trees_agree_for_any_screen(
        screen in "[A-Za-z][A-Za-z0-9 _-]{0,12}",
        labels in prop::collection::vec("[a-zA-Z0-9<>\"'`$&{}()\\\\ ,.!?é\n]{1,12}", 0..4),
    ) {
        let source = IrSource::Bytes(labelled_ir(&screen, &labels));
        let archives = tempfile::tempdir().unwrap();
        let trees = tempfile::tempdir().unwrap();
        let targets = ["web", "react", "flutter"];

        let zipped = generator()
            .generate_many(&source, &targets, &OutputSpec::archive(archives.path()))
            .unwrap();
        let unpacked = generator()
            .generate_many(&source, &targets, &OutputSpec::directory(trees.path()))
            .unwrap();
        prop_assert_eq!(entries(archives.path()).len(), 3);
        prop_assert_eq!(entries(trees.path()).len(), 3);

        for (zip, tree) in zipped.iter().zip(&unpacked) {
            prop_assert_eq!(&zip.root, &tree.root);
            let from_archive = unzip(&fs::read(&zip.path).unwrap());
            prop_assert_eq!(from_archive.len(), tree.files);
            for (path, contents) in &from_archive {
                let rel = path.strip_prefix(&format!("{}/", tree.root)).unwrap();
                prop_assert_eq!(&fs::read(tree.path.join(rel)).unwrap(), contents);
            }
        }
    }
}
