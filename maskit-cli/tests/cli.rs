// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

use maskit_core::im::MaskBuffer;

const ANNOTATIONS: &str = r#"[
    {"version": "1.1", "tags": [], "shapes": [
        {"frame": 0, "type": "polygon", "points": [1, 1, 8, 1, 8, 8, 1, 8]},
        {"frame": 0, "type": "ellipse", "points": [15, 15, 3, 2]},
        {"frame": 2, "type": "polyline", "points": [0, 10, 19, 10]},
        {"frame": 4, "type": "polygon", "points": [1, 1, 8, 1]},
        {"frame": 4, "type": "rectangle", "points": [0, 0, 5, 5]}
    ]}
]"#;

fn square_mask(x: u32, y: u32, size: u32) -> MaskBuffer {
    let mut mask = MaskBuffer::zeros(10, 10);
    for row in y..y + size {
        mask.put_span(row as i64, x as i64, (x + size - 1) as i64, 255);
    }
    mask
}

fn write_pairs(references: &Path, candidates: &Path) {
    std::fs::create_dir_all(references).unwrap();
    std::fs::create_dir_all(candidates).unwrap();

    square_mask(0, 0, 3)
        .save(references.join("mask_frame_0_10x10.png"))
        .unwrap();
    square_mask(0, 0, 3)
        .save(references.join("mask_frame_1_10x10.png"))
        .unwrap();
    square_mask(0, 0, 3)
        .save(references.join("mask_frame_2_10x10.png"))
        .unwrap();

    square_mask(0, 0, 3)
        .save(candidates.join("mejorada_recortada_0301-1_mascara.png"))
        .unwrap();
    square_mask(1, 1, 3)
        .save(candidates.join("mejorada_recortada_0301-2_mascara.png"))
        .unwrap();
}

#[test]
fn test_no_arguments_prints_help() {
    Command::cargo_bin("maskit")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_build_writes_one_mask_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("annotations.json");
    let output = dir.path().join("masks");

    std::fs::write(&input, ANNOTATIONS).unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["build", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--width", "20", "--height", "20"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARNING"))
        .stderr(predicate::str::contains("frame 4"));

    for frame in [0, 2, 4] {
        let path = output.join(format!("mask_frame_{}_20x20.png", frame));
        let mask = MaskBuffer::open(&path).unwrap();
        assert_eq!(mask.shape(), (20, 20));
    }

    let frame_0 = MaskBuffer::open(output.join("mask_frame_0_20x20.png")).unwrap();
    assert_eq!(frame_0.get(1, 1), Some(255));
    assert_eq!(frame_0.get(15, 15), Some(255));

    let frame_4 = MaskBuffer::open(output.join("mask_frame_4_20x20.png")).unwrap();
    assert_eq!(frame_4.count_foreground(), 0);
}

#[test]
fn test_build_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["build", "-i"])
        .arg(dir.path().join("missing.json"))
        .arg("-o")
        .arg(dir.path().join("masks"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[maskit::build] ERROR"));
}

#[test]
fn test_build_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("annotations.json");

    std::fs::write(&input, r#"{"shapes": []}"#).unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["build", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("masks"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("AnnotationReadError"));
}

#[test]
fn test_compare_prints_pairs_and_overall() {
    let dir = tempfile::tempdir().unwrap();
    let references = dir.path().join("references");
    let candidates = dir.path().join("candidates");

    write_pairs(&references, &candidates);

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["compare", "-r"])
        .arg(&references)
        .arg("-c")
        .arg(&candidates)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Comparing mask_frame_0_10x10.png (reference mask) with mejorada_recortada_0301-1_mascara.png (candidate mask):",
        ))
        .stdout(predicate::str::contains("IoU = 1.0000, Accuracy = 1.0000"))
        .stdout(predicate::str::contains("IoU = 0.2857, Accuracy = 0.9000"))
        .stdout(predicate::str::contains(
            "Overall comparison: IoU = 0.6429, Accuracy = 0.9500",
        ))
        .stdout(predicate::str::contains("mask_frame_2_10x10.png").not())
        .stderr(predicate::str::contains(
            "mejorada_recortada_0301-3_mascara.png",
        ));
}

#[test]
fn test_compare_writes_table() {
    let dir = tempfile::tempdir().unwrap();
    let references = dir.path().join("references");
    let candidates = dir.path().join("candidates");
    let table = dir.path().join("comparison.csv");

    write_pairs(&references, &candidates);

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["compare", "-r"])
        .arg(&references)
        .arg("-c")
        .arg(&candidates)
        .arg("-o")
        .arg(&table)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&table).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "reference,candidate,iou,accuracy");
    assert!(lines[3].starts_with("Overall,"));
}

#[test]
fn test_compare_invalid_table_extension() {
    let dir = tempfile::tempdir().unwrap();
    let references = dir.path().join("references");
    let candidates = dir.path().join("candidates");

    write_pairs(&references, &candidates);

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["compare", "-r"])
        .arg(&references)
        .arg("-c")
        .arg(&candidates)
        .arg("-o")
        .arg(dir.path().join("comparison.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[maskit::compare] ERROR"));
}

#[test]
fn test_compare_custom_naming() {
    let dir = tempfile::tempdir().unwrap();
    let references = dir.path().join("references");
    let candidates = dir.path().join("candidates");

    std::fs::create_dir_all(&references).unwrap();
    std::fs::create_dir_all(&candidates).unwrap();

    square_mask(2, 2, 4)
        .save(references.join("mask_frame_5.png"))
        .unwrap();
    square_mask(2, 2, 4)
        .save(candidates.join("pred_4.png"))
        .unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["compare", "-r"])
        .arg(&references)
        .arg("-c")
        .arg(&candidates)
        .args([
            "--candidate-prefix",
            "pred_",
            "--candidate-suffix",
            ".png",
            "--frame-offset",
            "-1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Overall comparison: IoU = 1.0000, Accuracy = 1.0000",
        ));
}

#[test]
fn test_compare_missing_directory() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["compare", "-r"])
        .arg(dir.path().join("nope"))
        .arg("-c")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Reference directory"));
}

#[test]
fn test_compare_unreadable_candidate_counts_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let references = dir.path().join("references");
    let candidates = dir.path().join("candidates");

    write_pairs(&references, &candidates);
    std::fs::write(
        candidates.join("mejorada_recortada_0301-2_mascara.png"),
        b"not an image",
    )
    .unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["compare", "-v", "-r"])
        .arg(&references)
        .arg("-c")
        .arg(&candidates)
        .assert()
        .success()
        .stdout(predicate::str::contains("IoU = 0.0000, Accuracy = 0.0000"))
        .stdout(predicate::str::contains(
            "Overall comparison: IoU = 0.5000, Accuracy = 0.5000",
        ))
        .stdout(predicate::str::contains("2 pairs compared, 1 missing, 1 unreadable"))
        .stderr(predicate::str::contains("Zero scores recorded for mask_frame_1_10x10.png"));
}

#[test]
fn test_build_verbose_reports_tally() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("annotations.json");
    let output = dir.path().join("masks");

    std::fs::write(&input, ANNOTATIONS).unwrap();

    Command::cargo_bin("maskit")
        .unwrap()
        .args(["build", "-v", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--width", "20", "--height", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 masks (20x20) written to",
        ))
        .stdout(predicate::str::contains("3 shapes drawn, 1 skipped, 1 ignored"));
}
