// SPDX-License-Identifier: Apache-2.0

//! End-to-end analysis over a real build context, without the CLI.

use std::fs;

use dockhand_adapters::RealFs;
use dockhand_core::{analyze_file, AnalyzeError};

#[test]
fn analyze_file_walks_a_real_build_context() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dockerfile = temp.path().join("Dockerfile");
    fs::write(&dockerfile, "FROM ubuntu:20.04\nUSER app\nRUN pip install flask\n")
        .expect("write recipe");
    fs::write(
        temp.path().join(".dockerignore"),
        ".git\nnode_modules\n.env\ntmp\n",
    )
    .expect("write ignore");

    let report = analyze_file(&RealFs, &dockerfile, None).expect("analysis");
    assert_eq!(report.source, dockerfile.display().to_string());
    assert!(report.suggestions.contains(
        &"Consider using a lighter base image (e.g., alpine, slim versions)".to_string()
    ));
    assert!(report
        .suggestions
        .contains(&"Pin package versions to ensure consistent builds".to_string()));
    assert!(!report
        .suggestions
        .contains(&"Add a .dockerignore file to exclude unnecessary files".to_string()));
}

#[test]
fn oversized_copy_sources_are_measured_on_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    let dockerfile = temp.path().join("Dockerfile");
    fs::write(&dockerfile, "FROM alpine:3.18\nUSER app\nCOPY blob.bin /srv/\n")
        .expect("write recipe");
    fs::write(
        temp.path().join(".dockerignore"),
        ".git\nnode_modules\n.env\ntmp\n",
    )
    .expect("write ignore");
    let blob = fs::File::create(temp.path().join("blob.bin")).expect("create blob");
    blob.set_len(51 * 1024 * 1024).expect("grow blob");
    drop(blob);

    let report = analyze_file(&RealFs, &dockerfile, None).expect("analysis");
    assert_eq!(
        report.suggestions,
        vec!["Avoid copying large unnecessary files into the image"]
    );
}

#[test]
fn missing_recipe_is_reported_as_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("Dockerfile");
    let err = analyze_file(&RealFs, &missing, None).expect_err("must fail");
    assert!(matches!(err, AnalyzeError::SourceNotFound(_)));
    assert_eq!(
        err.to_string(),
        format!("Dockerfile not found at {}", missing.display())
    );
}

#[test]
fn context_root_overrides_where_copy_sources_resolve() {
    let temp = tempfile::tempdir().expect("tempdir");
    let recipe_dir = temp.path().join("docker");
    let data_dir = temp.path().join("data");
    fs::create_dir_all(&recipe_dir).expect("mkdir recipe");
    fs::create_dir_all(&data_dir).expect("mkdir data");
    let dockerfile = recipe_dir.join("Dockerfile");
    fs::write(&dockerfile, "FROM alpine:3.18\nUSER app\nCOPY blob.bin /srv/\n")
        .expect("write recipe");
    fs::write(
        recipe_dir.join(".dockerignore"),
        ".git\nnode_modules\n.env\ntmp\n",
    )
    .expect("write ignore");
    let blob = fs::File::create(data_dir.join("blob.bin")).expect("create blob");
    blob.set_len(51 * 1024 * 1024).expect("grow blob");
    drop(blob);

    // Without the override the source is missing next to the recipe.
    let report = analyze_file(&RealFs, &dockerfile, None).expect("analysis");
    assert!(report.suggestions.is_empty());

    let report = analyze_file(&RealFs, &dockerfile, Some(data_dir)).expect("analysis");
    assert_eq!(
        report.suggestions,
        vec!["Avoid copying large unnecessary files into the image"]
    );
}
