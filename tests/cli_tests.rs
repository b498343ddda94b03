//! Integration tests for tfimport
//!
//! These tests run the built binary against inventories on disk.

use std::path::Path;
use std::process::Command;

/// Get the path to the tfimport binary
fn tfimport_binary() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test executable name
    path.pop(); // Remove deps directory

    path.push("tfimport");

    if cfg!(windows) {
        path.set_extension("exe");
    }

    path
}

/// Run tfimport with a clean naming environment and return output
fn run_tfimport(args: &[&str]) -> std::process::Output {
    Command::new(tfimport_binary())
        .args(args)
        .env_remove("TFIMPORT_NAME_TAG")
        .env_remove("TFIMPORT_NAME_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute tfimport")
}

const EC2_INVENTORY: &str = r#"
resources:
  - type: aws_instance
    id: i-111
    tags:
      - key: Name
        value: web
  - type: aws_instance
    id: i-222
  - type: aws_instance
    id: i-333
    tags:
      - key: Name
        value: web
"#;

fn write_inventory(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_tfimport_version() {
    let output = run_tfimport(&["--version"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tfimport"));
}

#[test]
fn test_tfimport_help() {
    let output = run_tfimport(&["--help"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("import"));
    assert!(stdout.contains("types"));
}

#[test]
fn test_tfimport_import_help() {
    let output = run_tfimport(&["import", "--help"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--name-tag"));
    assert!(stdout.contains("--name-format"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_tfimport_types() {
    let output = run_tfimport(&["types"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("aws_instance"));
    assert!(stdout.contains("aws_network_acl_rule"));
}

#[test]
fn test_tfimport_types_unknown() {
    let output = run_tfimport(&["types", "aws_glue_job"]);

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("aws_glue_job"));
}

#[test]
fn test_tfimport_import_writes_unique_names() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(dir.path(), "inventory.yaml", EC2_INVENTORY);
    let out = dir.path().join("out");

    let output = run_tfimport(&[
        "import",
        &inventory,
        "--output",
        out.to_str().unwrap(),
        "--name-format",
        "verbatim",
    ]);

    assert!(output.status.success());

    let imports = std::fs::read_to_string(out.join("_imports.tf")).unwrap();
    assert!(imports.contains("to = aws_instance.web\n"));
    assert!(imports.contains("to = aws_instance.i-222\n"));
    assert!(imports.contains("to = aws_instance.web-2\n"));
    assert!(imports.contains("id = \"i-333\""));

    let listing = std::fs::read_to_string(out.join("instances.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&listing).unwrap();
    assert_eq!(json["instances"].as_array().unwrap().len(), 3);
}

#[test]
fn test_tfimport_import_name_tag_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(
        dir.path(),
        "inventory.json",
        r#"{"resources": [{"type": "aws_s3_bucket", "id": "logs-123", "tags": [{"key": "Service", "value": "audit-logs"}]}]}"#,
    );

    let output = Command::new(tfimport_binary())
        .args(["import", &inventory, "--dry-run"])
        .env("TFIMPORT_NAME_TAG", "Service")
        .env_remove("TFIMPORT_NAME_FORMAT")
        .output()
        .expect("Failed to execute tfimport");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("aws_s3_bucket.audit_logs"));
}

#[test]
fn test_tfimport_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(dir.path(), "inventory.yaml", EC2_INVENTORY);
    let out = dir.path().join("out");

    let output = run_tfimport(&[
        "import",
        &inventory,
        "--output",
        out.to_str().unwrap(),
        "--dry-run",
    ]);

    assert!(output.status.success());
    assert!(!out.exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("import {"));
}

#[test]
fn test_tfimport_unsupported_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(
        dir.path(),
        "inventory.yaml",
        "resources:\n  - type: aws_glue_job\n    id: nightly\n",
    );

    let output = run_tfimport(&["import", &inventory, "--dry-run"]);

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("aws_glue_job"));
}

#[test]
fn test_tfimport_skip_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(
        dir.path(),
        "inventory.yaml",
        "resources:\n  - type: aws_glue_job\n    id: nightly\n  - type: aws_vpc\n    id: vpc-1\n",
    );

    let output = run_tfimport(&["import", &inventory, "--dry-run", "--skip-unsupported"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("to = aws_vpc.vpc_1"));
}

#[test]
fn test_tfimport_invalid_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(dir.path(), "inventory.yaml", "resources: [unclosed");

    let output = run_tfimport(&["import", &inventory]);

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse inventory"));
}

#[test]
fn test_tfimport_overlapping_inventories_import_once() {
    let dir = tempfile::tempdir().unwrap();
    let inventories = dir.path().join("inventory");
    std::fs::create_dir(&inventories).unwrap();
    write_inventory(&inventories, "a.yaml", EC2_INVENTORY);
    write_inventory(&inventories, "b.yaml", EC2_INVENTORY);
    let out = dir.path().join("out");

    let output = run_tfimport(&[
        "import",
        inventories.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success());

    let imports = std::fs::read_to_string(out.join("_imports.tf")).unwrap();
    assert_eq!(imports.matches("import {").count(), 3);
    assert_eq!(imports.matches("id = \"i-111\"").count(), 1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Skipping duplicate record"));
}

#[test]
fn test_tfimport_json_inventory_with_numeric_fields() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = write_inventory(
        dir.path(),
        "inventory.json",
        r#"{"resources": [{"type": "aws_network_acl_rule", "name": "allow-https",
            "fields": {"network_acl_id": "acl-1", "rule_number": 100, "protocol": "6", "egress": false}}]}"#,
    );

    let output = run_tfimport(&["import", &inventory, "--dry-run"]);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("to = aws_network_acl_rule.allow_https"));
    assert!(stdout.contains("id = \"acl-1:100:6:false\""));
}
