// End-to-end tests for the bioquery binary
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const DATASET: &str = "\
Organism,Gravity_Condition,Experimental_Type,Abstract
Mus musculus,Microgravity,Spaceflight,Liver gene expression in mice after spaceflight
Rattus norvegicus,N/A,Radiation,Heart tissue damage in rats exposed to radiation
";

fn bioquery(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bioquery"))
        .args(args)
        .env_remove("BIOQUERY_DATA")
        .output()
        .expect("failed to run bioquery")
}

fn dataset_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file
}

#[test]
fn test_no_query_prints_json_error() {
    let output = bioquery(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end(), r#"{"error": "No query provided"}"#);
}

#[test]
fn test_query_prints_single_json_object() {
    let file = dataset_file();
    let path = file.path().to_str().unwrap();
    let output = bioquery(&["mouse liver microgravity", "--data", path]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(
        value["params"],
        serde_json::json!({"organism": "mouse", "tissue": "liver", "condition": "microgravity"})
    );
    assert_eq!(value["matches"][0]["row"], 0);
}

#[test]
fn test_top_k_option() {
    let file = dataset_file();
    let path = file.path().to_str().unwrap();
    let output = bioquery(&["mice and rats", "--data", path, "--top-k", "1"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["matches"].as_array().unwrap().len(), 1);
}

#[test]
fn test_unreadable_dataset_exits_without_json() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let output = bioquery(&["mouse", "--data", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("ERROR:"));
    assert!(serde_json::from_str::<serde_json::Value>(stdout.trim()).is_err());
}
