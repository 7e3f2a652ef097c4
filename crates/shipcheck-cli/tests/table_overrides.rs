//! Integration test: operator-supplied code tables and thresholds change
//! verdicts without a rebuild.

use std::fs;
use std::path::Path;

use shipcheck_cli::check::{run_check, CheckArgs, EXIT_THRESHOLD_MET};
use shipcheck_cli::engine::EngineArgs;
use shipcheck_cli::output::OutputFormat;
use shipcheck_core::Severity;

const TABLES: &str = r#"
airports:
  NEW: ZZ
seaports:
  - ZZPRT
  - USLAX
countries:
  ZZ: [Zedland]
  US: [United States]
"#;

const STATE: &str = r#"{
    "shipment": {
        "trade_route": { "mode": "sea", "origin": "NEW", "destination": "USLAX" }
    }
}"#;

fn check(dir: &Path, engine: EngineArgs) -> (u8, serde_json::Value) {
    let state = dir.join("state.json");
    fs::write(&state, STATE).unwrap();
    let args = CheckArgs {
        state,
        engine,
        scope: None,
        field: Some("shipment.trade_route".into()),
        format: OutputFormat::Json,
        fail_on: Some(Severity::Critical),
        at: Some("2024-04-01T00:00:00Z".into()),
    };
    let mut out = Vec::new();
    let code = run_check(&args, &mut out).unwrap();
    (code, serde_json::from_slice(&out).unwrap())
}

fn ids(report: &serde_json::Value) -> Vec<String> {
    report["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_builtin_tables_do_not_know_new_airport() {
    let dir = tempfile::tempdir().unwrap();
    let (code, report) = check(dir.path(), EngineArgs::default());
    assert!(!ids(&report).contains(&"trade.mode.location_mismatch".to_string()));
    assert_eq!(code, 0);
}

#[test]
fn test_replacement_tables_flag_new_airport() {
    let dir = tempfile::tempdir().unwrap();
    let tables = dir.path().join("tables.yaml");
    fs::write(&tables, TABLES).unwrap();
    let engine = EngineArgs {
        tables: Some(tables),
        config: None,
    };
    let (code, report) = check(dir.path(), engine);
    assert!(ids(&report).contains(&"trade.mode.location_mismatch".to_string()));
    assert_eq!(code, EXIT_THRESHOLD_MET);
}

#[test]
fn test_malformed_tables_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let tables = dir.path().join("tables.yaml");
    fs::write(&tables, "airports: { NEWARK: ZZ }\n").unwrap();
    let state = dir.path().join("state.json");
    fs::write(&state, STATE).unwrap();
    let args = CheckArgs {
        state,
        engine: EngineArgs {
            tables: Some(tables),
            config: None,
        },
        scope: None,
        field: None,
        format: OutputFormat::Text,
        fail_on: None,
        at: None,
    };
    let err = run_check(&args, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("invalid code tables"));
}
