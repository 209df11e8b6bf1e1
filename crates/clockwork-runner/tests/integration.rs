use std::fs;
use std::path::{Path, PathBuf};

use clockwork_blueprint::{Blueprint, decode, encode};
use clockwork_core::clock::clock_speed;
use clockwork_core::test_utils::*;
use clockwork_runner::runner::file_pair;
use clockwork_runner::{RunConfig, RunError, run};

/// Create a temporary directory with a unique name for test isolation.
fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "clockwork_runner_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

fn write_blueprint(dir: &Path, bp: &Blueprint) {
    let encoded = encode(bp).unwrap();
    let (main, config) = file_pair(dir, &bp.name);
    fs::write(main, encoded.main_file_bytes()).unwrap();
    fs::write(config, &encoded.config).unwrap();
}

fn read_blueprint(dir: &Path, name: &str) -> Blueprint {
    let (main, config) = file_pair(dir, name);
    decode(name, &fs::read(main).unwrap(), &fs::read(config).unwrap()).unwrap()
}

fn factory() -> Blueprint {
    let mut bp = blueprint(vec![
        machine("refinery", 1),
        machine("manufacturer", 1),
        machine("manufacturer", 2),
    ]);
    bp.name = "oil_block".to_string();
    bp.config.description = "fuel".to_string();
    bp
}

fn dir_entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

// -----------------------------------------------------------------------
// Successful runs
// -----------------------------------------------------------------------

#[test]
fn run_writes_modified_pair() {
    let dir = make_test_dir("success");
    write_blueprint(&dir, &factory());

    let summary = run(&RunConfig::new(&dir, "oil_block", "Refinery:2,Manufacturer:3.66")).unwrap();
    assert_eq!(summary.output_main, dir.join("oil_block_modified.sbp"));
    assert_eq!(summary.output_config, dir.join("oil_block_modified.sbpcfg"));
    assert_eq!(summary.adjustment.total_matched(), 3);

    let out = read_blueprint(&dir, "oil_block_modified");
    assert_eq!(clock_speed(&out.entities()[0]), 2.0);
    assert_eq!(clock_speed(&out.entities()[1]), 3.66);
    assert_eq!(clock_speed(&out.entities()[2]), 3.66);
    assert_eq!(out.config.description, "fuel");

    // Input untouched.
    assert_eq!(read_blueprint(&dir, "oil_block"), factory());

    cleanup(&dir);
}

#[test]
fn run_honours_output_name_and_dir() {
    let dir = make_test_dir("output_dir");
    let out_dir = dir.join("out");
    fs::create_dir_all(&out_dir).unwrap();
    write_blueprint(&dir, &factory());

    let mut config = RunConfig::new(&dir, "oil_block", "refinery:1.5");
    config.output_name = Some("tuned".to_string());
    config.output_dir = Some(out_dir.clone());
    let summary = run(&config).unwrap();

    assert_eq!(summary.output_main, out_dir.join("tuned.sbp"));
    assert!(out_dir.join("tuned.sbpcfg").exists());
    assert_eq!(summary.adjustment.report[0].matched_count, 1);

    cleanup(&dir);
}

#[test]
fn run_with_custom_registry_file() {
    let dir = make_test_dir("registry_file");
    let mut bp = blueprint(vec![foreign_entity("/Game/Mods/Pump/Build_Pump.Build_Pump_C", 1)]);
    bp.name = "pumps".to_string();
    write_blueprint(&dir, &bp);
    let table = dir.join("machines.json");
    fs::write(
        &table,
        r#"[{"name": "pump", "type_path": "/Game/Mods/Pump/Build_Pump.Build_Pump_C"}]"#,
    )
    .unwrap();

    let mut config = RunConfig::new(&dir, "pumps", "Pump:2");
    config.registry_file = Some(table);
    let summary = run(&config).unwrap();
    assert_eq!(summary.adjustment.inventory[0].friendly_name, "pump");

    cleanup(&dir);
}

// -----------------------------------------------------------------------
// Failures leave no output behind
// -----------------------------------------------------------------------

#[test]
fn nothing_matched_writes_nothing() {
    let dir = make_test_dir("nothing_matched");
    write_blueprint(&dir, &factory());

    let result = run(&RunConfig::new(&dir, "oil_block", "packager:2"));
    assert!(matches!(result, Err(RunError::NothingMatched { ref blueprint }) if blueprint == "oil_block"));
    assert_eq!(dir_entries(&dir), 2);

    cleanup(&dir);
}

#[test]
fn unknown_machine_writes_nothing() {
    let dir = make_test_dir("unknown_machine");
    write_blueprint(&dir, &factory());

    let result = run(&RunConfig::new(&dir, "oil_block", "refinery:2,teleporter:3"));
    assert!(matches!(result, Err(RunError::Adjust(_))));
    assert_eq!(dir_entries(&dir), 2);

    cleanup(&dir);
}

#[test]
fn malformed_specs_fail_before_reading() {
    let dir = make_test_dir("bad_specs");
    // No blueprint on disk: the parse error must win over the missing file.
    let result = run(&RunConfig::new(&dir, "missing", "refinery"));
    assert!(matches!(result, Err(RunError::Spec(_))));

    let result = run(&RunConfig::new(&dir, "missing", ""));
    assert!(matches!(result, Err(RunError::Spec(clockwork_core::SpecError::Empty))));

    cleanup(&dir);
}

#[test]
fn missing_input_is_io_error() {
    let dir = make_test_dir("missing_input");
    let result = run(&RunConfig::new(&dir, "ghost", "refinery:2"));
    match result {
        Err(RunError::Io { path, .. }) => assert_eq!(path, dir.join("ghost.sbp")),
        other => panic!("expected Io, got: {other:?}"),
    }
    cleanup(&dir);
}

#[test]
fn corrupt_input_is_codec_error() {
    let dir = make_test_dir("corrupt");
    let (main, config) = file_pair(&dir, "broken");
    fs::write(main, [1, 2, 3]).unwrap();
    fs::write(config, [4, 5, 6]).unwrap();

    let result = run(&RunConfig::new(&dir, "broken", "refinery:2"));
    assert!(matches!(result, Err(RunError::Codec(_))));
    assert_eq!(dir_entries(&dir), 2);

    cleanup(&dir);
}

#[test]
fn output_equal_to_input_refused() {
    let dir = make_test_dir("same_output");
    write_blueprint(&dir, &factory());

    let mut config = RunConfig::new(&dir, "oil_block", "refinery:2");
    config.output_name = Some("oil_block".to_string());
    assert!(matches!(run(&config), Err(RunError::OutputIsInput(_))));
    assert_eq!(read_blueprint(&dir, "oil_block"), factory());

    cleanup(&dir);
}

#[test]
fn output_dir_spelled_differently_still_refused() {
    let dir = make_test_dir("same_output_dot");
    write_blueprint(&dir, &factory());

    let mut config = RunConfig::new(&dir, "oil_block", "refinery:2");
    config.output_name = Some("oil_block".to_string());
    config.output_dir = Some(dir.join("."));
    assert!(matches!(run(&config), Err(RunError::OutputIsInput(_))));
    assert_eq!(read_blueprint(&dir, "oil_block"), factory());

    cleanup(&dir);
}

#[test]
fn failed_config_write_removes_main_file() {
    let dir = make_test_dir("config_write_fails");
    write_blueprint(&dir, &factory());
    // A directory where the config file should go makes its write fail.
    fs::create_dir_all(dir.join("oil_block_modified.sbpcfg")).unwrap();

    let result = run(&RunConfig::new(&dir, "oil_block", "refinery:2"));
    match result {
        Err(RunError::Io { path, .. }) => assert_eq!(path, dir.join("oil_block_modified.sbpcfg")),
        other => panic!("expected Io, got: {other:?}"),
    }
    assert!(!dir.join("oil_block_modified.sbp").exists());

    cleanup(&dir);
}

#[test]
fn failed_main_write_leaves_no_config() {
    let dir = make_test_dir("main_write_fails");
    write_blueprint(&dir, &factory());
    fs::create_dir_all(dir.join("oil_block_modified.sbp")).unwrap();

    let result = run(&RunConfig::new(&dir, "oil_block", "refinery:2"));
    match result {
        Err(RunError::Io { path, .. }) => assert_eq!(path, dir.join("oil_block_modified.sbp")),
        other => panic!("expected Io, got: {other:?}"),
    }
    assert!(!dir.join("oil_block_modified.sbpcfg").exists());
    assert!(dir.join("oil_block_modified.sbp").is_dir());

    cleanup(&dir);
}
