//! The file-pair pipeline driven from disk: write a blueprint, run, read back.

use std::fs;
use std::path::{Path, PathBuf};

use clockwork_blueprint::{Blueprint, decode, encode};
use clockwork_core::clock::{clock_speed, pending_clock_speed};
use clockwork_core::test_utils::*;
use clockwork_runner::runner::file_pair;
use clockwork_runner::{RunConfig, RunError, run};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "clockwork_pipeline_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn store(dir: &Path, bp: &Blueprint) {
    let encoded = encode(bp).unwrap();
    let (main, config) = file_pair(dir, &bp.name);
    fs::write(main, encoded.main_file_bytes()).unwrap();
    fs::write(config, &encoded.config).unwrap();
}

fn load(dir: &Path, name: &str) -> Blueprint {
    let (main, config) = file_pair(dir, name);
    decode(name, &fs::read(main).unwrap(), &fs::read(config).unwrap()).unwrap()
}

#[test]
fn refinery_and_manufacturers_through_files() {
    let dir = make_test_dir("refinery");
    let mut bp = blueprint(vec![
        machine("refinery", 1),
        machine("manufacturer", 1),
        machine("manufacturer", 2),
    ]);
    bp.name = "plastic".to_string();
    store(&dir, &bp);

    let summary = run(&RunConfig::new(&dir, "plastic", "Refinery:2,Manufacturer:3.66")).unwrap();
    let counts: Vec<_> = summary.adjustment.report.iter().map(|r| r.matched_count).collect();
    assert_eq!(counts, [1, 2]);

    let out = load(&dir, "plastic_modified");
    assert_eq!(out.entity_count(), 3);
    assert_eq!(clock_speed(&out.entities()[0]), 2.0);
    for entity in &out.entities()[1..] {
        assert_eq!(clock_speed(entity), 3.66);
        assert_eq!(pending_clock_speed(entity), 3.66);
    }
    assert_eq!(load(&dir, "plastic"), bp);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn absent_kind_leaves_directory_unchanged() {
    let dir = make_test_dir("absent");
    let mut bp = blueprint(vec![machine("smelter", 1)]);
    bp.name = "ingots".to_string();
    store(&dir, &bp);

    let result = run(&RunConfig::new(&dir, "ingots", "blender:2"));
    assert!(matches!(result, Err(RunError::NothingMatched { .. })));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 2);

    let _ = fs::remove_dir_all(&dir);
}
