//! E2E: rule paths resolved against a project root, loaded from config files.

use fence_coordinator::{
    ConfigError, FenceConfig, FenceCoordinator, PathRules, RejectReason, ResolutionFact,
};
use fence_tests::init_tracing;
use std::path::PathBuf;

#[test]
fn valid_paths_round_trip() {
    init_tracing();
    let rules = PathRules::new(FenceConfig::rooted("/proj").with_valid_paths(["src"]))
        .build()
        .unwrap();
    assert_eq!(rules.valid_paths(), Some(&[PathBuf::from("/proj/src")][..]));

    let mut fence = FenceCoordinator::new(rules.clone());
    fence
        .observe(&ResolutionFact::entry("/proj/src/a.js"))
        .unwrap();

    let mut fence = FenceCoordinator::new(rules);
    let err = fence
        .observe(&ResolutionFact::entry("/proj/srcmore/a.js"))
        .unwrap_err();
    assert_eq!(err.violation().unwrap().reason, RejectReason::ValidPaths);
}

#[test]
fn yaml_config_drives_a_session() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fence.yml");
    std::fs::write(
        &path,
        "rootPath: /proj\nvalidPaths: [src, lib]\ninvalidPaths: [src/legacy]\ninvalidModules: [left-pad]\n",
    )
    .unwrap();

    let config = FenceConfig::load(&path).unwrap();
    let mut fence = FenceCoordinator::from_config(config).unwrap();

    fence.observe(&ResolutionFact::entry("/proj/src/index.js")).unwrap();
    fence
        .observe(&ResolutionFact::imported(
            "/proj/lib/util.js",
            "/proj/src/index.js",
            "../lib/util",
        ))
        .unwrap();

    let err = fence
        .observe(&ResolutionFact::imported(
            "/proj/src/legacy/old.js",
            "/proj/lib/util.js",
            "../src/legacy/old",
        ))
        .unwrap_err();
    let violation = err.violation().unwrap();
    assert_eq!(violation.reason, RejectReason::InvalidPaths);
    assert_eq!(violation.trace.len(), 3);
}

#[test]
fn json_config_with_unknown_key_fails_early() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fence.json");
    std::fs::write(&path, r#"{"rootPath": "/proj", "validPath": ["src"]}"#).unwrap();

    let err = FenceConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownKey(_)));
}

#[test]
fn escaping_rule_path_fails_before_any_event() {
    let err = FenceCoordinator::from_config(
        FenceConfig::rooted("/proj").with_invalid_paths(["../../etc"]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::OutsideRoot { .. }));
}
