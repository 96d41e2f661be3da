//! E2E: a coordinator with an audit mirror copies exactly the accepted files.

use fence_coordinator::{AuditConfig, AuditMirror, FenceConfig, FenceCoordinator, ResolutionFact};
use fence_tests::init_tracing;
use std::path::PathBuf;

fn project() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap().join("proj");
    for (file, body) in [
        ("src/index.js", "import './a';\n"),
        ("src/a.js", "import '../vendor/x';\n"),
        ("vendor/x.js", "export default 1;\n"),
    ] {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }
    (dir, root)
}

#[test]
fn accepted_files_are_mirrored_once() {
    init_tracing();
    let (_dir, root) = project();
    let mirror = AuditMirror::new(AuditConfig::new(&root, "audit")).unwrap();
    let mut fence = FenceCoordinator::from_config(
        FenceConfig::rooted(&root).with_invalid_paths(["vendor"]),
    )
    .unwrap()
    .with_sink(mirror);

    let index = root.join("src/index.js");
    let a = root.join("src/a.js");
    fence.observe(&ResolutionFact::entry(&index)).unwrap();
    fence
        .observe(&ResolutionFact::imported(&a, &index, "./a"))
        .unwrap();
    // Re-resolution of the same file from another site.
    fence
        .observe(&ResolutionFact::imported(&a, &index, "./a.js"))
        .unwrap();

    let err = fence
        .observe(&ResolutionFact::imported(
            root.join("vendor/x.js"),
            &a,
            "../vendor/x",
        ))
        .unwrap_err();
    assert!(err.to_string().contains(r#"  * "./vendor/x.js" (as "../vendor/x" from "./src/a.js")"#));

    assert_eq!(
        std::fs::read_to_string(root.join("audit/src/index.js")).unwrap(),
        "import './a';\n"
    );
    assert!(root.join("audit/src/a.js").exists());
    assert!(!root.join("audit/vendor").exists());
}

#[test]
fn wrap_hook_filters_mirrored_files() {
    init_tracing();
    let (_dir, root) = project();
    let mirror = AuditMirror::new(AuditConfig::new(&root, "audit"))
        .unwrap()
        .with_wrap_path(|dest| {
            if dest.ends_with("index.js") {
                None
            } else {
                Some(dest.to_path_buf())
            }
        });
    let mut fence = FenceCoordinator::from_config(FenceConfig::rooted(&root))
        .unwrap()
        .with_sink(mirror);

    let index = root.join("src/index.js");
    fence.observe(&ResolutionFact::entry(&index)).unwrap();
    fence
        .observe(&ResolutionFact::imported(root.join("src/a.js"), &index, "./a"))
        .unwrap();

    assert!(!root.join("audit/src/index.js").exists());
    assert!(root.join("audit/src/a.js").exists());
}

#[test]
fn vanished_source_surfaces_io_fault() {
    init_tracing();
    let (_dir, root) = project();
    let mirror = AuditMirror::new(AuditConfig::new(&root, "audit")).unwrap();
    let mut fence = FenceCoordinator::from_config(FenceConfig::rooted(&root))
        .unwrap()
        .with_sink(mirror);

    let err = fence
        .observe(&ResolutionFact::entry(root.join("src/missing.js")))
        .unwrap_err();
    assert!(matches!(
        err,
        fence_coordinator::FenceError::Sink(fence_coordinator::AuditError::Io { .. })
    ));
}
