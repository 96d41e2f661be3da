//! E2E: resolution events delivered by a host as JSON lines.

use fence_coordinator::{FenceConfig, FenceCoordinator, RejectReason};
use fence_tests::{init_tracing, parse_events, replay};

const EVENTS: &str = r#"
{"resolvedPath": "/repo/app/main.ts", "importText": "./app/main.ts"}
{"resolvedPath": "/repo/app/api.ts", "importerPath": "/repo/app/main.ts", "importText": "./api"}
{"resolvedPath": "/repo/node_modules/axios/index.js", "importerPath": "/repo/app/api.ts", "importText": "axios", "declaredModuleName": "axios", "declaringPackagePath": "/repo/node_modules/axios/package.json"}
{"resolvedPath": "/repo/node_modules/request/index.js", "importerPath": "/repo/app/api.ts", "importText": "request", "declaredModuleName": "request", "declaringPackagePath": "/repo/node_modules/request/package.json"}
"#;

#[test]
fn host_stream_stops_at_banned_package() {
    init_tracing();
    let facts = parse_events(EVENTS).unwrap();
    assert_eq!(facts.len(), 4);

    let config = FenceConfig::from_json_value(serde_json::json!({
        "rootPath": "/repo",
        "invalidModules": ["request"],
        "debug": true
    }))
    .unwrap();
    let mut fence = FenceCoordinator::from_config(config).unwrap();

    let err = replay(&mut fence, &facts).unwrap_err();
    let violation = err.violation().unwrap();
    assert_eq!(violation.reason, RejectReason::InvalidModules);
    assert_eq!(violation.fact.as_ref(), Some(&facts[3]));
    assert_eq!(
        err.to_string(),
        [
            "[fencing] invalidModules: /repo/node_modules/request/index.js (request)",
            r#"  * "./node_modules/request/index.js" (as "request" from "./app/api.ts")"#,
            r#"  * "./app/api.ts" (as "./api" from "./app/main.ts")"#,
            r#"  * "./app/main.ts""#,
            r#"  * in "/repo""#,
        ]
        .join("\n")
    );
    assert_eq!(fence.accepted(), 3);
}

#[test]
fn malformed_event_is_rejected_by_parser() {
    assert!(parse_events(r#"{"importText": "./a"}"#).is_err());
}
