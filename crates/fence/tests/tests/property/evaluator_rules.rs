//! Property tests: rule evaluation honors name, install-path and prefix rules.

use fence_provenance::ResolutionHistory;
use fence_rules::{FenceConfig, PathRules, RejectReason, RuleEvaluator, RuleSet};
use fence_types::ResolutionFact;
use proptest::prelude::*;
use std::path::Path;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

fn arb_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 0..4)
}

fn rules(config: FenceConfig) -> RuleSet {
    PathRules::new(config).build().unwrap()
}

fn fact_at(path: String, module: Option<String>) -> ResolutionFact {
    let mut fact = ResolutionFact::imported(path, "/proj/src/index.js", "dep");
    fact.declared_module_name = module;
    fact
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// validModules = [m] accepts exactly the facts declaring m.
    #[test]
    fn valid_modules_accepts_only_listed_name(m in arb_name(), declared in arb_name()) {
        let rules = rules(FenceConfig::default().with_valid_modules([m.clone()]));
        let fact = fact_at("/proj/src/a.js".into(), Some(declared.clone()));
        let verdict = RuleEvaluator::evaluate(&fact, &rules);
        prop_assert_eq!(verdict.is_accept(), declared == m);
    }

    /// A banned package nested anywhere under node_modules is rejected
    /// whatever name it declares.
    #[test]
    fn banned_install_path_rejects_regardless_of_name(
        lead in arb_segments(),
        tail in arb_segments(),
        declared in proptest::option::of(arb_name()),
    ) {
        let mut path = String::from("/proj");
        for segment in &lead {
            path.push('/');
            path.push_str(segment);
        }
        path.push_str("/node_modules/bad");
        for segment in &tail {
            path.push('/');
            path.push_str(segment);
        }
        path.push_str("/index.js");

        let rules = rules(FenceConfig::default().with_invalid_modules(["bad"]));
        let verdict = RuleEvaluator::evaluate(&fact_at(path, declared), &rules);
        prop_assert_eq!(
            verdict.rejection().map(|r| r.reason),
            Some(RejectReason::InvalidModules)
        );
    }

    /// Prefix rules are segment-bounded: `/proj/<dir>` never admits `/proj/<dir><more>`.
    #[test]
    fn valid_paths_respect_segment_boundary(
        dir in "[a-z]{1,8}",
        more in "[a-z0-9]{1,4}",
        file in "[a-z]{1,8}",
    ) {
        let rules = rules(FenceConfig::rooted("/proj").with_valid_paths([dir.clone()]));

        let inside = fact_at(format!("/proj/{}/{}.js", dir, file), None);
        prop_assert!(RuleEvaluator::evaluate(&inside, &rules).is_accept());

        let sibling = fact_at(format!("/proj/{}{}/{}.js", dir, more, file), None);
        prop_assert_eq!(
            RuleEvaluator::evaluate(&sibling, &rules).rejection().map(|r| r.reason),
            Some(RejectReason::ValidPaths)
        );
    }

    /// Same fact, same rules, same verdict.
    #[test]
    fn evaluation_is_deterministic(
        segments in arb_segments(),
        declared in proptest::option::of(arb_name()),
        banned in prop::collection::vec(arb_name(), 0..3),
    ) {
        let path = format!("/proj/{}/x.js", segments.join("/"));
        let rules = rules(
            FenceConfig::rooted("/proj")
                .with_valid_paths(["src"])
                .with_invalid_modules(banned),
        );
        let fact = fact_at(path, declared);
        let first = RuleEvaluator::evaluate(&fact, &rules);
        let second = RuleEvaluator::evaluate(&fact, &rules);
        prop_assert_eq!(first, second);
    }

    /// Recording the same resolved path again never changes its provenance.
    #[test]
    fn record_keeps_first_provenance(
        importers in prop::collection::vec("[a-z]{1,6}", 1..6),
    ) {
        let mut history = ResolutionHistory::new();
        for importer in &importers {
            history.record(&ResolutionFact::imported(
                "/proj/shared.js",
                format!("/proj/{}.js", importer),
                format!("./{}", importer),
            ));
        }
        let entry = history.get(Path::new("/proj/shared.js")).unwrap();
        let expected = format!("/proj/{}.js", importers[0]);
        prop_assert_eq!(entry.importer_path(), Some(Path::new(&expected)));
        prop_assert_eq!(history.len(), 1);
    }
}
