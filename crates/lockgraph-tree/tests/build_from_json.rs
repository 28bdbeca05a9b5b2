use std::cell::RefCell;
use std::collections::HashSet;
use std::convert::Infallible;
use std::rc::Rc;

use lockgraph_core::json::{parse_lock_table, parse_manifest};
use lockgraph_tree::{build, count_nodes, render_tree, unlink_all, Concurrency, Next, Node, TraversalOptions};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const MANIFEST: &str = r#"{
    "name": "app",
    "version": "0.1.0",
    "dependencies": { "a": "^1.0.0", "b": "^2.0.0" },
    "devDependencies": { "jest": "^29.0.0" },
    "optionalDependencies": { "fsevents": "^2.3.0" }
}"#;

const LOCK_TABLE: &str = r#"{
    "a@^1.0.0": {
        "version": "1.0.1",
        "resolved": "https://registry.yarnpkg.com/a/-/a-1.0.1.tgz#abc",
        "integrity": "sha512-aaa",
        "dependencies": { "b": "^2.0.0", "c": "^3.0.0" }
    },
    "b@^2.0.0": {
        "version": "2.0.2",
        "dependencies": { "a": "^1.0.0" }
    },
    "c@^3.0.0": {
        "version": "3.0.3",
        "dependencies": { "b": "^2.0.0" },
        "optionalDependencies": { "d": "file:../d" }
    },
    "d@file:../d": { "version": "0.0.0" },
    "jest@^29.0.0": { "version": "29.7.0", "dependencies": { "c": "^3.0.0" } },
    "fsevents@^2.3.0": { "version": "2.3.3" }
}"#;

fn tree() -> Node {
    init_tracing();
    let manifest = parse_manifest(MANIFEST).unwrap();
    let table = parse_lock_table(LOCK_TABLE).unwrap();
    build(&manifest, &table).unwrap()
}

#[test]
fn test_json_inputs_build_expected_tree() {
    let root = tree();

    assert_eq!(root.to_string(), "app@0.1.0");
    assert_eq!(root.dependency_names(), vec!["jest", "fsevents", "a", "b"]);

    let a = root.get_dep("a").unwrap();
    let b = root.get_dep("b").unwrap();
    let c = a.get_dep("c").unwrap();
    let d = c.get_dep("d").unwrap();

    assert_eq!(a.get_dep("b"), Some(b.clone()));
    assert_eq!(b.get_dep("a"), Some(a.clone()));
    assert_eq!(root.get_dep("jest").unwrap().get_dep("c"), Some(c.clone()));

    assert_eq!(a.resolved(), Some("https://registry.yarnpkg.com/a/-/a-1.0.1.tgz#abc"));
    assert_eq!(a.integrity(), Some("sha512-aaa"));
    assert_eq!(d.version(), Some("file:../d"));
    assert!(d.optional());

    let required_by: HashSet<Node> = c.required_by().into_iter().collect();
    assert_eq!(required_by, [a.clone(), root.get_dep("jest").unwrap()].into_iter().collect::<HashSet<_>>());

    assert_eq!(count_nodes(&root), 7);
    unlink_all(&root);
}

#[test]
fn test_first_discovery_fixes_address_and_flags() {
    let root = tree();

    // jest comes first in merged order and reaches c before a does
    let c = root.get_dep("a").unwrap().get_dep("c").unwrap();
    assert_eq!(c.address(), "jest:c");
    assert!(!c.dev());

    let jest = root.get_dep("jest").unwrap();
    assert!(jest.dev());
    assert!(root.get_dep("fsevents").unwrap().optional());

    unlink_all(&root);
}

#[test]
fn test_render_marks_repeats() {
    let root = tree();
    let rendered = render_tree(&root);

    assert!(rendered.starts_with("app@0.1.0\n├── jest@29.7.0\n"));
    assert!(rendered.contains("a@1.0.1 (*)"));
    assert!(rendered.contains("d@file:../d"));
    assert_eq!(rendered.lines().filter(|line| !line.ends_with(" (*)")).count(), 7);

    unlink_all(&root);
}

#[test]
fn test_missing_entry_reports_requirer() {
    let manifest = parse_manifest(MANIFEST).unwrap();
    let table = parse_lock_table(r#"{ "jest@^29.0.0": { "version": "29.7.0", "dependencies": { "c": "^3.0.0" } } }"#)
        .unwrap();

    let err = build(&manifest, &table).unwrap_err();
    assert_eq!(
        err.to_string(),
        "c not accessible from jest (no lock entry for c@^3.0.0)"
    );
    assert!(err.suggestion().is_some());
}

#[tokio::test]
async fn test_async_walk_with_configured_concurrency() {
    let root = tree();
    let options: TraversalOptions = serde_json::from_str(r#"{ "concurrency": { "limit": 2 } }"#).unwrap();
    assert_eq!(options.concurrency, Concurrency::Limit(2));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    root.for_each_async_with(&options, move |node, next: Next<Infallible>| {
        let sink = Rc::clone(&sink);
        async move {
            tokio::task::yield_now().await;
            sink.borrow_mut().push(node.name().to_string());
            next.descend().await
        }
    })
    .await
    .unwrap();

    let mut names = seen.borrow().clone();
    names.sort();
    assert_eq!(names, vec!["a", "app", "b", "c", "d", "fsevents", "jest"]);

    unlink_all(&root);
}
