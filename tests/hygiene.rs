//! Source hygiene checks over `src/`.
//!
//! Production code runs inside visitors' browsers where a panic takes every
//! page component down with it. Each antipattern below has a budget; a new
//! occurrence has to pay for itself by removing an old one.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics abort the whole wasm instance.
    Budget { pattern: ".unwrap()", max: 0, why: "panics" },
    Budget { pattern: ".expect(", max: 0, why: "panics" },
    Budget { pattern: "panic!(", max: 0, why: "panics" },
    Budget { pattern: "unreachable!(", max: 0, why: "panics" },
    Budget { pattern: "todo!(", max: 0, why: "stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "stub" },
    Budget { pattern: "let _ =", max: 0, why: "silently discards a result" },
    Budget { pattern: ".ok()", max: 0, why: "drops an error without logging it" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

/// Production `.rs` files under `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    files
}

fn collect(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs")
            && !path.to_string_lossy().ends_with("_test.rs")
        {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = found.iter().map(|(p, c)| format!("    {p}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!(
                "{} ({}): found {count}, max {}\n{detail}",
                budget.pattern, budget.why, budget.max
            ));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn listeners_are_only_leaked_by_the_dom_helper() {
    let files = source_files();
    let offenders: Vec<_> = hits(&files, ".forget()")
        .into_iter()
        .filter(|(path, _)| !path.ends_with("dom.rs"))
        .collect();
    assert!(offenders.is_empty(), "Closure::forget outside util/dom.rs: {offenders:?}");
}

#[test]
fn browser_modules_are_feature_gated() {
    let lib = fs::read_to_string("src/lib.rs").unwrap_or_default();
    assert!(lib.contains("#[cfg(feature = \"hydrate\")]\npub mod components;"));
    let util = fs::read_to_string("src/util/mod.rs").unwrap_or_default();
    assert!(util.contains("#[cfg(feature = \"hydrate\")]\npub mod dom;"));
}

#[test]
fn gloo_errors_are_named_through_public_paths() {
    // `gloo_net::error` is private; its `JsError` is not re-exported.
    let files = source_files();
    let offenders = hits(&files, "gloo_net::error");
    assert!(offenders.is_empty(), "private gloo-net module referenced: {offenders:?}");
}
