//! Source hygiene budgets for the viewport crate.
//!
//! Scans production sources under `src/` (sibling `*_test.rs` files are
//! skipped) for patterns that crash the host page or swallow errors. Every
//! budget is zero; input guards degrade silently by returning early, and
//! fallible bridge calls log through `tracing` instead of discarding.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    reason: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, reason: "panics on None/Err" },
    Budget { pattern: ".expect(", max: 0, reason: "panics on None/Err" },
    Budget { pattern: "panic!(", max: 0, reason: "aborts the host" },
    Budget { pattern: "unreachable!(", max: 0, reason: "aborts the host" },
    Budget { pattern: "todo!(", max: 0, reason: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, reason: "unfinished stub" },
    Budget { pattern: "let _ =", max: 0, reason: "discards a result unseen" },
    Budget { pattern: ".ok()", max: 0, reason: "drops the error value" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, reason: "hides unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn production_sources(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            production_sources(&path, out);
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if !path_str.ends_with(".rs") || path_str.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|file| (file.path.clone(), file.content.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    assert!(files.iter().any(|f| f.path.ends_with("engine.rs")), "scan did not reach src/engine.rs");
}

#[test]
fn pattern_budgets_hold() {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);

    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = found.iter().map(|(path, c)| format!("    {path}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!("`{}` ({}): found {count}, max {}\n{detail}", budget.pattern, budget.reason, budget.max));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
