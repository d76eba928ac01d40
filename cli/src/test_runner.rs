use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use blockweb::Catalog;
use blockweb::manifest::{BlockEntry, build_composition};
use composer::document::{DEFAULT_CSS, DEFAULT_HTML, DEFAULT_JS};
use composer::{Classification, CompositeDocument, InsertPolicy, MergeConfig, generate_from_composition};

const CASE_SUFFIX: &str = ".case.html";

#[derive(Debug, Deserialize)]
pub struct ExpectedOccurrences {
    /// Exact text to count in the HTML buffer.
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    /// Human-readable fixture description.
    #[serde(default)]
    pub description: Option<String>,

    /// Initial CSS buffer. Defaults to the starter stylesheet.
    #[serde(default)]
    pub css: Option<String>,

    /// Initial JS buffer. Defaults to the DOM-ready wrapper.
    #[serde(default)]
    pub js: Option<String>,

    #[serde(default)]
    pub policy: InsertPolicy,

    #[serde(default)]
    pub classification: Classification,

    /// Number of generate passes over the same composition.
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Composition entries, same shape as a manifest's `[[block]]`.
    #[serde(default)]
    pub block: Vec<BlockEntry>,

    /// The manifest or merge error's Display string must contain this.
    /// A failed merge must also leave the buffers untouched.
    #[serde(default)]
    pub expect_error: Option<String>,

    #[serde(default)]
    pub expect_html_contains: Vec<String>,

    #[serde(default)]
    pub expect_css_contains: Vec<String>,

    #[serde(default)]
    pub expect_js_contains: Vec<String>,

    #[serde(default)]
    pub expect_occurrences: Vec<ExpectedOccurrences>,

    /// Exact CSS buffer after the runs (trimmed comparison).
    #[serde(default)]
    pub expect_css: Option<String>,

    /// Exact JS buffer after the runs (trimmed comparison).
    #[serde(default)]
    pub expect_js: Option<String>,
}

fn default_runs() -> usize {
    1
}

/// Parse a `.case.html` file into its TOML config and initial HTML buffer.
fn parse_case_file(content: &str) -> Result<(CaseConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    if !content.starts_with("---") {
        return Err("missing opening --- frontmatter delimiter".into());
    }

    let after_open = &content[3..];
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + 4..];
    let html = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: CaseConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, html))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

fn run_single_case(path: &Path) -> TestResult {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("cannot read file: {}", e)),
            };
        }
    };

    let (config, html) = match parse_case_file(&content) {
        Ok(pair) => pair,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("frontmatter error: {}", e)),
            };
        }
    };

    let description = config.description.clone();
    let outcome = match check_case(&config, html) {
        None => TestOutcome::Pass,
        Some(reason) => TestOutcome::Fail(reason),
    };
    TestResult {
        path: path.to_path_buf(),
        description,
        outcome,
    }
}

/// Build, merge and check one fixture. Returns `Some(reason)` on failure.
fn check_case(config: &CaseConfig, html: &str) -> Option<String> {
    let html = if html.trim().is_empty() { DEFAULT_HTML } else { html };
    let mut document = CompositeDocument::new(
        html,
        config.css.as_deref().unwrap_or(DEFAULT_CSS),
        config.js.as_deref().unwrap_or(DEFAULT_JS),
    );
    let merge_config = MergeConfig {
        policy: config.policy,
        classification: config.classification,
        ..MergeConfig::default()
    };

    let mut composition = match build_composition(&config.block, &Catalog::builtin(), 0) {
        Ok((composition, _warnings)) => composition,
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            let joined = messages.join("; ");
            return match &config.expect_error {
                Some(expected) if joined.contains(expected.as_str()) => None,
                Some(expected) => Some(format!(
                    "expected error containing \"{}\", got: {}",
                    expected, joined
                )),
                None => Some(format!("unexpected manifest error: {}", joined)),
            };
        }
    };

    for run in 0..config.runs {
        let before = document.clone();
        match generate_from_composition(&mut composition, &mut document, &merge_config) {
            Ok(_) => {}
            Err(err) => {
                let err_str = err.to_string();
                return match &config.expect_error {
                    Some(expected) if !err_str.contains(expected.as_str()) => Some(format!(
                        "expected error containing \"{}\", got: {}",
                        expected, err_str
                    )),
                    Some(_) if document != before => {
                        Some(format!("run {}: document changed despite error", run + 1))
                    }
                    Some(_) => None,
                    None => Some(format!("run {}: unexpected merge error: {}", run + 1, err_str)),
                };
            }
        }
    }

    if let Some(expected) = &config.expect_error {
        return Some(format!(
            "expected error containing \"{}\", but generation succeeded",
            expected
        ));
    }

    check_buffers(config, &document)
}

fn check_buffers(config: &CaseConfig, document: &CompositeDocument) -> Option<String> {
    let buffers = [
        ("html", &config.expect_html_contains, &document.html),
        ("css", &config.expect_css_contains, &document.css),
        ("js", &config.expect_js_contains, &document.js),
    ];
    for (name, needles, buffer) in buffers {
        for needle in needles {
            if !buffer.contains(needle.as_str()) {
                return Some(format!(
                    "{} buffer does not contain \"{}\"\n  actual:\n{}",
                    name, needle, buffer
                ));
            }
        }
    }

    for expected in &config.expect_occurrences {
        let actual = document.html.matches(expected.text.as_str()).count();
        if actual != expected.count {
            return Some(format!(
                "expected {} occurrence(s) of \"{}\" in html, got {}",
                expected.count, expected.text, actual
            ));
        }
    }

    let exact = [
        ("css", &config.expect_css, &document.css),
        ("js", &config.expect_js, &document.js),
    ];
    for (name, expected, actual) in exact {
        if let Some(expected) = expected {
            if expected.trim() != actual.trim() {
                return Some(format!(
                    "{} mismatch\n  expected: {}\n  actual:   {}",
                    name,
                    expected.trim(),
                    actual.trim()
                ));
            }
        }
    }

    None
}

/// Discover `.case.html` files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_cases(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_cases(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_cases(&path, root, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(CASE_SUFFIX) {
                let category = path
                    .parent()
                    .and_then(|p| p.strip_prefix(root).ok())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                out.entry(category).or_default().push(path);
            }
        }
    }
}

pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", CASE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        let label = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!("  {} ({} cases)", label, files.len());
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

fn label_for<'a>(result: &'a TestResult) -> &'a str {
    result.description.as_deref().unwrap_or_else(|| {
        result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.trim_end_matches(CASE_SUFFIX))
            .unwrap_or("?")
    })
}

fn print_failures(failures: &[TestResult]) {
    if failures.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("failures:");
    for f in failures {
        eprintln!();
        eprintln!("  --- {} ---", f.path.display());
        if let TestOutcome::Fail(reason) = &f.outcome {
            for line in reason.lines() {
                eprintln!("  {}", line);
            }
        }
    }
}

fn print_summary(passed: usize, failed: usize, no_color: bool) -> i32 {
    eprintln!();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("test result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let bad = if no_color { "FAILED" } else { "\x1b[31mFAILED\x1b[0m" };
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            bad,
            passed,
            failed,
            passed + failed
        );
        1
    }
}

/// Run all `.case.html` files under `path` (or a single file).
/// If `categories` is non-empty, only run cases in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let run_categories: BTreeMap<String, Vec<PathBuf>> = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        let all_categories = discover_categorized(path);
        if all_categories.is_empty() {
            eprintln!("no {} files found in {}", CASE_SUFFIX, path.display());
            return 1;
        }
        filter_categories(all_categories, categories)
    };

    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &run_categories {
        if !path.is_file() {
            let header = if cat.is_empty() { "(root)" } else { cat.as_str() };
            eprintln!();
            eprintln!("{}", bold(header, no_color));
        }

        for file in files {
            let result = run_single_case(file);
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", pass_label(no_color), label_for(&result));
                }
                TestOutcome::Fail(_) => {
                    failed += 1;
                    eprintln!("  {}  {}", fail_label(no_color), label_for(&result));
                    failures.push(result);
                }
            }
        }
    }

    print_failures(&failures);
    print_summary(passed, failed, no_color)
}

fn filter_categories(
    all_categories: BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<String, Vec<PathBuf>> {
    if requested.is_empty() {
        return all_categories;
    }
    let mut filtered = BTreeMap::new();
    for requested in requested {
        let req = requested.trim_matches('/');
        let mut found = false;
        for (cat, files) in &all_categories {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                filtered.insert(cat.clone(), files.clone());
                found = true;
            }
        }
        if !found {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all_categories
                    .keys()
                    .map(|k| if k.is_empty() { "(root)" } else { k.as_str() })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    filtered
}
