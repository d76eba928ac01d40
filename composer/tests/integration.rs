use blockweb::{BlockError, Catalog, Composition};
use composer::document::{DEFAULT_CSS, DEFAULT_HTML, DEFAULT_JS};
use composer::{
    Anchor, CompositeDocument, ConfigError, DocumentState, FragmentKind, InsertPolicy,
    MergeConfig, MergeError, Merger, Partition, PersistError, Session, SpliceMerger, classify,
    ensure_scaffold, generate_from_composition, persist,
};

const HEADING: &str = "<h1 style='color: #000000;'>Heading</h1>";
const BG_RULE: &str = "body { background-color: #ffffff; }";

fn composition(types: &[&str]) -> Composition {
    let catalog = Catalog::builtin();
    types
        .iter()
        .map(|t| catalog.instantiate(t).expect("builtin element type"))
        .collect()
}

fn generate(types: &[&str], document: &mut CompositeDocument, config: &MergeConfig) {
    let mut blocks = composition(types);
    generate_from_composition(&mut blocks, document, config).expect("merge failed");
}

#[test]
fn classification_heuristic() {
    assert_eq!(classify("  <p>hi</p>"), FragmentKind::Html);
    assert_eq!(classify(BG_RULE), FragmentKind::Css);
    assert_eq!(classify("alert('hi');"), FragmentKind::Js);
    // Listener bodies carry braces and read as CSS.
    assert_eq!(
        classify("document.querySelector('a').addEventListener('click', function() {\n});"),
        FragmentKind::Css
    );
}

#[test]
fn category_classification_routes_listeners_to_js() {
    let mut document = CompositeDocument::default();
    let config = MergeConfig::default().by_category();
    generate(&["onClick"], &mut document, &config);

    assert_eq!(document.css, DEFAULT_CSS);
    assert!(document.js.contains("addEventListener('click'"));
}

#[test]
fn html_fragments_go_after_body_open() {
    let mut document = CompositeDocument::default();
    generate(&["heading", "paragraph"], &mut document, &MergeConfig::default());

    let expected = format!(
        "<body>\n    {}\n    <p style='color: #000000; text-align: left;'>This is a paragraph</p>\n    <!-- HTML content",
        HEADING
    );
    assert!(document.html.contains(&expected), "{}", document.html);
}

#[test]
fn css_is_idempotent_html_is_not() {
    let mut document = CompositeDocument::default();
    let config = MergeConfig::default();

    generate(&["heading", "bgColor"], &mut document, &config);
    let css_after_first = document.css.clone();
    generate(&["heading", "bgColor"], &mut document, &config);

    assert_eq!(document.css, css_after_first);
    assert_eq!(document.css.matches(BG_RULE).count(), 1);
    assert_eq!(document.html.matches(HEADING).count(), 2);
}

#[test]
fn idempotent_policy_skips_present_fragments() {
    let mut document = CompositeDocument::default();
    let config = MergeConfig::default().idempotent();

    generate(&["heading", "bgColor", "alert"], &mut document, &config);
    let first = document.clone();

    let mut blocks = composition(&["heading", "bgColor", "alert"]);
    let report = generate_from_composition(&mut blocks, &mut document, &config).unwrap();

    assert_eq!(document, first);
    assert_eq!(report.skipped, 3);
    assert_eq!(report.html_inserted + report.css_inserted + report.js_inserted, 0);
}

#[test]
fn css_dedup_is_textual() {
    let mut document = CompositeDocument::new(DEFAULT_HTML, "body {background-color: #ffffff;}", DEFAULT_JS);
    generate(&["bgColor"], &mut document, &MergeConfig::default());
    assert!(document.css.ends_with(&format!("\n\n{}", BG_RULE)));
}

#[test]
fn js_goes_inside_ready_wrapper() {
    let mut document = CompositeDocument::default();
    generate(&["alert"], &mut document, &MergeConfig::default());

    assert_eq!(
        document.js,
        "// Wait for the page to load\n\
         document.addEventListener(\"DOMContentLoaded\", function() {\n    \
         console.log(\"Page loaded\");\n    \
         // Generated JavaScript goes here\n    \
         alert('Notice');\n\
         });"
    );
}

#[test]
fn js_without_wrapper_is_dropped() {
    let mut document = CompositeDocument::new(DEFAULT_HTML, DEFAULT_CSS, "console.log('x');");
    let parts = Partition::from_fragments(["alert('hi');"]);
    let report = SpliceMerger::default().merge(&mut document, &parts).unwrap();

    assert_eq!(document.js, "console.log('x');");
    assert_eq!(report.js_dropped, 1);
    assert_eq!(report.js_inserted, 0);
}

#[test]
fn malformed_document_is_left_untouched() {
    let mut document = CompositeDocument::new("<div>no body</div>", DEFAULT_CSS, DEFAULT_JS);
    let before = document.clone();
    assert_eq!(
        document.state(),
        DocumentState::Malformed {
            missing: Anchor::BodyOpen
        }
    );

    let mut blocks = composition(&["heading", "bgColor", "alert"]);
    let err = generate_from_composition(&mut blocks, &mut document, &MergeConfig::default())
        .unwrap_err();

    assert_eq!(err, MergeError::MalformedDocument { missing: Anchor::BodyOpen });
    assert_eq!(document, before);
}

#[test]
fn unclosed_body_is_malformed() {
    let mut document = CompositeDocument::new("<html><body><p>x</p></html>", "", "");
    let parts = Partition::from_fragments([HEADING]);
    let err = SpliceMerger::default().merge(&mut document, &parts).unwrap_err();
    assert_eq!(err, MergeError::MalformedDocument { missing: Anchor::BodyClose });
}

#[test]
fn malformed_html_is_fine_without_html_fragments() {
    let mut document = CompositeDocument::new("", "", DEFAULT_JS);
    generate(&["bgColor"], &mut document, &MergeConfig::default());
    assert_eq!(document.css, BG_RULE);
    assert_eq!(document.html, "");
}

#[test]
fn merge_adds_missing_style_and_script_regions() {
    let mut document = CompositeDocument::new("<html>\n<body>\n</body>\n</html>", "", "");
    assert_eq!(
        document.state(),
        DocumentState::Malformed {
            missing: Anchor::Style
        }
    );

    generate(&["heading"], &mut document, &MergeConfig::default());

    assert_eq!(
        document.html,
        format!(
            "<html>\n<head>\n    <style>\n    </style>\n</head>\n<body>\n    {}\n    <script>\n    </script>\n</body>\n</html>",
            HEADING
        )
    );
    assert_eq!(document.state(), DocumentState::WellFormed);
}

#[test]
fn missing_script_region_is_reported() {
    let document = CompositeDocument::new(
        "<html>\n<head><style></style></head>\n<body>\n</body>\n</html>",
        "",
        "",
    );
    assert_eq!(
        document.state(),
        DocumentState::Malformed {
            missing: Anchor::Script
        }
    );
}

#[test]
fn scaffold_adds_head_with_style() {
    let document = CompositeDocument::new("<html>\n<body>\n<p>hi</p>\n</body>\n</html>", "", "");
    let document = ensure_scaffold(document);
    assert_eq!(
        document.html,
        "<html>\n<head>\n    <style>\n    </style>\n</head>\n<body>\n<p>hi</p>\n    <script>\n    </script>\n</body>\n</html>"
    );
}

#[test]
fn scaffold_wraps_bare_content() {
    let document = ensure_scaffold(CompositeDocument::new("<p>hi</p>", "", ""));
    assert!(document.html.starts_with("<!DOCTYPE html>"));
    assert!(document.html.contains("<body>\n<p>hi</p>\n    <script>"));
    assert!(document.is_well_formed());
}

#[test]
fn scaffold_keeps_complete_documents() {
    let document = ensure_scaffold(CompositeDocument::default());
    assert_eq!(document.html, DEFAULT_HTML);
}

#[test]
fn save_load_round_trip() {
    let css = "\n  .a { color: red; }\n\n";
    let js = "document.addEventListener(\"DOMContentLoaded\", function() {\n});\n";
    let document = CompositeDocument::new(DEFAULT_HTML, css, js);

    let saved = persist::save(&document);
    let loaded = persist::load(&saved);

    assert_eq!(loaded.css, css);
    assert_eq!(loaded.js, js);
    assert_eq!(loaded.html, saved);
    assert_eq!(persist::save(&loaded), saved);
}

#[test]
fn load_without_anchors() {
    let loaded = persist::load("<p>plain</p>");
    assert_eq!(loaded.html, "<p>plain</p>");
    assert_eq!(loaded.css, "");
    assert_eq!(loaded.js, "");
}

#[test]
fn save_scaffolds_missing_anchors() {
    let document = CompositeDocument::new("<html>\n<body>\n</body>\n</html>", "p { margin: 0; }", "go();");
    let saved = persist::save(&document);
    assert!(saved.contains("<style>\np { margin: 0; }\n</style>"));
    assert!(saved.contains("<script>\ngo();\n</script>"));
}

#[test]
fn preview_targets_last_script() {
    let html = "<html>\n<head>\n<style></style>\n<script>lib();</script>\n</head>\n<body>\n<script></script>\n</body>\n</html>";
    let document = CompositeDocument::new(html, "b { c: d; }", "run();");

    let preview = persist::preview_html(&document);
    assert!(preview.contains("<script>lib();</script>"));
    assert!(preview.contains("<body>\n<script>\nrun();\n</script>"));

    let saved = persist::save(&document);
    assert!(saved.contains("<script>\nrun();\n</script>\n</head>"));
}

#[test]
fn script_marker_inside_css_survives_save() {
    let css = "/* injected by <script> tags */\np { color: red; }";
    let document = CompositeDocument::new(DEFAULT_HTML, css, "go();");

    let saved = persist::save(&document);
    assert!(saved.contains("</style>"));
    assert!(saved.contains("<body>\n    <!-- HTML content"));
    assert!(saved.contains("<script>\ngo();\n</script>"));

    let loaded = persist::load(&saved);
    assert_eq!(loaded.css, css);
    assert_eq!(loaded.js, "go();");
    assert_eq!(persist::save(&loaded), saved);

    let preview = persist::preview_html(&document);
    assert!(preview.contains(&format!("<style>\n{}\n</style>", css)));
    assert!(preview.contains("<body>\n    <!-- HTML content"));
    assert!(preview.contains("<script>\ngo();\n</script>"));
}

#[test]
fn save_and_load_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");

    let mut document = CompositeDocument::default();
    generate(&["heading", "bgColor", "alert"], &mut document, &MergeConfig::default());
    persist::save_to_path(&document, &path).unwrap();

    let loaded = persist::load_from_path(&path).unwrap();
    assert_eq!(loaded.css, document.css);
    assert_eq!(loaded.js, document.js);
    assert!(loaded.html.contains(HEADING));
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = persist::load_from_path(&dir.path().join("absent.html")).unwrap_err();
    assert!(matches!(err, PersistError::Read { .. }));
}

#[test]
fn merge_config_from_toml() {
    let config = MergeConfig::from_toml_str("policy = \"idempotent\"\nindent = \"\\t\"\n").unwrap();
    assert_eq!(config.policy, InsertPolicy::Idempotent);
    assert_eq!(config.indent, "\t");
    assert_eq!(config.ready_close, "});");

    let err = MergeConfig::from_toml_str("polcy = \"append\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn merge_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blockweb.toml");
    std::fs::write(&path, "classification = \"category\"\n").unwrap();

    let config = MergeConfig::load(&path).unwrap();
    assert_eq!(config, MergeConfig::default().by_category());
}

#[test]
fn session_flow() {
    let mut session = Session::new(Catalog::builtin(), MergeConfig::default());
    assert_eq!(session.drop_block("heading").unwrap(), 0);
    assert_eq!(session.drop_block("alert").unwrap(), 1);
    assert!(matches!(
        session.drop_block("marquee"),
        Err(BlockError::UnknownElementType(_))
    ));

    let fragment = session.on_parameter_edited(0, "text", "Hi").unwrap();
    assert_eq!(fragment, "<h1 style='color: #000000;'>Hi</h1>");

    // Unknown names are ignored, not fatal.
    let fragment = session.on_parameter_edited(0, "font", "serif").unwrap();
    assert_eq!(fragment, "<h1 style='color: #000000;'>Hi</h1>");

    assert_eq!(
        session.on_parameter_edited(5, "text", "x"),
        Err(BlockError::IndexOutOfRange { index: 5, len: 2 })
    );

    let document = session.on_composition_changed().unwrap();
    assert!(document.html.contains("<h1 style='color: #000000;'>Hi</h1>"));
    assert!(document.js.contains("    alert('Notice');\n});"));
    assert_eq!(session.last_report().unwrap().js_inserted, 1);

    let (html, css, js) = session.preview();
    assert_eq!((html, css, js), session.document().buffers());
    assert!(session.preview_html().contains("alert('Notice');"));
}

#[test]
fn session_checked_edit_and_duplicate() {
    let mut session = Session::new(Catalog::builtin(), MergeConfig::default());
    session.drop_block("fontSize").unwrap();
    assert_eq!(
        session.edit_parameter_checked(0, "size", "4").unwrap(),
        "body { font-size: 8px; }"
    );
    assert!(session.edit_parameter_checked(0, "size", "huge").is_err());

    let copy = session.duplicate_block(0).unwrap();
    session.on_parameter_edited(copy, "selector", "h1").unwrap();
    assert_eq!(session.composition().len(), 2);
    assert_eq!(
        session.composition().get(0).unwrap().parameter("selector"),
        Some(&blockweb::ParamValue::from("body"))
    );

    session.remove_block(0).unwrap();
    assert_eq!(session.composition().len(), 1);
}

#[test]
fn session_open_save_and_reset() {
    let mut session = Session::new(Catalog::builtin(), MergeConfig::default());
    session.drop_block("bgColor").unwrap();
    session.on_composition_changed().unwrap();
    let saved = session.save();

    let mut other = Session::new(Catalog::builtin(), MergeConfig::default());
    other.drop_block("heading").unwrap();
    other.open(&saved);
    assert!(other.composition().is_empty());
    assert_eq!(other.document().css, session.document().css);

    other.new_document();
    assert_eq!(other.document(), &CompositeDocument::default());
    assert!(other.last_report().is_none());
}

#[test]
fn session_reports_dropped_js() {
    let document = CompositeDocument::new(DEFAULT_HTML, DEFAULT_CSS, "");
    let mut session = Session::with_document(Catalog::builtin(), MergeConfig::default(), document);
    session.drop_block("alert").unwrap();

    let document = session.on_composition_changed().unwrap();
    assert_eq!(document.js, "");
    let report = session.last_report().unwrap();
    assert_eq!(report.js_dropped, 1);
    assert_eq!(report.js_inserted, 0);
}
