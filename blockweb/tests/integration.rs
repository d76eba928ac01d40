use blockweb::manifest::ManifestParser;
use blockweb::render::interaction::ACTION_PRESETS;
use blockweb::schema::schema_for;
use blockweb::{
    BlockDefinition, BlockError, Catalog, Category, Composition, ParamValue, Parameters,
    SchemaError,
};

fn block(element_type: &str) -> blockweb::BlockInstance {
    Catalog::builtin()
        .instantiate(element_type)
        .expect("builtin element type")
}

fn render_with(element_type: &str, edits: &[(&str, &str)]) -> String {
    let mut instance = block(element_type);
    for (name, value) in edits {
        instance.set_parameter(name, *value).expect("known parameter");
    }
    instance.render()
}

fn build(source: &str) -> Result<(Composition, Vec<blockweb::manifest::ManifestError>), Vec<String>> {
    let manifest = ManifestParser::new(source.to_string(), 0)
        .parse()
        .map_err(|errs| errs.into_iter().map(|e| e.message).collect::<Vec<_>>())?;
    manifest
        .build(&Catalog::builtin())
        .map_err(|errs| errs.into_iter().map(|e| e.message).collect())
}

#[test]
fn heading_with_edited_parameters() {
    let html = render_with(
        "heading",
        &[("text", "Hello"), ("level", "1"), ("color", "#112233")],
    );
    assert_eq!(html, "<h1 style='color: #112233;'>Hello</h1>");
}

#[test]
fn shadow_with_edited_parameters() {
    let css = render_with(
        "shadow",
        &[
            ("selector", ".card"),
            ("horizontal", "0"),
            ("vertical", "4"),
            ("blur", "8"),
            ("color", "rgba(0,0,0,0.1)"),
        ],
    );
    assert_eq!(css, ".card { box-shadow: 0px 4px 8px rgba(0,0,0,0.1); }");
}

#[test]
fn fresh_instances_render_schema_defaults() {
    assert_eq!(
        block("paragraph").render(),
        "<p style='color: #000000; text-align: left;'>This is a paragraph</p>"
    );
    assert_eq!(block("heading").render(), "<h1 style='color: #000000;'>Heading</h1>");
    assert_eq!(block("margin").render(), "* { margin: 10px 10px 10px 10px; }");
    assert_eq!(
        block("onHover").render(),
        "document.querySelector('.hoverable').addEventListener('mouseover', function() {\n    this.style.backgroundColor = '#f0f0f0';\n});"
    );

    let mut params = Parameters::new();
    params.insert("label".into(), ParamValue::from("New"));
    let badge = BlockDefinition::custom(
        "Badge",
        Category::Structure,
        "badge",
        "<span class='badge'>{{label}}</span>",
        params,
    );
    assert_eq!(badge.instantiate().render(), "<span class='badge'>New</span>");
}

#[test]
fn builtin_catalog_layout() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.len(), 20);

    let structure: Vec<&str> = catalog
        .list_by_category(Category::Structure)
        .iter()
        .map(|d| d.element_type.as_str())
        .collect();
    assert_eq!(
        structure,
        ["heading", "paragraph", "button", "image", "link", "container", "list"]
    );
    assert_eq!(catalog.list_by_category(Category::Style).len(), 6);
    assert_eq!(catalog.list_by_category(Category::Interaction).len(), 7);

    let heading = catalog.get("heading").unwrap();
    assert_eq!(heading.name, "Add heading");
    assert_eq!(heading.color, Category::Structure.color());
    assert!(heading.has_rule());
}

#[test]
fn unknown_element_type() {
    let err = Catalog::builtin().instantiate("marquee").unwrap_err();
    assert_eq!(err, BlockError::UnknownElementType("marquee".into()));
}

#[test]
fn duplicate_is_independent() {
    let original = block("heading");
    let mut copy = original.duplicate();
    copy.set_parameter("text", "Changed").unwrap();

    assert_eq!(original.parameter("text"), Some(&ParamValue::from("Heading")));
    assert_eq!(copy.parameter("text"), Some(&ParamValue::from("Changed")));
    assert!(copy.render().contains("Changed"));
}

#[test]
fn unknown_parameter_is_rejected() {
    let mut instance = block("heading");
    let before = instance.parameters().clone();
    let err = instance.set_parameter("font", "serif").unwrap_err();
    assert!(matches!(err, BlockError::UnknownParameter { ref name, .. } if name == "font"));
    assert_eq!(instance.parameters(), &before);
}

#[test]
fn set_parameter_does_not_coerce() {
    let mut instance = block("fontSize");
    instance.set_parameter("size", "big").unwrap();
    assert_eq!(instance.parameter("size"), Some(&ParamValue::from("big")));
    assert_eq!(instance.render(), "body { font-size: bigpx; }");
}

#[test]
fn placeholder_template_without_rule() {
    let mut params = Parameters::new();
    params.insert("label".into(), ParamValue::from("New"));
    let definition = BlockDefinition::custom(
        "Badge",
        Category::Structure,
        "badge",
        "<span class='badge'>{{label}}</span>",
        params,
    );
    assert!(!definition.has_rule());

    let mut instance = definition.instantiate();
    instance.set_parameter("label", "Sale").unwrap();
    assert_eq!(instance.try_render().unwrap(), "<span class='badge'>Sale</span>");
    // The stored template keeps its placeholder.
    assert_eq!(instance.template(), "<span class='badge'>{{label}}</span>");
}

#[test]
fn unsupported_element_type_falls_back_to_template() {
    let definition = BlockDefinition::custom(
        "Divider",
        Category::Structure,
        "divider",
        "<hr>",
        Parameters::new(),
    );
    let mut instance = definition.instantiate();
    assert_eq!(
        instance.try_render(),
        Err(BlockError::UnsupportedElementType("divider".into()))
    );
    assert_eq!(instance.render(), "<hr>");
}

#[test]
fn rule_overrides_custom_template() {
    let definition = BlockDefinition::custom(
        "Title",
        Category::Structure,
        "heading",
        "<h1>{{text}}</h1>",
        schema_for("heading").unwrap().default_parameters(),
    );
    let mut instance = definition.instantiate();
    assert_eq!(instance.render(), "<h1 style='color: #000000;'>Heading</h1>");
    assert_eq!(instance.template(), "<h1 style='color: #000000;'>Heading</h1>");
}

#[test]
fn structure_rules() {
    assert_eq!(
        render_with("image", &[("src", "cat.png"), ("alt", "Cat"), ("width", "")]),
        "<img src='cat.png' alt='Cat'>"
    );
    assert_eq!(
        render_with("link", &[("href", "https://example.com"), ("text", "Go")]),
        "<a href='https://example.com' target='_blank'>Go</a>"
    );
    assert_eq!(
        render_with("container", &[("tag", "section"), ("content", "<p>x</p>")]),
        "<section class='container' style='background-color: #f8f9fa; padding: 20px;'><p>x</p></section>"
    );
    assert_eq!(
        render_with("button", &[("size", "large")]),
        "<button style='background-color: #007bff; color: #ffffff; font-size: 20px; padding: 8px 16px; border: none; border-radius: 4px;'>Click me</button>"
    );
}

#[test]
fn list_skips_empty_items() {
    let mut instance = block("list");
    instance
        .set_parameter("items", vec!["One".to_string(), " ".to_string(), "Two".to_string()])
        .unwrap();
    instance.set_parameter("type", "ol").unwrap();
    assert_eq!(instance.render(), "<ol>\n    <li>One</li>\n    <li>Two</li>\n</ol>");
}

#[test]
fn style_rules() {
    assert_eq!(
        render_with("bgColor", &[("color", "#ff0000"), ("opacity", "50")]),
        "body { background-color: rgba(255, 0, 0, 0.50); }"
    );
    assert_eq!(
        render_with("margin", &[("uniform", "true"), ("top", "5")]),
        "* { margin: 5px; }"
    );
    assert_eq!(
        render_with("borderRadius", &[("separate", "true"), ("topLeft", "1")]),
        ".container { border-radius: 1px 4px 4px 4px; }"
    );
    assert_eq!(
        render_with("shadow", &[("selector", " "), ("inset", "yes")]),
        "* { box-shadow: 0px 4px 8px rgba(0,0,0,0.1) inset; }"
    );
}

#[test]
fn interaction_rules() {
    assert_eq!(
        render_with("onClick", &[("selector", "#go"), ("action", "alert('hi');")]),
        "document.querySelector('#go').addEventListener('click', function() {\n    alert('hi');\n});"
    );
    assert_eq!(
        render_with("alert", &[("message", "Sure?"), ("kind", "confirm")]),
        "confirm('Sure?');"
    );
    assert_eq!(
        render_with("setText", &[("text", "<b>x</b>"), ("mode", "html")]),
        "document.querySelector('#target').innerHTML = '<b>x</b>';"
    );
    assert_eq!(
        render_with("hide", &[]),
        "document.querySelector('.hidden').style.display = 'none';"
    );
    assert!(render_with("show", &[("effect", "fade")]).contains("transition = 'opacity 0.3s'"));
    assert!(ACTION_PRESETS.iter().any(|(_, body)| *body == "alert('Hello World!');"));
}

#[test]
fn checked_edits_are_normalized() {
    let mut instance = block("fontSize");
    instance.set_parameter_checked("size", "100").unwrap();
    assert_eq!(instance.parameter("size"), Some(&ParamValue::Number(72.0)));

    let err = instance.set_parameter_checked("unit", "pt").unwrap_err();
    assert!(matches!(
        err,
        BlockError::Schema(SchemaError::InvalidOption { ref value, .. }) if value == "pt"
    ));

    let mut list = block("list");
    list.set_parameter_checked("items", "a\n\nb").unwrap();
    assert_eq!(list.parameter("items"), Some(&ParamValue::from(&["a", "b"][..])));
}

#[test]
fn composition_operations() {
    let catalog = Catalog::builtin();
    let mut composition: Composition = ["heading", "paragraph"]
        .iter()
        .map(|t| catalog.instantiate(t).unwrap())
        .collect();

    let copy = composition.duplicate(0).unwrap();
    assert_eq!(copy, 2);
    composition.set_parameter(copy, "text", "Copy").unwrap();
    assert_eq!(
        composition.get(0).unwrap().parameter("text"),
        Some(&ParamValue::from("Heading"))
    );

    assert_eq!(
        composition.remove(7).unwrap_err(),
        BlockError::IndexOutOfRange { index: 7, len: 3 }
    );
    let removed = composition.remove(1).unwrap();
    assert_eq!(removed.element_type, "paragraph");
    assert_eq!(composition.render_all().len(), 2);
}

#[test]
fn manifest_builds_composition() {
    let source = r##"
[[block]]
type = "heading"
[block.params]
text = "Welcome"
level = 2

[[block]]
type = "fontSize"
[block.params]
size = 200
unit = "rem"
"##;
    let (mut composition, warnings) = build(source).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(
        composition.render_all(),
        [
            "<h2 style='color: #000000;'>Welcome</h2>",
            "body { font-size: 72rem; }",
        ]
    );
}

#[test]
fn manifest_unknown_parameter_is_a_warning() {
    let source = "[[block]]\ntype = \"heading\"\n[block.params]\nsize = 3\n";
    let (composition, warnings) = build(source).unwrap();
    assert_eq!(composition.len(), 1);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].is_warning());
    assert!(warnings[0].message.contains("'size'"));

    let key = source.find("size").unwrap();
    assert_eq!(warnings[0].span, key..key + "size".len());
}

#[test]
fn manifest_parameter_errors_point_at_the_key() {
    let source = "[[block]]\ntype = \"heading\"\n[block.params]\ntext = \"Hi\"\nlevel = 9\n";
    let manifest = ManifestParser::new(source.to_string(), 0).parse().unwrap();
    let errors = manifest.build(&Catalog::builtin()).unwrap_err();
    assert_eq!(errors.len(), 1);

    let key = source.find("level").unwrap();
    assert_eq!(errors[0].span, key..key + "level".len());
}

#[test]
fn manifest_errors() {
    let errors = build("[[block]]\ntype = \"marquee\"\n").unwrap_err();
    assert_eq!(errors, ["unknown element type: marquee"]);

    let errors = build("[[block]]\ntype = \"heading\"\n[block.params]\nlevel = 9\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("level"));

    assert!(build("[[block]\ntype = ").is_err());
}
