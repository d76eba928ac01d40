use crate::catalog::Category;
use crate::error::SchemaError;
use crate::render::{GenerationRule, interaction, structure, style};
use crate::value::{ParamValue, Parameters};

/// The kind of an editable parameter and its constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Text,
    Multiline,
    Number {
        min: f64,
        max: f64,
        step: f64,
        decimals: u8,
    },
    Choice(&'static [&'static str]),
    Color,
    Boolean,
    TextList,
}

impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Text => "text",
            ParamKind::Multiline => "multiline",
            ParamKind::Number { .. } => "number",
            ParamKind::Choice(_) => "enum",
            ParamKind::Color => "color",
            ParamKind::Boolean => "boolean",
            ParamKind::TextList => "list-of-text",
        }
    }
}

/// Default value of a parameter, in a form that can live in a static table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Text(&'static str),
    Number(f64),
    Bool(bool),
    List(&'static [&'static str]),
}

impl DefaultValue {
    pub fn to_value(&self) -> ParamValue {
        match self {
            DefaultValue::Text(s) => ParamValue::Text(s.to_string()),
            DefaultValue::Number(n) => ParamValue::Number(*n),
            DefaultValue::Bool(b) => ParamValue::Bool(*b),
            DefaultValue::List(items) => ParamValue::from(*items),
        }
    }
}

/// One editable parameter of an element type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: DefaultValue,
}

impl ParamSpec {
    const fn text(name: &'static str, default: &'static str) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Text,
            default: DefaultValue::Text(default),
        }
    }

    const fn multiline(name: &'static str, default: &'static str) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Multiline,
            default: DefaultValue::Text(default),
        }
    }

    const fn color(name: &'static str, default: &'static str) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Color,
            default: DefaultValue::Text(default),
        }
    }

    const fn choice(
        name: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Choice(options),
            default: DefaultValue::Text(default),
        }
    }

    const fn number(name: &'static str, min: f64, max: f64, default: f64) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Number {
                min,
                max,
                step: 1.0,
                decimals: 0,
            },
            default: DefaultValue::Number(default),
        }
    }

    const fn decimal(name: &'static str, min: f64, max: f64, step: f64, default: f64) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Number {
                min,
                max,
                step,
                decimals: 1,
            },
            default: DefaultValue::Number(default),
        }
    }

    const fn flag(name: &'static str, default: bool) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::Boolean,
            default: DefaultValue::Bool(default),
        }
    }

    const fn list(name: &'static str, default: &'static [&'static str]) -> Self {
        ParamSpec {
            name,
            kind: ParamKind::TextList,
            default: DefaultValue::List(default),
        }
    }

    /// Coerce `value` into this parameter's domain the way an editor widget
    /// would: numbers are clamped and rounded, enum values must be listed.
    pub fn normalize(&self, value: ParamValue) -> Result<ParamValue, SchemaError> {
        match self.kind {
            ParamKind::Text | ParamKind::Multiline | ParamKind::Color => match value {
                ParamValue::List(_) => Err(self.mismatch("text", &value)),
                other => Ok(ParamValue::Text(other.as_text().into_owned())),
            },
            ParamKind::Number {
                min, max, decimals, ..
            } => {
                let n = value
                    .as_number()
                    .ok_or_else(|| self.mismatch("a number", &value))?;
                let scale = 10f64.powi(decimals as i32);
                Ok(ParamValue::Number((n.clamp(min, max) * scale).round() / scale))
            }
            ParamKind::Choice(options) => {
                let text = value.as_text();
                if options.contains(&text.as_ref()) {
                    Ok(ParamValue::Text(text.into_owned()))
                } else {
                    Err(SchemaError::InvalidOption {
                        name: self.name.to_string(),
                        value: text.into_owned(),
                        options: options.join(", "),
                    })
                }
            }
            ParamKind::Boolean => match &value {
                ParamValue::Bool(b) => Ok(ParamValue::Bool(*b)),
                ParamValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" | "on" => Ok(ParamValue::Bool(true)),
                    "false" | "0" | "no" | "off" | "" => Ok(ParamValue::Bool(false)),
                    _ => Err(self.mismatch("a boolean", &value)),
                },
                ParamValue::Number(n) => Ok(ParamValue::Bool(*n != 0.0)),
                ParamValue::List(_) => Err(self.mismatch("a boolean", &value)),
            },
            ParamKind::TextList => Ok(ParamValue::List(value.as_list())),
        }
    }

    fn mismatch(&self, expected: &'static str, got: &ParamValue) -> SchemaError {
        SchemaError::TypeMismatch {
            name: self.name.to_string(),
            expected,
            got: got.type_name().to_string(),
        }
    }
}

/// Parameter contract and generation rule of one element type.
#[derive(Debug, Clone, Copy)]
pub struct ElementSchema {
    pub element_type: &'static str,
    pub category: Category,
    pub rule: GenerationRule,
    pub params: &'static [ParamSpec],
}

impl ElementSchema {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Fresh value map holding every parameter's default, in schema order.
    pub fn default_parameters(&self) -> Parameters {
        self.params
            .iter()
            .map(|p| (p.name.to_string(), p.default.to_value()))
            .collect()
    }

    pub fn normalize(&self, name: &str, value: ParamValue) -> Result<ParamValue, SchemaError> {
        let spec = self.param(name).ok_or_else(|| SchemaError::UnknownParameter {
            element_type: self.element_type.to_string(),
            name: name.to_string(),
        })?;
        spec.normalize(value)
    }
}

const HEADING_LEVELS: &[&str] = &["1", "2", "3", "4", "5", "6"];
const ALIGNMENTS: &[&str] = &["left", "center", "right", "justify"];
const BUTTON_SIZES: &[&str] = &["small", "medium", "large"];
const LINK_TARGETS: &[&str] = &["_self", "_blank", "_parent", "_top"];
const CONTAINER_TAGS: &[&str] = &["div", "section", "article", "header", "footer", "main", "nav"];
const LIST_TYPES: &[&str] = &["ul", "ol"];
const FONT_UNITS: &[&str] = &["px", "em", "rem", "%"];
const ALERT_KINDS: &[&str] = &["alert", "confirm", "prompt"];
const CONTENT_MODES: &[&str] = &["text", "html", "value"];
const DISPLAY_MODES: &[&str] = &["block", "inline", "inline-block", "flex", "grid"];
const EFFECTS: &[&str] = &["none", "fade"];

/// Every element type with a dedicated generation rule, grouped by category.
pub static SCHEMAS: &[ElementSchema] = &[
    // Structure
    ElementSchema {
        element_type: "heading",
        category: Category::Structure,
        rule: structure::heading,
        params: &[
            ParamSpec::text("text", "Heading"),
            ParamSpec::choice("level", HEADING_LEVELS, "1"),
            ParamSpec::color("color", "#000000"),
        ],
    },
    ElementSchema {
        element_type: "paragraph",
        category: Category::Structure,
        rule: structure::paragraph,
        params: &[
            ParamSpec::multiline("text", "This is a paragraph"),
            ParamSpec::color("color", "#000000"),
            ParamSpec::choice("align", ALIGNMENTS, "left"),
        ],
    },
    ElementSchema {
        element_type: "button",
        category: Category::Structure,
        rule: structure::button,
        params: &[
            ParamSpec::text("text", "Click me"),
            ParamSpec::color("color", "#ffffff"),
            ParamSpec::color("bgcolor", "#007bff"),
            ParamSpec::choice("size", BUTTON_SIZES, "medium"),
        ],
    },
    ElementSchema {
        element_type: "image",
        category: Category::Structure,
        rule: structure::image,
        params: &[
            ParamSpec::text("src", "https://example.com/image.jpg"),
            ParamSpec::text("alt", "Image description"),
            ParamSpec::text("width", "300"),
            ParamSpec::text("height", ""),
        ],
    },
    ElementSchema {
        element_type: "link",
        category: Category::Structure,
        rule: structure::link,
        params: &[
            ParamSpec::text("href", "https://example.com"),
            ParamSpec::text("text", "Visit website"),
            ParamSpec::choice("target", LINK_TARGETS, "_blank"),
        ],
    },
    ElementSchema {
        element_type: "container",
        category: Category::Structure,
        rule: structure::container,
        params: &[
            ParamSpec::choice("tag", CONTAINER_TAGS, "div"),
            ParamSpec::text("class", "container"),
            ParamSpec::color("bgcolor", "#f8f9fa"),
            ParamSpec::text("padding", "20px"),
            ParamSpec::multiline("content", ""),
        ],
    },
    ElementSchema {
        element_type: "list",
        category: Category::Structure,
        rule: structure::list,
        params: &[
            ParamSpec::list("items", &["Item 1", "Item 2"]),
            ParamSpec::choice("type", LIST_TYPES, "ul"),
        ],
    },
    // Style
    ElementSchema {
        element_type: "bgColor",
        category: Category::Style,
        rule: style::background_color,
        params: &[
            ParamSpec::text("selector", "body"),
            ParamSpec::color("color", "#ffffff"),
            ParamSpec::number("opacity", 0.0, 100.0, 100.0),
        ],
    },
    ElementSchema {
        element_type: "textColor",
        category: Category::Style,
        rule: style::text_color,
        params: &[
            ParamSpec::text("selector", "body"),
            ParamSpec::color("color", "#000000"),
        ],
    },
    ElementSchema {
        element_type: "fontSize",
        category: Category::Style,
        rule: style::font_size,
        params: &[
            ParamSpec::text("selector", "body"),
            ParamSpec::number("size", 8.0, 72.0, 16.0),
            ParamSpec::choice("unit", FONT_UNITS, "px"),
        ],
    },
    ElementSchema {
        element_type: "margin",
        category: Category::Style,
        rule: style::margin,
        params: &[
            ParamSpec::text("selector", "*"),
            ParamSpec::flag("uniform", false),
            ParamSpec::number("top", 0.0, 100.0, 10.0),
            ParamSpec::number("right", 0.0, 100.0, 10.0),
            ParamSpec::number("bottom", 0.0, 100.0, 10.0),
            ParamSpec::number("left", 0.0, 100.0, 10.0),
        ],
    },
    ElementSchema {
        element_type: "shadow",
        category: Category::Style,
        rule: style::shadow,
        params: &[
            ParamSpec::text("selector", ".container"),
            ParamSpec::number("horizontal", -50.0, 50.0, 0.0),
            ParamSpec::number("vertical", -50.0, 50.0, 4.0),
            ParamSpec::number("blur", 0.0, 100.0, 8.0),
            ParamSpec::color("color", "rgba(0,0,0,0.1)"),
            ParamSpec::flag("inset", false),
        ],
    },
    ElementSchema {
        element_type: "borderRadius",
        category: Category::Style,
        rule: style::border_radius,
        params: &[
            ParamSpec::text("selector", ".container"),
            ParamSpec::flag("separate", false),
            ParamSpec::number("radius", 0.0, 100.0, 8.0),
            ParamSpec::number("topLeft", 0.0, 100.0, 4.0),
            ParamSpec::number("topRight", 0.0, 100.0, 4.0),
            ParamSpec::number("bottomRight", 0.0, 100.0, 4.0),
            ParamSpec::number("bottomLeft", 0.0, 100.0, 4.0),
        ],
    },
    // Interaction
    ElementSchema {
        element_type: "onClick",
        category: Category::Interaction,
        rule: interaction::on_click,
        params: &[
            ParamSpec::text("selector", "button"),
            ParamSpec::multiline("action", "alert('Button clicked!');"),
        ],
    },
    ElementSchema {
        element_type: "onHover",
        category: Category::Interaction,
        rule: interaction::on_hover,
        params: &[
            ParamSpec::text("selector", ".hoverable"),
            ParamSpec::multiline("action", "this.style.backgroundColor = '#f0f0f0';"),
        ],
    },
    ElementSchema {
        element_type: "alert",
        category: Category::Interaction,
        rule: interaction::alert,
        params: &[
            ParamSpec::text("message", "Notice"),
            ParamSpec::choice("kind", ALERT_KINDS, "alert"),
        ],
    },
    ElementSchema {
        element_type: "setText",
        category: Category::Interaction,
        rule: interaction::set_text,
        params: &[
            ParamSpec::text("selector", "#target"),
            ParamSpec::text("text", "New content"),
            ParamSpec::choice("mode", CONTENT_MODES, "text"),
        ],
    },
    ElementSchema {
        element_type: "addClass",
        category: Category::Interaction,
        rule: interaction::add_class,
        params: &[
            ParamSpec::text("selector", ".element"),
            ParamSpec::text("class", "active"),
        ],
    },
    ElementSchema {
        element_type: "hide",
        category: Category::Interaction,
        rule: interaction::hide,
        params: &[
            ParamSpec::text("selector", ".hidden"),
            ParamSpec::choice("effect", EFFECTS, "none"),
            ParamSpec::decimal("duration", 0.1, 5.0, 0.1, 0.3),
        ],
    },
    ElementSchema {
        element_type: "show",
        category: Category::Interaction,
        rule: interaction::show,
        params: &[
            ParamSpec::text("selector", ".visible"),
            ParamSpec::choice("display", DISPLAY_MODES, "block"),
            ParamSpec::choice("effect", EFFECTS, "none"),
            ParamSpec::decimal("duration", 0.1, 5.0, 0.1, 0.3),
        ],
    },
];

/// Look up the schema registered for `element_type`.
pub fn schema_for(element_type: &str) -> Option<&'static ElementSchema> {
    SCHEMAS.iter().find(|s| s.element_type == element_type)
}
