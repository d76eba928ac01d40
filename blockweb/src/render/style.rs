//! CSS rules. Each emits exactly one `{selector} { property: value; }` rule.

use super::Args;

fn rule(selector: &str, property: &str, value: &str) -> String {
    format!("{} {{ {}: {}; }}", selector, property, value)
}

/// `#rrggbb` plus alpha as `rgba(r, g, b, a)`, or None for any other colour syntax.
fn hex_to_rgba(color: &str, alpha: f64) -> Option<String> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(format!(
        "rgba({}, {}, {}, {:.2})",
        channel(0)?,
        channel(2)?,
        channel(4)?,
        alpha
    ))
}

pub fn background_color(args: &Args<'_>) -> String {
    let color = args.text("color", "#ffffff");
    let opacity = args.number("opacity", 100.0);
    let value = if opacity < 100.0 {
        hex_to_rgba(&color, opacity.max(0.0) / 100.0).unwrap_or_else(|| color.to_string())
    } else {
        color.to_string()
    };
    rule(&args.selector("body"), "background-color", &value)
}

pub fn text_color(args: &Args<'_>) -> String {
    rule(&args.selector("body"), "color", &args.text("color", "#000000"))
}

pub fn font_size(args: &Args<'_>) -> String {
    let value = format!("{}{}", args.text("size", "16"), args.text_or("unit", "px"));
    rule(&args.selector("body"), "font-size", &value)
}

/// Top, right, bottom, left; or a single value when `uniform` is set.
pub fn margin(args: &Args<'_>) -> String {
    let top = args.text("top", "0");
    let value = if args.flag("uniform") {
        format!("{}px", top)
    } else {
        format!(
            "{}px {}px {}px {}px",
            top,
            args.text("right", "0"),
            args.text("bottom", "0"),
            args.text("left", "0"),
        )
    };
    rule(&args.selector("*"), "margin", &value)
}

/// h-offset, v-offset, blur, color, then `inset` when set.
pub fn shadow(args: &Args<'_>) -> String {
    let mut value = format!(
        "{}px {}px {}px {}",
        args.text("horizontal", "0"),
        args.text("vertical", "4"),
        args.text("blur", "8"),
        args.text("color", "rgba(0,0,0,0.1)"),
    );
    if args.flag("inset") {
        value.push_str(" inset");
    }
    rule(&args.selector("*"), "box-shadow", &value)
}

/// TL, TR, BR, BL when `separate` is set, otherwise the single `radius`.
pub fn border_radius(args: &Args<'_>) -> String {
    let value = if args.flag("separate") {
        format!(
            "{}px {}px {}px {}px",
            args.text("topLeft", "4"),
            args.text("topRight", "4"),
            args.text("bottomRight", "4"),
            args.text("bottomLeft", "4"),
        )
    } else {
        format!("{}px", args.text("radius", "4"))
    };
    rule(&args.selector("*"), "border-radius", &value)
}
