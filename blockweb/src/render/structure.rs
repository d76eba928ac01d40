//! HTML element rules. Each emits a single element.

use super::Args;

pub fn heading(args: &Args<'_>) -> String {
    let level = (args.number("level", 1.0) as i64).clamp(1, 6);
    format!(
        "<h{level} style='color: {};'>{}</h{level}>",
        args.text("color", "#000000"),
        args.text("text", ""),
    )
}

pub fn paragraph(args: &Args<'_>) -> String {
    format!(
        "<p style='color: {}; text-align: {};'>{}</p>",
        args.text("color", "#000000"),
        args.text_or("align", "left"),
        args.text("text", ""),
    )
}

pub fn button(args: &Args<'_>) -> String {
    let font_size = match args.text("size", "medium").as_ref() {
        "small" => "12px",
        "large" => "20px",
        _ => "16px",
    };
    format!(
        "<button style='background-color: {}; color: {}; font-size: {}; padding: 8px 16px; border: none; border-radius: 4px;'>{}</button>",
        args.text("bgcolor", "#007bff"),
        args.text("color", "#ffffff"),
        font_size,
        args.text("text", ""),
    )
}

/// Width and height attributes are only written when non-empty.
pub fn image(args: &Args<'_>) -> String {
    let mut html = format!(
        "<img src='{}' alt='{}'",
        args.text("src", ""),
        args.text("alt", "")
    );
    for attr in ["width", "height"] {
        let value = args.text_or(attr, "");
        if !value.is_empty() {
            html.push_str(&format!(" {}='{}'", attr, value));
        }
    }
    html.push('>');
    html
}

pub fn link(args: &Args<'_>) -> String {
    format!(
        "<a href='{}' target='{}'>{}</a>",
        args.text("href", "#"),
        args.text_or("target", "_self"),
        args.text("text", ""),
    )
}

pub fn container(args: &Args<'_>) -> String {
    let tag = args.text_or("tag", "div");
    format!(
        "<{tag} class='{}' style='background-color: {}; padding: {};'>{}</{tag}>",
        args.text("class", ""),
        args.text("bgcolor", "transparent"),
        args.text("padding", "0"),
        args.text("content", ""),
    )
}

/// One `<li>` per non-empty entry, in order.
pub fn list(args: &Args<'_>) -> String {
    let tag = if args.text("type", "ul") == "ol" { "ol" } else { "ul" };
    let mut html = format!("<{}>\n", tag);
    for item in args.list("items") {
        if item.trim().is_empty() {
            continue;
        }
        html.push_str(&format!("    <li>{}</li>\n", item));
    }
    html.push_str(&format!("</{}>", tag));
    html
}
