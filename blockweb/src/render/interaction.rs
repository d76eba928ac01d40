//! JavaScript rules: single statements or event-listener registrations.
//!
//! Selector-based rules look the element up with `document.querySelector`.
//! Action bodies are inserted verbatim; quotes inside user text are not
//! escaped.

use super::Args;

/// Action bodies offered by hosts as one-click presets for event handlers.
pub const ACTION_PRESETS: &[(&str, &str)] = &[
    ("Show alert", "alert('Hello World!');"),
    ("Hide element", "this.style.display = 'none';"),
    ("Show element", "this.style.display = 'block';"),
    ("Change content", "this.textContent = 'New content';"),
    ("Add class", "this.classList.add('active');"),
    ("Remove class", "this.classList.remove('active');"),
    ("Toggle class", "this.classList.toggle('active');"),
    ("Change background", "this.style.backgroundColor = '#ff6b6b';"),
    ("Change text color", "this.style.color = '#ffffff';"),
    ("Toggle visibility", "this.style.display = this.style.display === 'none' ? 'block' : 'none';"),
];

fn query(selector: &str) -> String {
    format!("document.querySelector('{}')", selector)
}

fn listener(args: &Args<'_>, event: &str, fallback: &str) -> String {
    format!(
        "{}.addEventListener('{}', function() {{\n    {}\n}});",
        query(&args.selector(fallback)),
        event,
        args.text("action", "").trim(),
    )
}

pub fn on_click(args: &Args<'_>) -> String {
    listener(args, "click", "button")
}

pub fn on_hover(args: &Args<'_>) -> String {
    listener(args, "mouseover", "body")
}

pub fn alert(args: &Args<'_>) -> String {
    let message = args.text("message", "");
    match args.text("kind", "alert").as_ref() {
        "confirm" => format!("confirm('{}');", message),
        "prompt" => format!("prompt('{}');", message),
        _ => format!("alert('{}');", message),
    }
}

pub fn set_text(args: &Args<'_>) -> String {
    let property = match args.text("mode", "text").as_ref() {
        "html" => "innerHTML",
        "value" => "value",
        _ => "textContent",
    };
    format!(
        "{}.{} = '{}';",
        query(&args.selector("body")),
        property,
        args.text("text", "")
    )
}

pub fn add_class(args: &Args<'_>) -> String {
    format!(
        "{}.classList.add('{}');",
        query(&args.selector("body")),
        args.text_or("class", "active")
    )
}

fn fade_millis(args: &Args<'_>) -> (f64, i64) {
    let seconds = args.number("duration", 0.3).max(0.0);
    (seconds, (seconds * 1000.0).round() as i64)
}

pub fn hide(args: &Args<'_>) -> String {
    let target = query(&args.selector("body"));
    if args.text("effect", "none") == "fade" {
        let (seconds, millis) = fade_millis(args);
        format!(
            "(function(el) {{ el.style.transition = 'opacity {}s'; el.style.opacity = '0'; setTimeout(function() {{ el.style.display = 'none'; }}, {}); }})({});",
            seconds, millis, target
        )
    } else {
        format!("{}.style.display = 'none';", target)
    }
}

pub fn show(args: &Args<'_>) -> String {
    let target = query(&args.selector("body"));
    let display = args.text_or("display", "block");
    if args.text("effect", "none") == "fade" {
        let (seconds, _) = fade_millis(args);
        format!(
            "(function(el) {{ el.style.opacity = '0'; el.style.display = '{}'; el.style.transition = 'opacity {}s'; setTimeout(function() {{ el.style.opacity = '1'; }}, 10); }})({});",
            display, seconds, target
        )
    } else {
        format!("{}.style.display = '{}';", target, display)
    }
}
