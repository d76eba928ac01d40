//! Creating the anchors the merge engine and the file format rely on.

use crate::anchor::{Occurrence, find_close_tag, find_open_tag, insert_lines_before, region};
use crate::document::CompositeDocument;

const STYLE_LINES: &str = "    <style>\n    </style>\n";
const SCRIPT_LINES: &str = "    <script>\n    </script>\n";

/// Add whatever anchors `document.html` lacks. Existing content is kept.
pub fn ensure_scaffold(mut document: CompositeDocument) -> CompositeDocument {
    document.html = scaffold_html(&document.html);
    document
}

pub fn scaffold_html(html: &str) -> String {
    let has_skeleton = ["html", "head", "body"]
        .iter()
        .any(|tag| find_open_tag(html, tag).is_some());
    if !has_skeleton {
        tracing::debug!("no document skeleton; wrapping content in boilerplate");
        return boilerplate(html);
    }

    let mut out = html.to_string();
    ensure_body(&mut out);
    ensure_style(&mut out);
    ensure_script(&mut out);
    out
}

/// Add the style and script regions to a document whose body is intact.
/// `None` when both are already present.
pub fn add_buffer_anchors(html: &str) -> Option<String> {
    let has_style = region(html, "style", Occurrence::First).is_some();
    let has_script = region(html, "script", Occurrence::First).is_some();
    if has_style && has_script {
        return None;
    }
    tracing::debug!(has_style, has_script, "adding missing buffer anchors");
    let mut out = html.to_string();
    ensure_style(&mut out);
    ensure_script(&mut out);
    Some(out)
}

fn boilerplate(content: &str) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"UTF-8\">\n",
    );
    out.push_str(STYLE_LINES);
    out.push_str("</head>\n<body>\n");
    if !content.trim().is_empty() {
        out.push_str(content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(SCRIPT_LINES);
    out.push_str("</body>\n</html>");
    out
}

fn ensure_body(html: &mut String) {
    match find_open_tag(html, "body") {
        Some(open) => {
            if find_close_tag(html, "body", open.end).is_none() {
                insert_before_html_close(html, "</body>\n");
            }
        }
        None => insert_before_html_close(html, "<body>\n</body>\n"),
    }
}

fn insert_before_html_close(html: &mut String, lines: &str) {
    match find_close_tag(html, "html", 0) {
        Some(close) => insert_lines_before(html, close, lines),
        None => {
            if !html.is_empty() && !html.ends_with('\n') {
                html.push('\n');
            }
            html.push_str(lines);
        }
    }
}

fn ensure_style(html: &mut String) {
    if region(html, "style", Occurrence::First).is_some() {
        return;
    }
    if let Some(head) = find_open_tag(html, "head") {
        html.insert_str(head.end, "\n    <style>\n    </style>");
        return;
    }
    let head = format!("<head>\n{}</head>\n", STYLE_LINES);
    if let Some(root) = find_open_tag(html, "html") {
        html.insert_str(root.end, &format!("\n{}", head.trim_end()));
    } else if let Some(body) = find_open_tag(html, "body") {
        html.insert_str(body.start, &head);
    } else {
        html.insert_str(0, &head);
    }
}

fn ensure_script(html: &mut String) {
    if region(html, "script", Occurrence::First).is_some() {
        return;
    }
    let close = {
        let text: &str = html;
        find_open_tag(text, "body").and_then(|open| find_close_tag(text, "body", open.end))
    };
    match close {
        Some(close) => insert_lines_before(html, close, SCRIPT_LINES),
        None => insert_before_html_close(html, SCRIPT_LINES),
    }
}
