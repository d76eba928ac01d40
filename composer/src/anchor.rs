//! Locating structural markers in an HTML buffer by plain text search.

use std::fmt;
use std::ops::Range;

/// A structural marker in the HTML buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    BodyOpen,
    BodyClose,
    Style,
    Script,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Anchor::BodyOpen => "<body>",
            Anchor::BodyClose => "</body>",
            Anchor::Style => "<style>...</style>",
            Anchor::Script => "<script>...</script>",
        };
        f.write_str(text)
    }
}

/// Which occurrence of a region to use when there are several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    First,
    Last,
}

/// Byte range of the opening tag `<tag>` or `<tag attr...>`.
pub fn find_open_tag(html: &str, tag: &str) -> Option<Range<usize>> {
    let needle = format!("<{}", tag);
    let mut from = 0;
    while let Some(rel) = html[from..].find(&needle) {
        let start = from + rel;
        let after = start + needle.len();
        match html[after..].chars().next() {
            Some('>') => return Some(start..after + 1),
            Some(c) if c.is_whitespace() => {
                let end = html[after..].find('>')?;
                return Some(start..after + end + 1);
            }
            _ => from = after,
        }
    }
    None
}

/// Start of the first `</tag>` at or after `from`.
pub fn find_close_tag(html: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("</{}>", tag);
    html.get(from..)?.find(&needle).map(|i| from + i)
}

/// Content range between a literal `<tag>` and the next `</tag>`.
///
/// Only the bare form counts, so `<script src=...>` never holds the buffer.
pub fn region(html: &str, tag: &str, occurrence: Occurrence) -> Option<Range<usize>> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = match occurrence {
        Occurrence::First => html.find(&open)?,
        Occurrence::Last => html.rfind(&open)?,
    } + open.len();
    let end = html[start..].find(&close)? + start;
    Some(start..end)
}

/// The CSS and JS regions of one page. The script region is never taken
/// from inside the style element, so a `<script>` mentioned in the CSS does
/// not capture the JS buffer.
pub fn buffer_regions(
    html: &str,
    script: Occurrence,
) -> (Option<Range<usize>>, Option<Range<usize>>) {
    let style = region(html, "style", Occurrence::First);
    let Some(style) = style else {
        return (None, region(html, "script", script));
    };
    let element = style.start - "<style>".len()..style.end + "</style>".len();
    let overlaps = |r: &Range<usize>| r.start > element.start && r.start <= element.end;

    let script = match region(html, "script", script) {
        Some(found) if overlaps(&found) => match script {
            Occurrence::First => {
                region(&html[element.end..], "script", Occurrence::First)
                    .map(|r| r.start + element.end..r.end + element.end)
            }
            Occurrence::Last => region(&html[..element.start], "script", Occurrence::Last),
        },
        other => other,
    };
    (Some(style), script)
}

/// Insertion point just after the body-open tag, if the body is closed too.
pub fn body_insertion_point(html: &str) -> Result<usize, Anchor> {
    let open = find_open_tag(html, "body").ok_or(Anchor::BodyOpen)?;
    find_close_tag(html, "body", open.end).ok_or(Anchor::BodyClose)?;
    Ok(open.end)
}

/// Insert `lines` (each already newline-terminated) so they sit on their own
/// lines directly before `pos`.
pub fn insert_lines_before(text: &mut String, pos: usize, lines: &str) {
    let line_start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if text[line_start..pos].trim().is_empty() {
        text.insert_str(line_start, lines);
    } else {
        let mut block = String::with_capacity(lines.len() + 1);
        block.push('\n');
        block.push_str(lines);
        text.insert_str(pos, &block);
    }
}
