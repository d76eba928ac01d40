//! The on-disk format: one HTML file carrying the CSS buffer inside its
//! first `<style>` region and the JS buffer inside its first `<script>` region.
//!
//! Saving writes `\n{buffer}\n` between the markers and loading strips
//! exactly one newline from each end, so both buffers survive byte for byte
//! unless they themselves contain their closing marker. Both regions are
//! located before either is written.

use std::ops::Range;
use std::path::Path;

use crate::anchor::{Occurrence, buffer_regions};
use crate::document::CompositeDocument;
use crate::error::PersistError;
use crate::scaffold::scaffold_html;

fn inject(document: &CompositeDocument, script: Occurrence) -> String {
    let mut html = scaffold_html(&document.html);
    let (style, script) = buffer_regions(&html, script);

    let mut edits: Vec<(Range<usize>, &str)> = Vec::with_capacity(2);
    edits.extend(style.map(|r| (r, document.css.as_str())));
    edits.extend(script.map(|r| (r, document.js.as_str())));
    // Later range first so the earlier one's offsets stay valid.
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));
    for (range, content) in edits {
        html.replace_range(range, &format!("\n{}\n", content));
    }
    html
}

fn extract(text: &str, range: Option<Range<usize>>) -> String {
    let Some(range) = range else {
        return String::new();
    };
    let content = &text[range];
    let content = content.strip_prefix('\n').unwrap_or(content);
    let content = content.strip_suffix('\n').unwrap_or(content);
    content.to_string()
}

/// Serialize the document to a single HTML file.
pub fn save(document: &CompositeDocument) -> String {
    inject(document, Occurrence::First)
}

/// Split a saved file back into its three buffers. The HTML buffer is the
/// whole file, markers included.
pub fn load(text: &str) -> CompositeDocument {
    let (style, script) = buffer_regions(text, Occurrence::First);
    CompositeDocument::new(text, extract(text, style), extract(text, script))
}

/// HTML for a preview renderer: CSS in the first style region, JS in the
/// last script region.
pub fn preview_html(document: &CompositeDocument) -> String {
    inject(document, Occurrence::Last)
}

pub fn save_to_path(document: &CompositeDocument, path: &Path) -> Result<(), PersistError> {
    std::fs::write(path, save(document)).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_from_path(path: &Path) -> Result<CompositeDocument, PersistError> {
    let text = std::fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load(&text))
}
