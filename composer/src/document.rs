use crate::anchor::{self, Anchor, Occurrence};

pub const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My block page</title>
    <style>
        /* CSS is generated automatically */
    </style>
</head>
<body>
    <!-- HTML content is generated automatically -->
    <script>
        // JavaScript is generated automatically
    </script>
</body>
</html>"#;

pub const DEFAULT_CSS: &str = "body {
    font-family: Arial, sans-serif;
    line-height: 1.6;
    margin: 0;
    padding: 20px;
    background-color: #f0f0f0;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    background-color: white;
    padding: 20px;
    border-radius: 8px;
    box-shadow: 0 2px 10px rgba(0,0,0,0.1);
}";

pub const DEFAULT_JS: &str = r#"// Wait for the page to load
document.addEventListener("DOMContentLoaded", function() {
    console.log("Page loaded");
    // Generated JavaScript goes here
});"#;

/// Whether the HTML buffer has every anchor the merge engine relies on.
///
/// A missing body anchor makes merges of HTML fragments fail. Missing style
/// or script regions are added by the next successful merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    WellFormed,
    Malformed { missing: Anchor },
}

/// The three hand-editable source buffers of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeDocument {
    pub html: String,
    pub css: String,
    pub js: String,
}

impl Default for CompositeDocument {
    fn default() -> Self {
        CompositeDocument::new(DEFAULT_HTML, DEFAULT_CSS, DEFAULT_JS)
    }
}

impl CompositeDocument {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        CompositeDocument {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    pub fn state(&self) -> DocumentState {
        if let Err(missing) = anchor::body_insertion_point(&self.html) {
            return DocumentState::Malformed { missing };
        }
        let (style, script) = anchor::buffer_regions(&self.html, Occurrence::First);
        match (style, script) {
            (None, _) => DocumentState::Malformed {
                missing: Anchor::Style,
            },
            (_, None) => DocumentState::Malformed {
                missing: Anchor::Script,
            },
            _ => DocumentState::WellFormed,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.state() == DocumentState::WellFormed
    }

    /// The `(html, css, js)` triple handed to a preview renderer.
    pub fn buffers(&self) -> (&str, &str, &str) {
        (&self.html, &self.css, &self.js)
    }
}
