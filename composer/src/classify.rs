//! Sorting rendered fragments into the HTML, CSS and JS buffers.

use blockweb::{Category, Composition};

use crate::config::Classification;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Html,
    Css,
    Js,
}

impl From<Category> for FragmentKind {
    fn from(category: Category) -> Self {
        match category {
            Category::Structure => FragmentKind::Html,
            Category::Style => FragmentKind::Css,
            Category::Interaction => FragmentKind::Js,
        }
    }
}

/// Syntactic guess: a leading `<` means HTML, braces mean CSS, anything
/// else is JS. An event listener with a `function() { ... }` body therefore
/// reads as CSS.
pub fn classify(fragment: &str) -> FragmentKind {
    if fragment.trim().starts_with('<') {
        FragmentKind::Html
    } else if fragment.contains('{') && fragment.contains('}') {
        FragmentKind::Css
    } else {
        FragmentKind::Js
    }
}

/// Fragments split by target buffer, each list in composition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub html: Vec<String>,
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl Partition {
    pub fn push(&mut self, kind: FragmentKind, fragment: String) {
        match kind {
            FragmentKind::Html => self.html.push(fragment),
            FragmentKind::Css => self.css.push(fragment),
            FragmentKind::Js => self.js.push(fragment),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty() && self.css.is_empty() && self.js.is_empty()
    }

    /// Classify raw fragments syntactically.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut partition = Partition::default();
        for fragment in fragments {
            let fragment = fragment.into();
            partition.push(classify(&fragment), fragment);
        }
        partition
    }

    /// Render every block of `composition` and sort the results.
    pub fn from_composition(composition: &mut Composition, classification: Classification) -> Self {
        let mut partition = Partition::default();
        for block in composition.iter_mut() {
            let fragment = block.render();
            let kind = match classification {
                Classification::Syntactic => classify(&fragment),
                Classification::Category => FragmentKind::from(block.category),
            };
            tracing::debug!(block = %block.name, ?kind, "classified fragment");
            partition.push(kind, fragment);
        }
        partition
    }
}
