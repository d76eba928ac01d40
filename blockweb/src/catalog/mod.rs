use std::fmt;

use serde::{Deserialize, Serialize};

use crate::block::{BlockDefinition, BlockInstance};
use crate::error::BlockError;
use crate::schema::schema_for;

/// Palette group a block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structure,
    Style,
    Interaction,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Structure, Category::Style, Category::Interaction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Structure => "structure",
            Category::Style => "style",
            Category::Interaction => "interaction",
        }
    }

    /// Display tint for blocks of this category.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Structure => "#4caf50",
            Category::Style => "#42a5f5",
            Category::Interaction => "#ff5555",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette labels for the built-in element types, in palette order.
const BUILTIN: &[(&str, &str)] = &[
    ("heading", "Add heading"),
    ("paragraph", "Add paragraph"),
    ("button", "Add button"),
    ("image", "Add image"),
    ("link", "Add link"),
    ("container", "Add container"),
    ("list", "Add list"),
    ("bgColor", "Set background color"),
    ("textColor", "Set text color"),
    ("fontSize", "Set font size"),
    ("margin", "Add margin"),
    ("shadow", "Add shadow"),
    ("borderRadius", "Set border radius"),
    ("onClick", "Click event"),
    ("onHover", "Hover event"),
    ("alert", "Show alert"),
    ("setText", "Change content"),
    ("addClass", "Add class"),
    ("hide", "Hide element"),
    ("show", "Show element"),
];

/// Read-only registry of the block definitions a host offers in its palette.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: Vec<BlockDefinition>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog::default()
    }

    /// The built-in palette: one definition per registered element schema.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::empty();
        for (element_type, name) in BUILTIN {
            if let Some(schema) = schema_for(element_type) {
                catalog.register(BlockDefinition::from_schema(*name, schema));
            }
        }
        catalog
    }

    /// Add a definition. A definition for an already registered element
    /// type replaces the earlier one in place.
    pub fn register(&mut self, definition: BlockDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|d| d.element_type == definition.element_type)
        {
            Some(existing) => {
                tracing::debug!(element_type = %definition.element_type, "replacing catalog definition");
                *existing = definition;
            }
            None => self.definitions.push(definition),
        }
    }

    pub fn get(&self, element_type: &str) -> Option<&BlockDefinition> {
        self.definitions
            .iter()
            .find(|d| d.element_type == element_type)
    }

    /// Definitions of one category, in registration order.
    pub fn list_by_category(&self, category: Category) -> Vec<&BlockDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn instantiate(&self, element_type: &str) -> Result<BlockInstance, BlockError> {
        self.get(element_type)
            .map(BlockDefinition::instantiate)
            .ok_or_else(|| BlockError::UnknownElementType(element_type.to_string()))
    }
}
