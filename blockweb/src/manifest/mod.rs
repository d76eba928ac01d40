//! Composition manifests: a TOML description of a composition, standing in
//! for the drag-and-drop host.
//!
//! ```toml
//! [[block]]
//! type = "heading"
//! [block.params]
//! text = "Hello"
//! level = "2"
//! ```

pub mod error;

pub use error::ManifestError;

use indexmap::IndexMap;
use serde::Deserialize;
use toml::Spanned;

use crate::block::composition::Composition;
use crate::catalog::Catalog;
use crate::value::ParamValue;

/// One `[[block]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockEntry {
    #[serde(rename = "type")]
    pub element_type: Spanned<String>,
    /// Keys keep their spans so diagnostics point at the parameter name.
    #[serde(default)]
    pub params: IndexMap<Spanned<String>, ParamValue>,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "block")]
    blocks: Vec<BlockEntry>,
}

/// A syntactically valid manifest, not yet resolved against a catalog.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub blocks: Vec<BlockEntry>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}

/// Manifest parser entry point.
pub struct ManifestParser {
    source: String,
    file_id: usize,
}

impl ManifestParser {
    pub fn new(source: String, file_id: usize) -> Self {
        ManifestParser { source, file_id }
    }

    pub fn parse(&self) -> Result<Manifest, Vec<ManifestError>> {
        let file: ManifestFile = toml::from_str(&self.source).map_err(|e| {
            let span = e.span().unwrap_or(0..self.source.len().min(1));
            vec![ManifestError::error(e.message().trim(), span, self.file_id)]
        })?;
        Ok(Manifest {
            blocks: file.blocks,
            source_id: self.file_id,
        })
    }
}

impl Manifest {
    /// Instantiate every entry from `catalog` and apply its parameters.
    ///
    /// Unknown element types and values the schema rejects are errors.
    /// Unknown parameter names are warnings and the edit is skipped.
    pub fn build(
        &self,
        catalog: &Catalog,
    ) -> Result<(Composition, Vec<ManifestError>), Vec<ManifestError>> {
        build_composition(&self.blocks, catalog, self.source_id)
    }
}

pub fn build_composition(
    entries: &[BlockEntry],
    catalog: &Catalog,
    file_id: usize,
) -> Result<(Composition, Vec<ManifestError>), Vec<ManifestError>> {
    let mut composition = Composition::new();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for entry in entries {
        let span = entry.element_type.span();
        let element_type = entry.element_type.get_ref();

        let mut instance = match catalog.instantiate(element_type) {
            Ok(instance) => instance,
            Err(err) => {
                let known: Vec<&str> = catalog.iter().map(|d| d.element_type.as_str()).collect();
                errors.push(
                    ManifestError::error(err.to_string(), span, file_id)
                        .with_note(format!("known element types: {}", known.join(", "))),
                );
                continue;
            }
        };

        for (key, value) in &entry.params {
            let name = key.get_ref().as_str();
            if instance.parameter(name).is_none() {
                let known: Vec<&str> = instance.parameters().keys().map(String::as_str).collect();
                warnings.push(
                    ManifestError::warning(
                        format!("'{}' has no parameter '{}'; value ignored", element_type, name),
                        key.span(),
                        file_id,
                    )
                    .with_note(format!("parameters: {}", known.join(", "))),
                );
                continue;
            }
            if let Err(err) = instance.set_parameter_checked(name, value.clone()) {
                errors.push(ManifestError::error(err.to_string(), key.span(), file_id));
            }
        }

        composition.push(instance);
    }

    if errors.is_empty() {
        Ok((composition, warnings))
    } else {
        Err(errors)
    }
}
