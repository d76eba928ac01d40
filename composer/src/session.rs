//! One editing session: a catalog, the composition built from it and the
//! document the composition is merged into.
//!
//! Hosts call the `on_*` hooks from their UI events. Every call takes
//! `&mut self`, so concurrent edits of one session are ruled out by the
//! borrow checker rather than by a lock.

use blockweb::{BlockError, Catalog, Composition, ParamValue};

use crate::config::MergeConfig;
use crate::document::CompositeDocument;
use crate::error::MergeError;
use crate::merge::{MergeReport, generate_from_composition};
use crate::persist;

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    composition: Composition,
    document: CompositeDocument,
    config: MergeConfig,
    last_report: Option<MergeReport>,
}

impl Session {
    /// A session over `catalog` with the default document.
    pub fn new(catalog: Catalog, config: MergeConfig) -> Self {
        Self::with_document(catalog, config, CompositeDocument::default())
    }

    pub fn with_document(catalog: Catalog, config: MergeConfig, document: CompositeDocument) -> Self {
        Session {
            catalog,
            composition: Composition::new(),
            document,
            config,
            last_report: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn document(&self) -> &CompositeDocument {
        &self.document
    }

    /// Direct access to the buffers for hand edits.
    pub fn document_mut(&mut self) -> &mut CompositeDocument {
        &mut self.document
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn last_report(&self) -> Option<MergeReport> {
        self.last_report
    }

    /// Instantiate `element_type` and append it to the composition.
    /// Returns the new block's index.
    pub fn drop_block(&mut self, element_type: &str) -> Result<usize, BlockError> {
        let instance = self.catalog.instantiate(element_type)?;
        tracing::debug!(element_type, "block dropped");
        self.composition.push(instance);
        Ok(self.composition.len() - 1)
    }

    pub fn remove_block(&mut self, index: usize) -> Result<(), BlockError> {
        let removed = self.composition.remove(index)?;
        tracing::debug!(block = %removed.name, index, "block removed");
        Ok(())
    }

    /// Deep-copy the block at `index` to the end of the composition.
    pub fn duplicate_block(&mut self, index: usize) -> Result<usize, BlockError> {
        self.composition.duplicate(index)
    }

    /// Regenerate the document from the composition.
    pub fn on_composition_changed(&mut self) -> Result<&CompositeDocument, MergeError> {
        let report =
            generate_from_composition(&mut self.composition, &mut self.document, &self.config)?;
        if report.js_dropped > 0 {
            tracing::debug!(dropped = report.js_dropped, "JS fragments were not merged");
        }
        self.last_report = Some(report);
        Ok(&self.document)
    }

    /// Store a raw edit and return the block's fresh fragment.
    ///
    /// A name the block does not have is logged and ignored; the fragment is
    /// still returned. An index outside the composition is an error.
    pub fn on_parameter_edited(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<String, BlockError> {
        let block = self.composition.get_mut(index)?;
        match block.set_parameter(name, value) {
            Ok(()) => {}
            Err(err @ BlockError::UnknownParameter { .. }) => {
                tracing::warn!(index, "{err}; edit ignored");
            }
            Err(err) => return Err(err),
        }
        Ok(block.render())
    }

    /// Like `on_parameter_edited`, but the value goes through the element's
    /// schema first and every failure is returned.
    pub fn edit_parameter_checked(
        &mut self,
        index: usize,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<String, BlockError> {
        let block = self.composition.get_mut(index)?;
        block.set_parameter_checked(name, value)?;
        Ok(block.render())
    }

    /// The buffers for a preview renderer.
    pub fn preview(&self) -> (&str, &str, &str) {
        self.document.buffers()
    }

    /// The preview as one HTML page.
    pub fn preview_html(&self) -> String {
        persist::preview_html(&self.document)
    }

    /// Reset to the default document and an empty composition.
    pub fn new_document(&mut self) {
        self.document = CompositeDocument::default();
        self.composition.clear();
        self.last_report = None;
    }

    /// Replace the document with a saved file. The composition is cleared
    /// since it cannot be recovered from the file.
    pub fn open(&mut self, text: &str) {
        self.document = persist::load(text);
        self.composition.clear();
        self.last_report = None;
    }

    pub fn save(&self) -> String {
        persist::save(&self.document)
    }
}
