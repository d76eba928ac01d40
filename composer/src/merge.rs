//! Splicing generated fragments into a composite document.
//!
//! The splice is plain text search over the three buffers. `Merger` is the
//! seam for a structured replacement.

use blockweb::Composition;

use crate::anchor::{self, insert_lines_before};
use crate::classify::Partition;
use crate::config::{InsertPolicy, MergeConfig};
use crate::document::CompositeDocument;
use crate::error::MergeError;
use crate::scaffold;

/// Counts of what one merge did to each buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub html_inserted: usize,
    pub css_inserted: usize,
    pub js_inserted: usize,
    /// Fragments already present and skipped.
    pub skipped: usize,
    /// JS fragments dropped because the DOM-ready wrapper is missing.
    pub js_dropped: usize,
}

pub trait Merger {
    /// Apply `parts` to `document`. On error the document is unchanged.
    fn merge(
        &self,
        document: &mut CompositeDocument,
        parts: &Partition,
    ) -> Result<MergeReport, MergeError>;
}

/// The text-splicing merger.
#[derive(Debug, Clone, Default)]
pub struct SpliceMerger {
    config: MergeConfig,
}

impl SpliceMerger {
    pub fn new(config: MergeConfig) -> Self {
        SpliceMerger { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Fragments still to insert into `buffer` under the current policy.
    fn pending<'a>(
        &self,
        buffer: &str,
        fragments: &'a [String],
        report: &mut MergeReport,
    ) -> Vec<&'a str> {
        let mut pending: Vec<&str> = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let present = buffer.contains(fragment.as_str()) || pending.contains(&fragment.as_str());
            if self.config.policy == InsertPolicy::Idempotent && present {
                tracing::debug!(fragment = %fragment, "already present, skipping");
                report.skipped += 1;
            } else {
                pending.push(fragment.as_str());
            }
        }
        pending
    }

    fn splice_html(
        &self,
        html: &str,
        fragments: &[String],
        report: &mut MergeReport,
    ) -> Result<Option<String>, MergeError> {
        if fragments.is_empty() {
            return Ok(None);
        }
        let at = anchor::body_insertion_point(html)
            .map_err(|missing| MergeError::MalformedDocument { missing })?;
        let pending = self.pending(html, fragments, report);
        if pending.is_empty() {
            return Ok(None);
        }

        let mut block = String::new();
        for fragment in &pending {
            block.push('\n');
            block.push_str(&self.config.indent);
            block.push_str(fragment);
        }
        report.html_inserted += pending.len();

        let mut out = html.to_string();
        out.insert_str(at, &block);
        Ok(Some(out))
    }

    /// CSS skips exact duplicates under either policy.
    fn splice_css(&self, css: &str, fragments: &[String], report: &mut MergeReport) -> Option<String> {
        let mut out = css.to_string();
        for fragment in fragments {
            if out.contains(fragment.as_str()) {
                tracing::debug!(fragment = %fragment, "css rule already present, skipping");
                report.skipped += 1;
                continue;
            }
            if !out.trim().is_empty() {
                out.push_str("\n\n");
            }
            out.push_str(fragment);
            report.css_inserted += 1;
        }
        (out != css).then_some(out)
    }

    fn splice_js(&self, js: &str, fragments: &[String], report: &mut MergeReport) -> Option<String> {
        if fragments.is_empty() {
            return None;
        }
        let wrapper = &self.config.ready_wrapper;
        let Some(open) = js.find(wrapper.as_str()) else {
            tracing::warn!(
                count = fragments.len(),
                "no DOM-ready wrapper in JS buffer; dropping fragments"
            );
            report.js_dropped += fragments.len();
            return None;
        };
        let body = open + wrapper.len();
        let Some(close) = js[body..]
            .rfind(self.config.ready_close.as_str())
            .map(|i| body + i)
        else {
            tracing::warn!("DOM-ready wrapper is not closed; dropping fragments");
            report.js_dropped += fragments.len();
            return None;
        };

        let pending = self.pending(js, fragments, report);
        if pending.is_empty() {
            return None;
        }
        let mut lines = String::new();
        for fragment in &pending {
            lines.push_str(&self.config.indent);
            lines.push_str(fragment);
            lines.push('\n');
        }
        report.js_inserted += pending.len();

        let mut out = js.to_string();
        insert_lines_before(&mut out, close, &lines);
        Some(out)
    }
}

impl Merger for SpliceMerger {
    fn merge(
        &self,
        document: &mut CompositeDocument,
        parts: &Partition,
    ) -> Result<MergeReport, MergeError> {
        let mut report = MergeReport::default();
        // HTML first: it is the only step that can fail.
        let mut html = self.splice_html(&document.html, &parts.html, &mut report)?;
        let current = html.as_deref().unwrap_or(&document.html);
        if anchor::body_insertion_point(current).is_ok() {
            if let Some(anchored) = scaffold::add_buffer_anchors(current) {
                html = Some(anchored);
            }
        }
        let css = self.splice_css(&document.css, &parts.css, &mut report);
        let js = self.splice_js(&document.js, &parts.js, &mut report);

        if let Some(html) = html {
            document.html = html;
        }
        if let Some(css) = css {
            document.css = css;
        }
        if let Some(js) = js {
            document.js = js;
        }
        Ok(report)
    }
}

/// Render `composition`, sort its fragments and splice them into `document`.
///
/// Not atomic with respect to other callers: hosts must serialize calls on
/// the same document.
pub fn generate_from_composition(
    composition: &mut Composition,
    document: &mut CompositeDocument,
    config: &MergeConfig,
) -> Result<MergeReport, MergeError> {
    let parts = Partition::from_composition(composition, config.classification);
    let report = SpliceMerger::new(config.clone()).merge(document, &parts)?;
    tracing::debug!(?report, "generated from composition");
    Ok(report)
}
