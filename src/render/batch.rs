//! Batch rendering of independent documents.

use crate::model::Document;

use super::{to_html, RenderOptions};

/// Render many documents to HTML, preserving input order.
///
/// With the `parallel` feature and `options.parallel` set, documents are
/// rendered on the rayon thread pool.
pub fn render_batch(docs: &[Document], options: &RenderOptions) -> Vec<String> {
    log::debug!(
        "Rendering batch of {} documents (parallel: {})",
        docs.len(),
        options.parallel
    );

    render_all(docs, options.parallel)
}

#[cfg(feature = "parallel")]
fn render_all(docs: &[Document], parallel: bool) -> Vec<String> {
    use rayon::prelude::*;

    if parallel && docs.len() > 1 {
        docs.par_iter().map(to_html).collect()
    } else {
        docs.iter().map(to_html).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn render_all(docs: &[Document], _parallel: bool) -> Vec<String> {
    docs.iter().map(to_html).collect()
}
