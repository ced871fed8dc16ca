use std::path::Path;

use crate::report::{error::ReportError, model::RawDocument};

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

#[cfg(feature = "pdf_parse")]
fn read_pdf_text(path: &Path) -> Result<String, ReportError> {
    crate::peripheral::pdf::get_doc_text(path).map_err(ReportError::SourceUnavailable)
}

#[cfg(not(feature = "pdf_parse"))]
fn read_pdf_text(path: &Path) -> Result<String, ReportError> {
    Err(ReportError::SourceUnavailable(format!(
        "Cannot read {}: built without PDF support. Provide a .txt dump instead",
        path.display()
    )))
}

/// Loads the statement text. Files ending in .txt are taken to be text
/// already extracted (eg. by pdf-text), anything else is parsed as a PDF.
pub fn load_document(path: &Path) -> Result<RawDocument, ReportError> {
    let text = if is_text_file(path) {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReportError::SourceUnavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        #[cfg(feature = "pdf_parse")]
        let text = crate::peripheral::pdf::strip_page_markers(&text);
        text
    } else {
        read_pdf_text(path)?
    };

    let doc = RawDocument::new(text);
    if doc.is_blank() {
        return Err(ReportError::SourceUnavailable(format!(
            "No text found in {}",
            path.display()
        )));
    }
    tracing::info!("Loaded {} characters from {}", doc.text().len(), path.display());
    Ok(doc)
}
