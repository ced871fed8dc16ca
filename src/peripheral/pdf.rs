use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::util::basic::SError;

lazy_static! {
    static ref PAGE_MARKER_RE: Regex = Regex::new(r"PAGE_BREAK<(\d+)>\n?").unwrap();
}

/// page_num should be one-based
pub fn parseable_page_marker(page_num: usize) -> String {
    format!("PAGE_BREAK<{page_num}>")
}

/// Removes the markers inserted by pdf-text, so dumps made with markers can
/// be used as input directly.
pub fn strip_page_markers(text: &str) -> String {
    PAGE_MARKER_RE.replace_all(text, "").to_string()
}

/// The whole text of the document, as pdf-extract lays it out.
pub fn get_doc_text(path: &Path) -> Result<String, SError> {
    pdf_extract::extract_text(path)
        .map_err(|e| format!("Failed to extract text from {}: {}", path.display(), e))
}

/// One string per page, in page order.
pub fn get_pages_text(path: &Path) -> Result<Vec<String>, SError> {
    pdf_extract::extract_text_by_pages(path)
        .map_err(|e| format!("Failed to extract text from {}: {}", path.display(), e))
}
