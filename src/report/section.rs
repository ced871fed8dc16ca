use itertools::Itertools;
use regex::Regex;

use crate::config::SectionAnchors;

use super::error::ReportError;

/// Matches an anchor literally, except that the gaps between its words
/// match any run of whitespace (headers are often re-flowed by the pdf
/// renderer, and can even be split across lines).
fn anchor_regex(anchor: &str) -> Result<Regex, regex::Error> {
    let pattern = anchor.split_whitespace().map(regex::escape).join(r"\s+");
    Regex::new(&pattern)
}

pub struct SectionLocator {
    name: &'static str,
    start_anchor: String,
    end_anchor: String,
    start_re: Regex,
    end_re: Regex,
}

impl SectionLocator {
    /// name is only used to describe the section in errors and logs.
    pub fn new(name: &'static str, anchors: &SectionAnchors) -> Result<Self, ReportError> {
        let build = |anchor: &str| {
            anchor_regex(anchor).map_err(|e| {
                ReportError::InvalidConfig(format!("Bad {name} anchor \"{anchor}\": {e}"))
            })
        };
        Ok(SectionLocator {
            name,
            start_anchor: anchors.start.clone(),
            end_anchor: anchors.end.clone(),
            start_re: build(&anchors.start)?,
            end_re: build(&anchors.end)?,
        })
    }

    /// Returns the text strictly between the first start anchor and the first
    /// end anchor after it.
    pub fn locate<'a>(&self, doc: &'a str) -> Result<&'a str, ReportError> {
        let start_m = self.start_re.find(doc).ok_or_else(|| self.not_found(&self.start_anchor))?;
        let rest = &doc[start_m.end()..];
        let end_m = self.end_re.find(rest).ok_or_else(|| self.not_found(&self.end_anchor))?;

        tracing::debug!(
            "{} section found at bytes {}..{}",
            self.name,
            start_m.end(),
            start_m.end() + end_m.start()
        );
        Ok(&rest[..end_m.start()])
    }

    fn not_found(&self, anchor: &str) -> ReportError {
        ReportError::SectionNotFound { section: self.name, anchor: anchor.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SectionAnchors;
    use crate::report::error::ReportError;

    use super::SectionLocator;

    fn locator(start: &str, end: &str) -> SectionLocator {
        SectionLocator::new("Test", &SectionAnchors::new(start, end)).unwrap()
    }

    #[test]
    fn test_locate_basic() {
        let loc = locator("Start Here", "Stop");
        assert_eq!(loc.locate("junk Start Here\na\nb\nStop junk").unwrap(), "\na\nb\n");
        // First start, first end following it.
        assert_eq!(
            loc.locate("Stop Start Here 1 Stop 2 Start Here 3 Stop").unwrap(),
            " 1 "
        );
        // Adjacent anchors give an empty section
        assert_eq!(loc.locate("Start HereStop").unwrap(), "");
    }

    #[test]
    fn test_locate_flexible_whitespace() {
        let loc = locator("Land Bruttodividende  Quellensteuer", "Kuponübersicht");
        assert_eq!(
            loc.locate("Land   Bruttodividende\nQuellensteuer\nDE 1 2 3\nKuponübersicht")
                .unwrap(),
            "\nDE 1 2 3\n"
        );
    }

    #[test]
    fn test_locate_literal_and_case_sensitive() {
        // Regex meta characters in anchors are literal
        let loc = locator("Gewinne/Verluste (je Produkt)", "Ende.");
        assert_eq!(loc.locate("Gewinne/Verluste (je Produkt) x Ende.").unwrap(), " x ");
        assert!(loc.locate("Gewinne/Verluste je Produkt x Ende.").is_err());

        let loc = locator("Start", "Stop");
        assert!(loc.locate("start x Stop").is_err());
    }

    #[test]
    fn test_locate_not_found() {
        let loc = locator("Start", "Stop");
        assert_eq!(
            loc.locate("nothing here").unwrap_err(),
            ReportError::SectionNotFound { section: "Test", anchor: "Start".to_string() }
        );
        // End only occurs before the start
        assert_eq!(
            loc.locate("Stop Start x").unwrap_err(),
            ReportError::SectionNotFound { section: "Test", anchor: "Stop".to_string() }
        );
    }
}
