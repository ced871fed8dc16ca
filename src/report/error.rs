use std::fmt;

use crate::util::basic::SError;

/// Everything that can go wrong producing a report.
///
/// Only SectionNotFound is recoverable. The pipeline logs it and carries on
/// with an empty record set; the others abort the run before anything is
/// written.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ReportError {
    /// The text source failed, or gave no text at all.
    SourceUnavailable(SError),
    SectionNotFound { section: &'static str, anchor: String },
    /// A dividend row did not split into the expected columns.
    /// line_num is 1-based within the section.
    MalformedRow { line_num: usize, line: String, n_tokens: usize },
    /// A dividend row had the right shape, but a figure was not a number.
    InvalidNumber { line_num: usize, line: String, reason: SError },
    InvalidConfig(SError),
    SinkWriteFailure(SError),
}

impl ReportError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReportError::SectionNotFound { .. })
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::SourceUnavailable(e) => {
                write!(f, "No document text available: {e}")
            }
            ReportError::SectionNotFound { section, anchor } => {
                write!(f, "{section} section not found (looking for \"{anchor}\")")
            }
            ReportError::MalformedRow { line_num, line, n_tokens } => write!(
                f,
                "Malformed dividend row {line_num} (expected 4 columns, found {n_tokens}): \"{line}\""
            ),
            ReportError::InvalidNumber { line_num, line, reason } => {
                write!(f, "Invalid dividend row {line_num} \"{line}\": {reason}")
            }
            ReportError::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
            ReportError::SinkWriteFailure(e) => write!(f, "Failed to write report: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

#[cfg(test)]
mod tests {
    use super::ReportError;

    #[test]
    fn test_display() {
        let err = ReportError::MalformedRow {
            line_num: 2,
            line: "US 50,00 7,50".to_string(),
            n_tokens: 3,
        };
        assert_eq!(
            err.to_string(),
            "Malformed dividend row 2 (expected 4 columns, found 3): \"US 50,00 7,50\""
        );
        assert!(!err.is_recoverable());

        let err = ReportError::SectionNotFound {
            section: "Dividend",
            anchor: "Kuponübersicht".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Dividend section not found (looking for \"Kuponübersicht\")"
        );
        assert!(err.is_recoverable());
    }
}
