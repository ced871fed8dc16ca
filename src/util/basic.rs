// Generic error type for helpers that only need to describe what went wrong.
// Component boundaries lift these into report::ReportError.
pub type SError = String;
