pub mod approot;
pub mod outfmt;
pub mod source;

// Versioned as 0.YY.MM, after the tax year the form layout was last checked
// against.
pub const KAPREPORT_APP_VERSION: &str = "0.23.12";
