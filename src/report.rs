pub mod aggregate;
pub mod dividends;
pub mod error;
pub mod fees;
pub mod formula;
pub mod model;
pub mod realized;
pub mod render;
pub mod section;
pub mod summary;

pub use self::aggregate::Aggregates;
pub use self::dividends::DividendTable;
pub use self::error::ReportError;
pub use self::model::{
    DividendRecord, Jurisdiction, RawDocument, RealizedGainRecord, ReportLine, SummaryEntry,
};
pub use self::realized::RealizedGains;
pub use self::render::RenderTable;
