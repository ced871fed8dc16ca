use crate::report::render::RenderTable;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum OutputType {
    /// The Anlage KAP lines. Always written.
    Report,
    Dividends,
    RealizedGains,
    Summary,
    Aggregates,
}

impl OutputType {
    /// Sheet name (xlsx) and table title (text).
    pub fn title(&self) -> &'static str {
        match self {
            OutputType::Report => "Anlage KAP",
            OutputType::Dividends => "Dividenden",
            OutputType::RealizedGains => "Realisierte G-V",
            OutputType::Summary => "Übersicht",
            OutputType::Aggregates => "Summen",
        }
    }

    /// Suffix for the sibling files of the csv output.
    pub fn file_suffix(&self) -> Option<&'static str> {
        match self {
            OutputType::Report => None,
            OutputType::Dividends => Some("dividends"),
            OutputType::RealizedGains => Some("realized"),
            OutputType::Summary => Some("summary"),
            OutputType::Aggregates => Some("aggregates"),
        }
    }
}

pub type Error = String;

pub trait ReportWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error>;

    /// Called once every table was printed. Writers that buffer (xlsx)
    /// only produce their file here.
    fn finish(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }
}
