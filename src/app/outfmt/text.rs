use std::io::Write;

use tabled::settings::{
    object::{Columns, Rows},
    Alignment, Style,
};

use crate::{report::render::RenderTable, util::rw::WriteHandle};

use super::model::{Error, OutputType, ReportWriter};

/// Pretty ascii tables, for the console.
pub struct TextWriter {
    w: WriteHandle,
}

impl TextWriter {
    pub fn new(w: WriteHandle) -> TextWriter {
        TextWriter { w }
    }
}

pub fn render_table_text(table_model: &RenderTable) -> String {
    let mut table_bldr = tabled::builder::Builder::default();
    table_bldr.push_record(table_model.header.iter().map(|h| h.to_uppercase()));
    for row in &table_model.rows {
        table_bldr.push_record(row);
    }
    let has_footer = !table_model.footer.is_empty();
    if has_footer {
        table_bldr.push_record(table_model.footer.clone());
    }

    let mut table = table_bldr.build();
    table.with(Style::ascii());
    // Amounts are always in the last column
    table.modify(Columns::last(), Alignment::right());
    table.modify(Rows::first(), Alignment::center());
    if has_footer {
        table.modify(Rows::last(), Alignment::right());
    }
    table.to_string()
}

impl ReportWriter for TextWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let map_write_err = |e: std::io::Error| format!("{e}");

        for err in &table_model.errors {
            writeln!(self.w, "[!] {}", err).map_err(map_write_err)?;
        }

        writeln!(self.w, "{}", out_type.title()).map_err(map_write_err)?;
        writeln!(self.w, "{}", render_table_text(table_model)).map_err(map_write_err)?;

        for note in &table_model.notes {
            writeln!(self.w, "{note}").map_err(map_write_err)?;
        }

        writeln!(self.w).map_err(map_write_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::app::outfmt::model::{OutputType, ReportWriter};
    use crate::report::render::RenderTable;
    use crate::testlib::assert_re;
    use crate::util::rw::WriteHandle;

    use super::TextWriter;

    #[test]
    fn test_text_writer() {
        let (w, buff) = WriteHandle::string_buff_write_handle();
        let mut writer = TextWriter::new(w);
        let table = RenderTable {
            header: vec!["Zeile".to_string(), "Betrag".to_string()],
            rows: vec![vec!["37".to_string(), "26.38 EUR".to_string()]],
            notes: vec!["a note".to_string()],
            errors: vec!["bad thing".to_string()],
            ..Default::default()
        };
        writer.print_render_table(OutputType::Report, &table).unwrap();

        let out = buff.borrow().as_str().to_string();
        assert!(out.starts_with("[!] bad thing\nAnlage KAP\n"), "{out}");
        assert_re(r"\|\s+ZEILE\s+\|\s+BETRAG\s+\|", &out);
        assert_re(r"\|\s+37\s+\|\s+26\.38 EUR \|", &out);
        assert!(out.ends_with("a note\n\n"), "{out}");
    }
}
