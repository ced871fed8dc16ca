use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::{report::render::RenderTable, util::os::ensure_parent_dir};

use super::model::{Error, OutputType, ReportWriter};

/// Writes every table into its own sheet of a single workbook. Nothing is
/// written to disk until finish().
pub struct XlsxWriter {
    out_path: PathBuf,
    workbook: Workbook,
}

impl XlsxWriter {
    pub fn new(out_path: &Path) -> XlsxWriter {
        XlsxWriter { out_path: out_path.to_path_buf(), workbook: Workbook::new() }
    }
}

fn map_xlsx_err(e: XlsxError) -> Error {
    e.to_string()
}

fn write_row(
    sheet: &mut Worksheet,
    row_i: u32,
    cells: &[String],
    format: Option<&Format>,
    col_widths: &mut Vec<usize>,
) -> Result<(), Error> {
    for (c_i, cell_str) in cells.iter().enumerate() {
        let col_i: u16 = c_i
            .try_into()
            .map_err(|_| format!("Too many columns ({})", cells.len()))?;
        if col_widths.len() <= c_i {
            col_widths.resize(c_i + 1, 0);
        }
        if cell_str.is_empty() {
            continue;
        }
        match format {
            Some(f) => sheet.write_string_with_format(row_i, col_i, cell_str, f),
            None => sheet.write_string(row_i, col_i, cell_str),
        }
        .map_err(map_xlsx_err)?;
        col_widths[c_i] = col_widths[c_i].max(cell_str.chars().count());
    }
    Ok(())
}

impl ReportWriter for XlsxWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let bold = Format::new().set_bold();

        let sheet = self.workbook.add_worksheet();
        sheet.set_name(out_type.title()).map_err(map_xlsx_err)?;

        let mut col_widths = Vec::<usize>::new();
        let mut row_i: u32 = 0;
        write_row(sheet, row_i, &table_model.header, Some(&bold), &mut col_widths)?;
        for row in &table_model.rows {
            row_i += 1;
            write_row(sheet, row_i, row, None, &mut col_widths)?;
        }
        if !table_model.footer.is_empty() {
            row_i += 1;
            write_row(sheet, row_i, &table_model.footer, Some(&bold), &mut col_widths)?;
        }
        for note in table_model.notes.iter().chain(table_model.errors.iter()) {
            // Notes span the table, so leave them out of the column widths.
            row_i += 2;
            sheet.write_string(row_i, 0, note).map_err(map_xlsx_err)?;
        }

        for (col, width) in col_widths.into_iter().enumerate() {
            // Bounded by the column count checked in write_row.
            let col = col as u16;
            sheet.set_column_width(col, (width + 2) as f64).map_err(map_xlsx_err)?;
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<(), Error> {
        ensure_parent_dir(&self.out_path)
            .map_err(|e| format!("Failed to create directory for {}: {e}", self.out_path.display()))?;
        tracing::debug!("XlsxWriter saving {:?}", self.out_path);
        self.workbook
            .save(&self.out_path)
            .map_err(|e| format!("Failed to save {}: {e}", self.out_path.display()))
    }
}
