use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    report::render::RenderTable,
    util::os::{ensure_parent_dir, sibling_file_path},
};

use super::model::{Error, OutputType, ReportWriter};

/// Writes the report table to the given file, and any detail table to a
/// sibling file named after it (report.csv -> report-dividends.csv).
///
/// Tables are held in memory until finish(). If any file cannot be written,
/// the ones already written are removed again.
pub struct CsvWriter {
    out_path: PathBuf,
    pending: Vec<(PathBuf, Vec<u8>)>,
}

impl CsvWriter {
    pub fn new(out_path: &Path) -> CsvWriter {
        CsvWriter { out_path: out_path.to_path_buf(), pending: Vec::new() }
    }

    pub fn file_path_for(&self, out_type: OutputType) -> PathBuf {
        match out_type.file_suffix() {
            Some(suffix) => sibling_file_path(&self.out_path, suffix),
            None => self.out_path.clone(),
        }
    }
}

fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Failed to remove partial output {}: {}", path.display(), e);
        }
    }
}

pub fn write_table_csv(table_model: &RenderTable, w: impl io::Write) -> Result<(), Error> {
    let mut csv_w = csv::WriterBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_writer(w);

    csv_w.write_record(&table_model.header).map_err(|e| e.to_string())?;
    for row in &table_model.rows {
        csv_w.write_record(row).map_err(|e| e.to_string())?;
    }
    if !table_model.footer.is_empty() {
        csv_w.write_record(&table_model.footer).map_err(|e| e.to_string())?;
    }

    let n_cols = table_model.header.len().max(1);
    for note in table_model.notes.iter().chain(table_model.errors.iter()) {
        let mut note_record = vec![String::new(); n_cols];
        note_record[0] = note.clone();
        csv_w.write_record(note_record).map_err(|e| e.to_string())?;
    }

    csv_w.flush().map_err(|e| e.to_string())?;
    Ok(())
}

impl ReportWriter for CsvWriter {
    fn print_render_table(
        &mut self,
        out_type: OutputType,
        table_model: &RenderTable,
    ) -> Result<(), Error> {
        let file_path = self.file_path_for(out_type);
        let mut data = Vec::<u8>::new();
        write_table_csv(table_model, &mut data)
            .map_err(|e| format!("Failed to render {}: {}", file_path.display(), e))?;
        self.pending.push((file_path, data));
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), Error> {
        ensure_parent_dir(&self.out_path).map_err(|e| {
            format!("Failed to create directory for {}: {e}", self.out_path.display())
        })?;

        let mut written = Vec::<PathBuf>::with_capacity(self.pending.len());
        for (file_path, data) in &self.pending {
            tracing::debug!("CsvWriter writing {:?}", file_path);
            if let Err(e) = fs::write(file_path, data) {
                remove_written(&written);
                return Err(format!("Failed to write {}: {}", file_path.display(), e));
            }
            written.push(file_path.clone());
        }
        Ok(())
    }
}
