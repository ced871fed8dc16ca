// Filesystem helpers for the report writers.

use std::{fs, io, path::Path};

/// Makes sure the directory a report file will be written into exists.
/// A bare file name (no parent) needs nothing.
pub fn ensure_parent_dir(file_path: &Path) -> io::Result<()> {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// foo/report.csv + "dividends" -> foo/report-dividends.csv
pub fn sibling_file_path(file_path: &Path, suffix: &str) -> std::path::PathBuf {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    let fname = match file_path.extension() {
        Some(ext) => format!("{stem}-{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{suffix}"),
    };
    file_path.with_file_name(fname)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::sibling_file_path;

    #[test]
    fn test_sibling_file_path() {
        assert_eq!(
            sibling_file_path(&PathBuf::from("out/report.csv"), "dividends"),
            PathBuf::from("out/report-dividends.csv")
        );
        assert_eq!(
            sibling_file_path(&PathBuf::from("report"), "summary"),
            PathBuf::from("report-summary")
        );
    }
}
