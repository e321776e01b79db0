//! Creating a new year directory.

use crate::{LedgerDir, LoadError};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Outcome of [`scaffold_year`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// The year directory.
    pub year_dir: PathBuf,
    /// File names written, in creation order.
    pub created: Vec<String>,
    /// File names left alone because they already existed.
    pub skipped: Vec<String>,
}

/// Create `root/YYYY/` with opening, closing and twelve month files.
///
/// File contents come from `templates_dir`:
///
/// - `opening.<ext>.tpl` and `closing.<ext>.tpl` with `YYYY` replaced
/// - `monthly.<ext>.tpl` with `YYYY` and `MM` replaced
///
/// A missing template is replaced by a one-line comment header. Existing
/// files are never overwritten.
///
/// # Errors
///
/// - [`LoadError::Io`] if the directory or a file cannot be created
/// - [`LoadError::Template`] if a template exists but cannot be read
pub fn scaffold_year(
    dir: &LedgerDir,
    year: i32,
    templates_dir: &Path,
) -> Result<ScaffoldReport, LoadError> {
    let year_dir = dir.year_dir(year);
    fs::create_dir_all(&year_dir).map_err(|e| LoadError::io(&year_dir, e))?;

    let mut report = ScaffoldReport {
        year_dir,
        ..ScaffoldReport::default()
    };

    let root_name = dir
        .root()
        .file_name()
        .map_or_else(|| dir.root().display().to_string(), |n| n.to_string_lossy().into_owned());
    let year_str = format!("{year:04}");

    for stem in ["opening", "closing"] {
        let file_name = dir.file_name(stem);
        let template = load_template(&templates_dir.join(format!("{file_name}.tpl")))?;
        let content = template.map_or_else(
            || format!("; {root_name}/{year_str}/{file_name}\n\n"),
            |t| t.replace("YYYY", &year_str),
        );
        let path = report.year_dir.join(&file_name);
        write_new(&path, &content, file_name, &mut report)?;
    }

    let monthly = load_template(&templates_dir.join(format!("{}.tpl", dir.file_name("monthly"))))?;
    for month in 1..=12u32 {
        let month_str = format!("{month:02}");
        let file_name = dir.file_name(&month_str);
        let content = monthly.as_ref().map_or_else(
            || format!("; {root_name}/{year_str}/{file_name}\n\n"),
            |t| t.replace("YYYY", &year_str).replace("MM", &month_str),
        );
        let path = report.year_dir.join(&file_name);
        write_new(&path, &content, file_name, &mut report)?;
    }

    Ok(report)
}

fn load_template(path: &Path) -> Result<Option<String>, LoadError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "template not found, using a comment header");
            Ok(None)
        }
        Err(source) => Err(LoadError::Template {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_new(
    path: &Path,
    content: &str,
    file_name: String,
    report: &mut ScaffoldReport,
) -> Result<(), LoadError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => {
            fill_new_file(path, file, content)?;
            report.created.push(file_name);
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "keeping existing file");
            report.skipped.push(file_name);
        }
        Err(e) => return Err(LoadError::io(path, e)),
    }
    Ok(())
}

/// Write `content` into the freshly created `path`; a partial file is
/// removed so a rerun creates it again instead of keeping it.
fn fill_new_file<W: Write>(path: &Path, mut file: W, content: &str) -> Result<(), LoadError> {
    if let Err(e) = file.write_all(content.as_bytes()).and_then(|()| file.flush()) {
        drop(file);
        if let Err(remove) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %remove, "could not remove partial file");
        }
        return Err(LoadError::io(path, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("01.ledger");
        fs::write(&path, "; partial").unwrap();

        let err = fill_new_file(&path, FullDisk, "; 2027-01\n").unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_rerun_after_failed_write_creates_the_file() {
        let temp = TempDir::new().unwrap();
        let dir = LedgerDir::new(temp.path().join("ledger"));
        let path = dir.month_file(2027, 1);
        fs::create_dir_all(dir.year_dir(2027)).unwrap();
        fs::write(&path, "").unwrap();
        fill_new_file(&path, FullDisk, "x").unwrap_err();

        let report = scaffold_year(&dir, 2027, &temp.path().join("templates")).unwrap();

        assert_eq!(report.created.len(), 14);
        assert!(report.skipped.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "; ledger/2027/01.ledger\n\n");
    }
}
