//! Selecting the ledger files a report needs.

use crate::{LedgerDir, LoadError};
use rbooks_core::Period;
use std::fs;
use std::path::{Path, PathBuf};

/// Which files to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every ledger file: root files and all year directories.
    All,
    /// Declarations plus every file of one year directory.
    Year(i32),
    /// Declarations, the year's opening balances, and every month file up to
    /// and including the target month (earlier years included).
    Month {
        /// Target year.
        year: i32,
        /// Target month, 1-based.
        month: u32,
    },
}

impl From<Period> for Selector {
    fn from(period: Period) -> Self {
        match period.month_number() {
            None => Self::Year(period.year_number()),
            Some(month) => Self::Month {
                year: period.year_number(),
                month,
            },
        }
    }
}

impl From<Option<Period>> for Selector {
    fn from(period: Option<Period>) -> Self {
        period.map_or(Self::All, Self::from)
    }
}

/// An ordered list of existing ledger files without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFileSet {
    paths: Vec<PathBuf>,
}

impl LedgerFileSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a path unless it is already present.
    pub fn push(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    fn push_if_exists(&mut self, path: PathBuf) {
        if path.is_file() {
            self.push(path);
        }
    }

    /// Does the set contain `path`?
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Is the set empty?
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over the paths in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    /// The paths in order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl IntoIterator for LedgerFileSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a LedgerFileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// True for directory names made of exactly four ASCII digits.
pub fn is_year_dir_name(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

impl LedgerDir {
    /// Resolve the files relevant to `selector`.
    ///
    /// Directory listings are sorted by name, so repeated calls on an
    /// unchanged directory return the same order.
    ///
    /// # Errors
    ///
    /// - [`LoadError::RootNotFound`] if the root directory is missing
    /// - [`LoadError::Io`] if a directory cannot be listed
    pub fn resolve(&self, selector: &Selector) -> Result<LedgerFileSet, LoadError> {
        self.ensure_root()?;

        let mut files = LedgerFileSet::new();
        files.push_if_exists(self.declarations_file());

        match *selector {
            Selector::All => self.collect_all(&mut files)?,
            Selector::Year(year) => {
                let dir = self.year_dir(year);
                if dir.is_dir() {
                    for path in self.ledger_files_in(&dir)? {
                        files.push(path);
                    }
                }
            }
            Selector::Month { year, month } => self.collect_through_month(year, month, &mut files)?,
        }

        tracing::debug!(?selector, count = files.len(), "resolved ledger files");
        Ok(files)
    }

    /// Every ledger file except the declarations file.
    pub fn transaction_files(&self) -> Result<LedgerFileSet, LoadError> {
        self.ensure_root()?;

        let declarations = self.declarations_file();
        let mut all = LedgerFileSet::new();
        self.collect_all(&mut all)?;

        let mut files = LedgerFileSet::new();
        for path in all.into_iter().filter(|p| *p != declarations) {
            files.push(path);
        }
        Ok(files)
    }

    fn collect_all(&self, files: &mut LedgerFileSet) -> Result<(), LoadError> {
        for path in self.ledger_files_in(&self.root)? {
            files.push(path);
        }
        for (_, dir) in self.year_dirs()? {
            for path in self.ledger_files_in(&dir)? {
                files.push(path);
            }
        }
        Ok(())
    }

    fn collect_through_month(
        &self,
        year: i32,
        month: u32,
        files: &mut LedgerFileSet,
    ) -> Result<(), LoadError> {
        for (dir_year, dir) in self.year_dirs()? {
            if dir_year > year {
                break;
            }
            if dir_year == year {
                files.push_if_exists(self.opening_file(year));
            }
            for (file_month, path) in self.month_files_in(&dir)? {
                if dir_year < year || file_month < month {
                    files.push(path);
                }
            }
            if dir_year == year {
                files.push_if_exists(self.month_file(year, month));
            }
        }
        Ok(())
    }

    /// Year directories under the root, ascending.
    fn year_dirs(&self) -> Result<Vec<(i32, PathBuf)>, LoadError> {
        let mut dirs: Vec<(i32, PathBuf)> = sorted_entries(&self.root)?
            .into_iter()
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?;
                if !is_year_dir_name(name) {
                    return None;
                }
                Some((name.parse().ok()?, path))
            })
            .collect();
        dirs.sort_by_key(|(year, _)| *year);
        Ok(dirs)
    }

    /// Ledger files directly inside `dir`, sorted by name.
    fn ledger_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        Ok(sorted_entries(dir)?
            .into_iter()
            .filter(|path| path.is_file() && self.has_ledger_extension(path))
            .collect())
    }

    /// `NN.<ext>` files inside a year directory, with their month number.
    fn month_files_in(&self, dir: &Path) -> Result<Vec<(u32, PathBuf)>, LoadError> {
        Ok(self
            .ledger_files_in(dir)?
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                if stem.len() != 2 || !stem.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                Some((stem.parse().ok()?, path))
            })
            .collect())
    }

    fn has_ledger_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry.map_err(|e| LoadError::io(dir, e))?.path());
    }
    paths.sort();
    Ok(paths)
}
