//! Ledger directory layout for rbooks.
//!
//! A ledger directory is partitioned by year:
//!
//! ```text
//! ledger/
//! ├── accounts.ledger        account declarations
//! ├── misc.ledger            loose transaction files
//! └── 2026/
//!     ├── opening.ledger     opening balances
//!     ├── 01.ledger … 12.ledger
//!     └── closing.ledger     year-end adjustments
//! ```
//!
//! This crate knows which of those files a report needs:
//!
//! - [`LedgerDir::resolve`] selects the files for all time, a year or a month
//! - [`extract_defined_accounts`] reads the declared account names
//! - [`scaffold_year`] creates an empty year directory from templates
//!
//! # Example
//!
//! ```no_run
//! use rbooks_loader::{LedgerDir, Selector};
//!
//! let dir = LedgerDir::new("ledger");
//! let files = dir.resolve(&Selector::Month { year: 2026, month: 2 })?;
//! for path in &files {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), rbooks_loader::LoadError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod declarations;
mod resolve;
mod scaffold;

pub use declarations::{extract_defined_accounts, parse_declarations};
pub use resolve::{is_year_dir_name, LedgerFileSet, Selector};
pub use scaffold::{scaffold_year, ScaffoldReport};

use rbooks_core::AccountName;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default extension of ledger files.
pub const DEFAULT_EXTENSION: &str = "ledger";

/// Errors that can occur while reading the ledger directory.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The ledger root directory does not exist.
    #[error("ledger directory not found: {}", .path.display())]
    RootNotFound {
        /// The missing directory.
        path: PathBuf,
    },

    /// IO error reading or writing a file or directory.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A scaffolding template exists but could not be read.
    #[error("failed to read template {}: {source}", .path.display())]
    Template {
        /// The template path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A ledger directory root together with its naming conventions.
///
/// Every resolver and extractor call takes the directory explicitly, so
/// several roots can be used side by side (tests use temporary ones).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerDir {
    root: PathBuf,
    extension: String,
}

impl LedgerDir {
    /// A ledger directory using the default `.ledger` extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different file extension (without the leading dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The ledger file extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `stem.<ext>`
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }

    /// Path of the account declarations file (`root/accounts.<ext>`).
    pub fn declarations_file(&self) -> PathBuf {
        self.root.join(self.file_name("accounts"))
    }

    /// Path of a year directory (`root/YYYY`).
    pub fn year_dir(&self, year: i32) -> PathBuf {
        self.root.join(format!("{year:04}"))
    }

    /// Path of a month file (`root/YYYY/MM.<ext>`).
    pub fn month_file(&self, year: i32, month: u32) -> PathBuf {
        self.year_dir(year)
            .join(self.file_name(&format!("{month:02}")))
    }

    /// Path of a year's opening balances file.
    pub fn opening_file(&self, year: i32) -> PathBuf {
        self.year_dir(year).join(self.file_name("opening"))
    }

    /// Path of a year's closing entries file.
    pub fn closing_file(&self, year: i32) -> PathBuf {
        self.year_dir(year).join(self.file_name("closing"))
    }

    /// Read the accounts declared in the declarations file.
    pub fn defined_accounts(&self) -> Result<BTreeSet<AccountName>, LoadError> {
        extract_defined_accounts(&self.declarations_file())
    }

    pub(crate) fn ensure_root(&self) -> Result<(), LoadError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(LoadError::RootNotFound {
                path: self.root.clone(),
            })
        }
    }
}

impl Default for LedgerDir {
    fn default() -> Self {
        Self::new("ledger")
    }
}
