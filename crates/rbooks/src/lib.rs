//! Bookkeeping CLI tools.
//!
//! This crate provides command-line tools over a year-partitioned ledger
//! directory. The numbers themselves come from an external engine
//! (`ledger` or `hledger`); these tools decide which files it reads and
//! how its output is presented:
//!
//! - `rbooks-check`: Run a balance report over every file
//! - `rbooks-export`: Export a year or month as CSV (or raw register text)
//! - `rbooks-monthly`: Monthly income, expenses and balances
//! - `rbooks-yearly`: Year-end profit and loss statement and balance sheet
//! - `rbooks-accounts`: Verify every used account is declared
//! - `rbooks-init`: Scaffold a new year directory
//!
//! # Example Usage
//!
//! ```bash
//! rbooks-check --ledger-dir ledger
//! rbooks-export --month 2026-01 --output january.csv
//! rbooks-yearly --year 2025 --engine hledger
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod report;
