//! Core types for rbooks
//!
//! This crate provides the pure building blocks shared by every rbooks tool:
//!
//! - [`AccountName`] - A colon-separated position in the account hierarchy
//! - [`Period`] - A report period (a year or a single month) and its date bounds
//! - [`RegisterRow`] - One transaction line of a register report, ready for CSV
//!
//! Nothing in here touches the filesystem or spawns processes.
//!
//! # Example
//!
//! ```
//! use rbooks_core::{next_month_first_day, to_table, render_csv};
//!
//! assert_eq!(next_month_first_day("2024-12").unwrap(), "2025-01-01");
//!
//! let register = "2024/01/15 Opening capital  Assets:Bank:Business      100,000 JPY  100,000 JPY";
//! let rows = to_table(register);
//! assert_eq!(rows.len(), 1);
//! assert!(render_csv(&rows).ends_with("2024-01-15,Assets:Bank:Business,Opening capital,100,000 JPY,100,000 JPY"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod period;
pub mod register;

pub use account::AccountName;
pub use period::{next_month_first_day, next_year_first_day, Period, PeriodError};
pub use register::{
    escape_field, parse_register_line, render_csv, to_table, RegisterRow, CSV_HEADER,
};
