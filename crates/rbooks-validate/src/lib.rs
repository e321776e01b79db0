//! Account usage validation.
//!
//! Checks that every account referenced by transactions is declared in the
//! declarations file, either directly or through an ancestor:
//!
//! | Declared | Used | Covered |
//! |----------|------|---------|
//! | `Assets:Bank` | `Assets:Bank` | yes |
//! | `Assets:Bank` | `Assets:Bank:Checking` | yes |
//! | `Assets:Bank` | `Assets:Banking` | no |
//! | `Assets:Bank:Checking` | `Assets:Bank` | no |
//!
//! # Example
//!
//! ```
//! use rbooks_core::AccountName;
//! use rbooks_validate::validate;
//! use std::collections::BTreeSet;
//!
//! let defined: BTreeSet<AccountName> = ["Assets", "Assets:Bank"].into_iter().map(AccountName::from).collect();
//! let used: BTreeSet<AccountName> = ["Assets:Bank:Checking", "Equity:Draw"].into_iter().map(AccountName::from).collect();
//!
//! let report = validate(&defined, &used);
//! assert!(!report.valid);
//! assert_eq!(report.undefined, vec![AccountName::from("Equity:Draw")]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rbooks_core::AccountName;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result of comparing used accounts with declared ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountReport {
    /// True when every used account is covered.
    pub valid: bool,
    /// False when there were no used accounts to check.
    pub checked: bool,
    /// Number of declared accounts.
    pub defined_count: usize,
    /// Number of used accounts.
    pub used_count: usize,
    /// Used accounts with no declaration, sorted.
    pub undefined: Vec<AccountName>,
}

/// Is `account` declared, directly or through an ancestor?
pub fn is_covered(account: &AccountName, defined: &BTreeSet<AccountName>) -> bool {
    defined.iter().any(|d| account.is_covered_by(d))
}

/// Compare the accounts used by transactions with the declared accounts.
///
/// An empty `used` set is valid: no transactions means nothing to check.
pub fn validate(defined: &BTreeSet<AccountName>, used: &BTreeSet<AccountName>) -> AccountReport {
    // BTreeSet iteration is already sorted.
    let undefined: Vec<AccountName> = used
        .iter()
        .filter(|account| !is_covered(account, defined))
        .cloned()
        .collect();

    AccountReport {
        valid: undefined.is_empty(),
        checked: !used.is_empty(),
        defined_count: defined.len(),
        used_count: used.len(),
        undefined,
    }
}
